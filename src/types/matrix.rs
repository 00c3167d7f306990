use super::distance::Distance;
use serde::Serialize;
use std::ops::{Index, IndexMut};

/// Dense N×N matrix stored row-major in a single allocation
///
/// Indexed with `(row, col)` tuples. Indexing out of bounds panics like a
/// slice does; use [`SquareMatrix::get`] for checked access.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SquareMatrix<T> {
    size: usize,
    cells: Vec<T>,
}

/// All-pairs distances, `dist[(i, j)]` is the cost of the best known i → j path
pub type DistanceMatrix = SquareMatrix<Distance>;

/// Next hop table, `route[(i, j)]` is the vertex visited right after `i` on the way to `j`
pub type RoutingMatrix = SquareMatrix<Option<usize>>;

impl<T: Clone> SquareMatrix<T> {
    /// Create a `size`×`size` matrix with every cell set to `value`
    ///
    /// # Panics
    /// If `size * size` cells cannot be allocated; see [`SquareMatrix::try_filled`]
    pub fn filled(size: usize, value: T) -> Self {
        match Self::try_filled(size, value) {
            Some(matrix) => matrix,
            None => panic!("cannot allocate a {}x{} matrix", size, size),
        }
    }

    /// Like [`SquareMatrix::filled`], but `None` when `size * size` overflows
    /// or the allocation fails
    pub fn try_filled(size: usize, value: T) -> Option<Self> {
        let len = size.checked_mul(size)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(len).ok()?;
        cells.resize(len, value);
        Some(Self { size, cells })
    }
}

impl<T> SquareMatrix<T> {
    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.size && col < self.size {
            self.cells.get(row * self.size + col)
        } else {
            None
        }
    }

    /// Borrow one row as a slice
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.size;
        &self.cells[start..start + self.size]
    }

    /// Iterate rows in ascending index order
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics, an empty matrix simply has no rows
        self.cells.chunks(self.size.max(1))
    }
}

impl<T> Index<(usize, usize)> for SquareMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(col < self.size, "column {} out of bounds for size {}", col, self.size);
        &self.cells[row * self.size + col]
    }
}

impl<T> IndexMut<(usize, usize)> for SquareMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(col < self.size, "column {} out of bounds for size {}", col, self.size);
        &mut self.cells[row * self.size + col]
    }
}

impl DistanceMatrix {
    /// Rows as nested vectors of optional costs, the shape used by JSON reports
    pub fn to_nested(&self) -> Vec<Vec<Option<f64>>> {
        self.rows()
            .map(|row| row.iter().map(Distance::value).collect())
            .collect()
    }
}
