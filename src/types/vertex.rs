use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numbering convention used by input files and printed output
///
/// Graphs are always indexed `0..n` internally; `IndexBase` converts at the
/// boundary so that 1-based edge lists and reports never leak into the
/// algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexBase {
    Zero,
    #[default]
    One,
}

impl IndexBase {
    /// Value of the first vertex id under this convention
    pub fn offset(self) -> usize {
        match self {
            IndexBase::Zero => 0,
            IndexBase::One => 1,
        }
    }

    /// Convert an external id to an internal index
    ///
    /// Returns `None` for ids below the base (e.g. `0` in a 1-based file).
    pub fn to_internal(self, external: usize) -> Option<usize> {
        external.checked_sub(self.offset())
    }

    /// Convert an internal index to the external id
    pub fn to_external(self, internal: usize) -> usize {
        internal + self.offset()
    }
}

impl fmt::Display for IndexBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.offset())
    }
}

impl FromStr for IndexBase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "0" | "zero" => Ok(IndexBase::Zero),
            "1" | "one" => Ok(IndexBase::One),
            other => Err(format!("invalid index base '{}', expected 0 or 1", other)),
        }
    }
}
