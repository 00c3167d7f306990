use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Path length or edge cost, with an explicit "no edge / unreachable" value
///
/// `Infinite` orders after every finite value, so the derived `PartialOrd`
/// can be used directly for relaxation checks. Addition is guarded: any sum
/// involving `Infinite` is `Infinite`, never a floating-point infinity.
///
/// Serialized as a JSON number, or `null` when infinite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "Option<f64>", into = "Option<f64>")]
pub enum Distance {
    /// Reachable with the given total cost
    Finite(f64),
    /// No edge, or no path
    Infinite,
}

impl Distance {
    /// Distance from a vertex to itself
    pub const ZERO: Distance = Distance::Finite(0.0);

    /// Wrap a raw cost, mapping non-finite values to `Infinite`
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Distance::Finite(value)
        } else {
            Distance::Infinite
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Distance::Finite(_))
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Distance::Infinite)
    }

    /// The finite value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            Distance::Finite(v) => Some(*v),
            Distance::Infinite => None,
        }
    }

    /// Total order used by heap-based searches (`Infinite` is the greatest)
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Distance::Finite(a), Distance::Finite(b)) => a.total_cmp(b),
            (Distance::Finite(_), Distance::Infinite) => Ordering::Less,
            (Distance::Infinite, Distance::Finite(_)) => Ordering::Greater,
            (Distance::Infinite, Distance::Infinite) => Ordering::Equal,
        }
    }
}

impl Default for Distance {
    fn default() -> Self {
        Distance::Infinite
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        match (self, rhs) {
            (Distance::Finite(a), Distance::Finite(b)) => Distance::Finite(a + b),
            _ => Distance::Infinite,
        }
    }
}

impl Add<f64> for Distance {
    type Output = Distance;

    fn add(self, rhs: f64) -> Distance {
        self + Distance::new(rhs)
    }
}

impl Sum for Distance {
    fn sum<I: Iterator<Item = Distance>>(iter: I) -> Self {
        iter.fold(Distance::ZERO, |acc, d| acc + d)
    }
}

impl From<f64> for Distance {
    fn from(value: f64) -> Self {
        Distance::new(value)
    }
}

impl From<Option<f64>> for Distance {
    fn from(value: Option<f64>) -> Self {
        value.map(Distance::new).unwrap_or(Distance::Infinite)
    }
}

impl From<Distance> for Option<f64> {
    fn from(value: Distance) -> Self {
        value.value()
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // Integral costs print without a trailing ".0"
            Distance::Finite(v) if v.fract() == 0.0 && v.abs() < 1e15 => (*v as i64).to_string(),
            Distance::Finite(v) => v.to_string(),
            Distance::Infinite => "inf".to_string(),
        };
        f.pad(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infinite_orders_last() {
        assert!(Distance::Finite(1e300) < Distance::Infinite);
        assert!(Distance::Finite(-5.0) < Distance::Finite(2.0));
        assert!(!(Distance::Infinite < Distance::Infinite));
    }

    #[test]
    fn test_guarded_addition() {
        assert_eq!(Distance::Finite(2.0) + Distance::Finite(3.5), Distance::Finite(5.5));
        assert_eq!(Distance::Finite(2.0) + Distance::Infinite, Distance::Infinite);
        assert_eq!(Distance::Infinite + Distance::Infinite, Distance::Infinite);
        assert_eq!(Distance::Finite(1.0) + f64::INFINITY, Distance::Infinite);
    }

    #[test]
    fn test_sum_with_infinite_member() {
        let finite: Distance = vec![Distance::Finite(1.0), Distance::Finite(2.0)]
            .into_iter()
            .sum();
        assert_eq!(finite, Distance::Finite(3.0));

        let infinite: Distance = vec![Distance::Finite(1.0), Distance::Infinite]
            .into_iter()
            .sum();
        assert_eq!(infinite, Distance::Infinite);
    }

    #[test]
    fn test_display() {
        assert_eq!(Distance::Finite(17.0).to_string(), "17");
        assert_eq!(Distance::Finite(2.5).to_string(), "2.5");
        assert_eq!(Distance::Infinite.to_string(), "inf");
    }

    #[test]
    fn test_json_representation() {
        assert_eq!(serde_json::to_string(&Distance::Finite(4.0)).unwrap(), "4.0");
        assert_eq!(serde_json::to_string(&Distance::Infinite).unwrap(), "null");

        let parsed: Distance = serde_json::from_str("null").unwrap();
        assert_eq!(parsed, Distance::Infinite);
    }
}
