//! Extended-real search scores.
//!
//! `Loss` and `Win` are sentinels that bracket every finite heuristic value,
//! so search code can compare scores without relying on float infinities.

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy)]
pub enum Score {
    Loss,
    Value(f64),
    Win,
}

impl Score {
    /// Wraps a heuristic value. Infinities collapse to the matching sentinel.
    #[inline]
    pub fn value(x: f64) -> Self {
        debug_assert!(!x.is_nan(), "heuristic scores must not be NaN");
        if x == f64::INFINITY {
            Score::Win
        } else if x == f64::NEG_INFINITY {
            Score::Loss
        } else {
            // -0.0 + 0.0 == +0.0, keeps total_cmp from splitting zero.
            Score::Value(x + 0.0)
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Score::Loss | Score::Win)
    }

    /// Float view for reporting; sentinels map to the infinities.
    #[inline]
    pub fn as_f64(self) -> f64 {
        match self {
            Score::Loss => f64::NEG_INFINITY,
            Score::Value(x) => x,
            Score::Win => f64::INFINITY,
        }
    }

    #[inline]
    const fn rank(self) -> u8 {
        match self {
            Score::Loss => 0,
            Score::Value(_) => 1,
            Score::Win => 2,
        }
    }
}

impl From<f64> for Score {
    fn from(x: f64) -> Self {
        Score::value(x)
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Score::Value(a), Score::Value(b)) => a.total_cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Loss => write!(f, "-inf"),
            Score::Value(x) => write!(f, "{x}"),
            Score::Win => write!(f, "inf"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Score;

    #[test]
    fn sentinels_bracket_every_finite_value() {
        for x in [f64::MIN, -1.0e300, -3.0, 0.0, 7.5, f64::MAX] {
            assert!(Score::Loss < Score::Value(x));
            assert!(Score::Value(x) < Score::Win);
        }
        assert!(Score::Loss < Score::Win);
        assert_eq!(Score::Loss, Score::Loss);
        assert_eq!(Score::Win.max(Score::Value(1.0e9)), Score::Win);
        assert_eq!(Score::Loss.min(Score::Value(-1.0e9)), Score::Loss);
    }

    #[test]
    fn finite_values_order_numerically() {
        assert!(Score::Value(3.0) < Score::Value(5.0));
        assert_eq!(Score::Value(2.0), Score::value(2.0));
        assert_eq!(Score::Value(-1.0).max(Score::Value(4.0)), Score::Value(4.0));
    }

    #[test]
    fn infinities_collapse_to_sentinels() {
        assert_eq!(Score::from(f64::INFINITY), Score::Win);
        assert_eq!(Score::from(f64::NEG_INFINITY), Score::Loss);
        assert!(matches!(Score::from(1.5), Score::Value(x) if x == 1.5));
        assert!(Score::Win.is_terminal());
        assert!(!Score::Value(0.0).is_terminal());
    }

    #[test]
    fn display_matches_float_rendering() {
        assert_eq!(Score::Loss.to_string(), "-inf");
        assert_eq!(Score::Win.to_string(), "inf");
        assert_eq!(Score::Value(5.0).to_string(), "5");
        assert_eq!(Score::Value(-2.5).as_f64(), -2.5);
    }
}
