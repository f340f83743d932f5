//! Normalized closed ranges used for the disturbance band and output limits.

use ff_core::{Real, Tolerances, nearly_equal};
use serde::{Deserialize, Serialize};

/// A `[min, max]` pair that is always stored with `min <= max`.
///
/// Construction and deserialization accept the bounds in either order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(Real, Real)", into = "(Real, Real)")]
pub struct Range {
    min: Real,
    max: Real,
}

impl Range {
    /// Create a range from two bounds given in any order.
    pub fn new(a: Real, b: Real) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    pub fn min(&self) -> Real {
        self.min
    }

    pub fn max(&self) -> Real {
        self.max
    }

    pub fn as_tuple(&self) -> (Real, Real) {
        (self.min, self.max)
    }

    /// Open-interval membership: `min < value < max`.
    ///
    /// Values on a bound, or within `tol` of one, are outside.
    pub fn contains_open(&self, value: Real, tol: Tolerances) -> bool {
        self.min < value
            && value < self.max
            && !nearly_equal(value, self.min, tol)
            && !nearly_equal(value, self.max, tol)
    }

    /// Clamp `value` into the range.
    ///
    /// Unlike `f64::clamp` this never panics. A NaN input is returned as NaN
    /// rather than snapped to a bound.
    pub fn clamp(&self, value: Real) -> Real {
        if value.is_nan() {
            return value;
        }
        value.min(self.max).max(self.min)
    }
}

impl From<(Real, Real)> for Range {
    fn from((a, b): (Real, Real)) -> Self {
        Self::new(a, b)
    }
}

impl From<Range> for (Real, Real) {
    fn from(range: Range) -> Self {
        range.as_tuple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_bounds_are_normalized() {
        let r = Range::new(5.0, -5.0);
        assert_eq!(r.min(), -5.0);
        assert_eq!(r.max(), 5.0);
        assert_eq!(r, Range::from((-5.0, 5.0)));
    }

    #[test]
    fn bounds_are_outside_open_interval() {
        let r = Range::new(-1.0, 1.0);
        let tol = Tolerances::default();
        assert!(r.contains_open(0.0, tol));
        assert!(!r.contains_open(-1.0, tol));
        assert!(!r.contains_open(1.0, tol));
        assert!(!r.contains_open(1.0 - 1e-13, tol));
        assert!(!r.contains_open(2.0, tol));
    }

    #[test]
    fn degenerate_range_contains_nothing() {
        let r = Range::new(3.0, 3.0);
        assert!(!r.contains_open(3.0, Tolerances::default()));
        assert_eq!(r.clamp(10.0), 3.0);
        assert_eq!(r.clamp(-10.0), 3.0);
    }

    #[test]
    fn clamp_hits_nearest_bound() {
        let r = Range::new(100.0, 0.0);
        assert_eq!(r.clamp(150.0), 100.0);
        assert_eq!(r.clamp(-3.0), 0.0);
        assert_eq!(r.clamp(42.0), 42.0);
    }

    #[test]
    fn clamp_keeps_nan() {
        let r = Range::new(0.0, 100.0);
        assert!(r.clamp(f64::NAN).is_nan());
        assert_eq!(r.clamp(f64::INFINITY), 100.0);
        assert_eq!(r.clamp(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn deserializes_from_unordered_pair() {
        let r: Range = serde_json::from_str("[10.0, -2.0]").unwrap();
        assert_eq!(r.as_tuple(), (-2.0, 10.0));
        assert_eq!(serde_json::to_string(&r).unwrap(), "[-2.0,10.0]");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn order_of_bounds_does_not_matter(a in -1e3_f64..1e3_f64, b in -1e3_f64..1e3_f64) {
            prop_assert_eq!(Range::new(a, b), Range::new(b, a));
            let r = Range::new(a, b);
            prop_assert!(r.min() <= r.max());
        }

        #[test]
        fn clamp_stays_in_bounds(
            a in -1e3_f64..1e3_f64,
            b in -1e3_f64..1e3_f64,
            v in -1e6_f64..1e6_f64,
        ) {
            let r = Range::new(a, b);
            let c = r.clamp(v);
            prop_assert!(c >= r.min() && c <= r.max());
        }
    }
}
