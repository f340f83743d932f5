use crate::CoreError;

/// Floating point type used throughout the workspace
pub type Real = f64;

/// Absolute/relative tolerance pair for approximate comparisons.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Build a tolerance pair, rejecting negative or non-finite bounds.
    pub fn new(abs: Real, rel: Real) -> Result<Self, CoreError> {
        let abs = ensure_finite(abs, "abs tolerance")?;
        let rel = ensure_finite(rel, "rel tolerance")?;
        if abs < 0.0 || rel < 0.0 {
            return Err(CoreError::InvalidArg {
                what: "tolerances must be non-negative",
            });
        }
        Ok(Self { abs, rel })
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

/// `true` when `v` is within the absolute tolerance of zero.
///
/// The relative term is meaningless against zero, so only `tol.abs` applies.
pub fn nearly_zero(v: Real, tol: Tolerances) -> bool {
    v.abs() <= tol.abs
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}
