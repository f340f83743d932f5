//! Nominal operating point the compensator corrects against.

use ff_core::Real;

/// Last in-band sample: time, disturbance and manipulated variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NominalCondition {
    /// Time of the sample.
    pub t: Real,
    /// Disturbance at that time.
    pub d: Real,
    /// Manipulated variable applied at that time.
    pub u: Real,
}

impl NominalCondition {
    pub fn new(t: Real, d: Real, u: Real) -> Self {
        Self { t, d, u }
    }

    /// Anchor at time zero from the current readings.
    pub fn initial(d: Real, u: Real) -> Self {
        Self::new(0.0, d, u)
    }
}
