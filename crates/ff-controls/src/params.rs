//! Tunable lead-lag parameters.

use ff_core::Real;
use serde::{Deserialize, Serialize};

/// Gain and time constants of a first-order lead-lag compensator.
///
/// The two time constants go by two names in practice:
/// - `lead_time_constant` is also called the *system* time constant (τp)
/// - `lag_time_constant` is also called the *disturbance* time constant (τd)
///
/// Both spellings are accepted when deserializing. The set is always replaced
/// as a unit on a compensator, never field by field.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LeadLagParams {
    /// Scales the correction magnitude.
    pub gain: Real,
    /// Lead (system) time constant, seconds.
    #[serde(alias = "lead", alias = "system_time_constant")]
    pub lead_time_constant: Real,
    /// Lag (disturbance) time constant, seconds. Must not be zero.
    #[serde(alias = "lag", alias = "disturbance_time_constant")]
    pub lag_time_constant: Real,
}

impl LeadLagParams {
    pub fn new(gain: Real, lead_time_constant: Real, lag_time_constant: Real) -> Self {
        Self {
            gain,
            lead_time_constant,
            lag_time_constant,
        }
    }

    /// τp, the same value as `lead_time_constant`.
    pub fn system_time_constant(&self) -> Real {
        self.lead_time_constant
    }

    /// τd, the same value as `lag_time_constant`.
    pub fn disturbance_time_constant(&self) -> Real {
        self.lag_time_constant
    }

    /// Lead-lag weighting after `dt` seconds: `(lead - lag) / lag * exp(-dt / lag)`.
    ///
    /// Exactly zero when the two constants are equal, for any `dt`.
    /// Callers must reject a zero lag time constant first.
    pub fn lead_lag_factor(&self, dt: Real) -> Real {
        let lag = self.lag_time_constant;
        let weight = self.lead_time_constant - lag;
        if weight == 0.0 {
            return 0.0;
        }
        weight / lag * (-dt / lag).exp()
    }

    pub fn as_tuple(&self) -> (Real, Real, Real) {
        (self.gain, self.lead_time_constant, self.lag_time_constant)
    }
}

impl From<(Real, Real, Real)> for LeadLagParams {
    fn from((gain, lead, lag): (Real, Real, Real)) -> Self {
        Self::new(gain, lead, lag)
    }
}

impl From<LeadLagParams> for (Real, Real, Real) {
    fn from(params: LeadLagParams) -> Self {
        params.as_tuple()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_zero() {
        assert_eq!(LeadLagParams::default().as_tuple(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn naming_facets_agree() {
        let p = LeadLagParams::from((2.0, 1.0, 3.0));
        assert_eq!(p.system_time_constant(), p.lead_time_constant);
        assert_eq!(p.disturbance_time_constant(), p.lag_time_constant);
    }

    #[test]
    fn factor_vanishes_when_constants_match() {
        let p = LeadLagParams::new(1.0, 4.0, 4.0);
        for dt in [0.0, 0.5, 10.0, -3.0, -1e4] {
            assert_eq!(p.lead_lag_factor(dt), 0.0);
        }
    }

    #[test]
    fn factor_decays_toward_zero() {
        let p = LeadLagParams::new(1.0, 1.0, 2.0);
        assert!((p.lead_lag_factor(0.0) + 0.5).abs() < 1e-12);
        assert!((p.lead_lag_factor(1.0) + 0.5 * (-0.5_f64).exp()).abs() < 1e-12);
        assert!(p.lead_lag_factor(100.0).abs() < 1e-10);
    }

    #[test]
    fn deserializes_either_naming() {
        let a: LeadLagParams =
            serde_json::from_str(r#"{"gain":1.5,"lead":0.5,"lag":2.0}"#).unwrap();
        let b: LeadLagParams = serde_json::from_str(
            r#"{"gain":1.5,"system_time_constant":0.5,"disturbance_time_constant":2.0}"#,
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_tuple(), (1.5, 0.5, 2.0));
    }
}
