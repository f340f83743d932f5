//! First-order lead-lag feedforward compensator.
//!
//! The compensator keeps one piece of state across ticks, the nominal condition.
//! An in-band disturbance re-anchors it; an out-of-band disturbance is corrected
//! against it:
//!
//! ```text
//! Δd  = d - d_nom
//! Δt  = t - t_nom
//! Δu  = K · Δd · (1 + (τ_lead - τ_lag) / τ_lag · exp(-Δt / τ_lag))
//! out = clamp(u_nom + Δu, u_min, u_max)
//! ```

use crate::error::{ControlError, ControlResult};
use crate::nominal::NominalCondition;
use crate::params::LeadLagParams;
use crate::range::Range;
use ff_core::{Real, Tolerances, nearly_zero};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// When the zero lag time constant guard runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroLagCheck {
    /// Only when a correction is computed. In-band samples never fail.
    #[default]
    OnCorrection,
    /// Before the band check on every evaluation.
    EveryCall,
}

/// Which branch produced an output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompensationMode {
    /// Disturbance was in band; the command passed through and the anchor moved.
    PassThrough,
    /// Disturbance was out of band; a correction was applied.
    Corrected {
        /// Output before clamping.
        raw: Real,
        /// Whether the output limits changed the value.
        saturated: bool,
    },
}

/// Result of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compensation {
    /// Command to apply.
    pub output: Real,
    pub mode: CompensationMode,
}

/// Lead-lag feedforward compensator.
///
/// Parameters start at zero and must be set before the first out-of-band
/// sample, otherwise evaluation fails with [`ControlError::InvalidConfiguration`].
#[derive(Debug, Clone, PartialEq)]
pub struct LeadLagCompensator {
    acceptable_disturbance: Range,
    output_limit: Range,
    params: LeadLagParams,
    nominal: NominalCondition,
    zero_lag_check: ZeroLagCheck,
    tol: Tolerances,
}

impl LeadLagCompensator {
    /// Create a compensator anchored at time zero.
    ///
    /// # Arguments
    ///
    /// * `acceptable_disturbance` - Band inside which no correction is applied (any order)
    /// * `output_limit` - Clamp for the corrected command (any order)
    /// * `current_disturbance` - Disturbance reading used for the initial anchor
    /// * `current_manipulated_variable` - Command used for the initial anchor
    pub fn new(
        acceptable_disturbance: impl Into<Range>,
        output_limit: impl Into<Range>,
        current_disturbance: Real,
        current_manipulated_variable: Real,
    ) -> Self {
        Self {
            acceptable_disturbance: acceptable_disturbance.into(),
            output_limit: output_limit.into(),
            params: LeadLagParams::default(),
            nominal: NominalCondition::initial(current_disturbance, current_manipulated_variable),
            zero_lag_check: ZeroLagCheck::default(),
            tol: Tolerances::default(),
        }
    }

    /// Set initial parameters.
    pub fn with_params(mut self, params: impl Into<LeadLagParams>) -> Self {
        self.params = params.into();
        self
    }

    /// Choose when the zero lag guard runs.
    pub fn with_zero_lag_check(mut self, check: ZeroLagCheck) -> Self {
        self.zero_lag_check = check;
        self
    }

    /// Tolerances for the zero lag guard and band boundaries.
    pub fn with_tolerances(mut self, tol: Tolerances) -> Self {
        self.tol = tol;
        self
    }

    pub fn params(&self) -> LeadLagParams {
        self.params
    }

    /// Replace the whole parameter set. Takes effect on the next evaluation.
    pub fn set_params(&mut self, params: impl Into<LeadLagParams>) {
        let params = params.into();
        debug!(
            gain = params.gain,
            lead = params.lead_time_constant,
            lag = params.lag_time_constant,
            "lead-lag parameters replaced"
        );
        self.params = params;
    }

    pub fn acceptable_disturbance_range(&self) -> Range {
        self.acceptable_disturbance
    }

    pub fn set_acceptable_disturbance_range(&mut self, range: impl Into<Range>) {
        self.acceptable_disturbance = range.into();
    }

    pub fn output_limit_range(&self) -> Range {
        self.output_limit
    }

    pub fn set_output_limit_range(&mut self, range: impl Into<Range>) {
        self.output_limit = range.into();
    }

    pub fn nominal_condition(&self) -> NominalCondition {
        self.nominal
    }

    pub fn zero_lag_check(&self) -> ZeroLagCheck {
        self.zero_lag_check
    }

    pub fn tolerances(&self) -> Tolerances {
        self.tol
    }

    /// Overwrite the nominal condition as if an in-band sample had arrived.
    pub fn reanchor(&mut self, t: Real, disturbance: Real, manipulated_variable: Real) {
        self.nominal = NominalCondition::new(t, disturbance, manipulated_variable);
        trace!(t, d = disturbance, u = manipulated_variable, "nominal condition re-anchored");
    }

    /// Feedforward-adjusted command for this tick.
    ///
    /// # Arguments
    ///
    /// * `manipulated_variable` - Command computed by the feedback controller
    /// * `disturbance` - Measured disturbance
    /// * `current_time` - Time of the sample
    ///
    /// # Errors
    ///
    /// Returns [`ControlError::InvalidConfiguration`] when the lag time constant
    /// is approximately zero and the guard applies to this call.
    pub fn evaluate(
        &mut self,
        manipulated_variable: Real,
        disturbance: Real,
        current_time: Real,
    ) -> ControlResult<Real> {
        self.step(manipulated_variable, disturbance, current_time)
            .map(|c| c.output)
    }

    /// Like [`evaluate`](Self::evaluate) but reports which branch was taken.
    pub fn step(
        &mut self,
        manipulated_variable: Real,
        disturbance: Real,
        current_time: Real,
    ) -> ControlResult<Compensation> {
        if self.zero_lag_check == ZeroLagCheck::EveryCall {
            self.check_lag()?;
        }

        if self
            .acceptable_disturbance
            .contains_open(disturbance, self.tol)
        {
            self.reanchor(current_time, disturbance, manipulated_variable);
            return Ok(Compensation {
                output: manipulated_variable,
                mode: CompensationMode::PassThrough,
            });
        }

        self.preview(disturbance, current_time)
    }

    /// Correction against the current anchor, without touching any state.
    ///
    /// Always takes the out-of-band branch regardless of `disturbance`.
    pub fn preview(&self, disturbance: Real, current_time: Real) -> ControlResult<Compensation> {
        self.check_lag()?;

        let nominal = self.nominal;
        let delta_d = disturbance - nominal.d;
        let delta_t = current_time - nominal.t;
        if delta_t < 0.0 {
            debug!(
                t = current_time,
                anchor_t = nominal.t,
                "time moved backwards relative to nominal condition"
            );
        }

        // No step, no correction, even when exp(-Δt / lag) overflows for Δt << 0.
        let step = self.params.gain * delta_d;
        let delta_u = if step == 0.0 {
            0.0
        } else {
            step * (1.0 + self.params.lead_lag_factor(delta_t))
        };
        let raw = nominal.u + delta_u;
        let output = self.output_limit.clamp(raw);
        let saturated = !raw.is_nan() && output != raw;
        if saturated {
            debug!(raw, output, "feedforward output saturated");
        }

        Ok(Compensation {
            output,
            mode: CompensationMode::Corrected { raw, saturated },
        })
    }

    fn check_lag(&self) -> ControlResult<()> {
        if nearly_zero(self.params.lag_time_constant, self.tol) {
            return Err(ControlError::InvalidConfiguration {
                what: "lag time constant must not be zero",
            });
        }
        Ok(())
    }
}
