//! Serialized compensator setup.

use crate::ConfigResult;
use crate::validate::{checked_tolerances, validate_config};
use ff_controls::{LeadLagCompensator, LeadLagParams, Range, ZeroLagCheck};
use ff_core::Tolerances;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensatorConfig {
    /// Disturbance band with no correction, bounds in any order.
    pub acceptable_disturbance_range: Range,
    /// Output clamp, bounds in any order.
    pub output_limit_range: Range,
    pub initial: InitialConditionDef,
    /// Absent means zeros; the compensator then fails on the first correction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<LeadLagParams>,
    #[serde(default)]
    pub zero_lag_check: ZeroLagCheck,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tolerances: Option<Tolerances>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialConditionDef {
    pub disturbance: f64,
    pub manipulated_variable: f64,
}

impl CompensatorConfig {
    /// Validate, then construct the compensator this config describes.
    pub fn build(&self) -> ConfigResult<LeadLagCompensator> {
        validate_config(self)?;
        let mut compensator = LeadLagCompensator::new(
            self.acceptable_disturbance_range,
            self.output_limit_range,
            self.initial.disturbance,
            self.initial.manipulated_variable,
        )
        .with_zero_lag_check(self.zero_lag_check)
        .with_tolerances(checked_tolerances(self)?);

        if let Some(params) = self.parameters {
            compensator = compensator.with_params(params);
        }
        Ok(compensator)
    }
}
