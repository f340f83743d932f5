//! Setup-time validation.
//!
//! Rejects configurations that would make the compensator fail on its first
//! out-of-band sample.

use crate::schema::CompensatorConfig;
use ff_core::{CoreError, Tolerances, ensure_finite, nearly_zero};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Non-finite value: {field} = {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Invalid tolerances: {0}")]
    Tolerances(#[from] CoreError),
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    ensure_finite(value, field).map_err(|_| ValidationError::NonFinite { field, value })
}

/// Tolerances the compensator will use: the configured pair, checked, or the default.
pub fn checked_tolerances(config: &CompensatorConfig) -> Result<Tolerances, ValidationError> {
    match config.tolerances {
        Some(tol) => Ok(Tolerances::new(tol.abs, tol.rel)?),
        None => Ok(Tolerances::default()),
    }
}

pub fn validate_config(config: &CompensatorConfig) -> Result<(), ValidationError> {
    let (d_min, d_max) = config.acceptable_disturbance_range.as_tuple();
    finite("acceptable_disturbance_range.min", d_min)?;
    finite("acceptable_disturbance_range.max", d_max)?;

    let (u_min, u_max) = config.output_limit_range.as_tuple();
    finite("output_limit_range.min", u_min)?;
    finite("output_limit_range.max", u_max)?;

    finite("initial.disturbance", config.initial.disturbance)?;
    finite("initial.manipulated_variable", config.initial.manipulated_variable)?;

    let tol = checked_tolerances(config)?;

    if let Some(params) = config.parameters {
        finite("parameters.gain", params.gain)?;
        finite("parameters.lead_time_constant", params.lead_time_constant)?;
        let lag = finite("parameters.lag_time_constant", params.lag_time_constant)?;
        if nearly_zero(lag, tol) {
            return Err(ValidationError::InvalidValue {
                field: "parameters.lag_time_constant",
                value: lag,
                reason: "must not be zero",
            });
        }
    }

    Ok(())
}
