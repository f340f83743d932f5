//! Thread-safe handle around a single compensator.
//!
//! Every method locks once, so a read-modify-write of the nominal condition and
//! the read of the parameter set happen inside one critical section.

use crate::error::{ControlError, ControlResult};
use crate::lead_lag::{Compensation, LeadLagCompensator};
use crate::params::LeadLagParams;
use crate::range::Range;
use ff_core::Real;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle; clones share the same compensator.
#[derive(Debug, Clone)]
pub struct SharedCompensator {
    inner: Arc<Mutex<LeadLagCompensator>>,
}

impl SharedCompensator {
    pub fn new(compensator: LeadLagCompensator) -> Self {
        Self {
            inner: Arc::new(Mutex::new(compensator)),
        }
    }

    fn lock(&self) -> ControlResult<MutexGuard<'_, LeadLagCompensator>> {
        self.inner.lock().map_err(|e| ControlError::StateError {
            what: format!("compensator lock poisoned: {e}"),
        })
    }

    pub fn evaluate(
        &self,
        manipulated_variable: Real,
        disturbance: Real,
        current_time: Real,
    ) -> ControlResult<Real> {
        self.lock()?
            .evaluate(manipulated_variable, disturbance, current_time)
    }

    pub fn step(
        &self,
        manipulated_variable: Real,
        disturbance: Real,
        current_time: Real,
    ) -> ControlResult<Compensation> {
        self.lock()?
            .step(manipulated_variable, disturbance, current_time)
    }

    pub fn params(&self) -> ControlResult<LeadLagParams> {
        Ok(self.lock()?.params())
    }

    /// Replace the parameter set as a unit.
    pub fn set_params(&self, params: impl Into<LeadLagParams>) -> ControlResult<()> {
        self.lock()?.set_params(params);
        Ok(())
    }

    pub fn acceptable_disturbance_range(&self) -> ControlResult<Range> {
        Ok(self.lock()?.acceptable_disturbance_range())
    }

    pub fn set_acceptable_disturbance_range(&self, range: impl Into<Range>) -> ControlResult<()> {
        self.lock()?.set_acceptable_disturbance_range(range);
        Ok(())
    }

    /// Copy of the current compensator state.
    pub fn snapshot(&self) -> ControlResult<LeadLagCompensator> {
        Ok(self.lock()?.clone())
    }
}

impl From<LeadLagCompensator> for SharedCompensator {
    fn from(compensator: LeadLagCompensator) -> Self {
        Self::new(compensator)
    }
}
