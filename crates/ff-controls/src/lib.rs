//! Feedforward disturbance compensation for control loops.
//!
//! This crate provides a first-order lead-lag feedforward compensator that sits
//! next to a feedback controller. Each control tick the owning loop hands it the
//! feedback-computed manipulated variable, the measured disturbance and the
//! current time, and applies whatever the compensator returns.
//!
//! # Behavior
//!
//! - While the disturbance stays strictly inside the acceptable band the command
//!   passes through unchanged and the compensator re-anchors its nominal
//!   condition to the current sample.
//! - Outside the band a lead-lag correction relative to the last nominal
//!   condition is added and the result is clamped to the output limits.
//!
//! # Example
//!
//! ```
//! use ff_controls::{LeadLagCompensator, LeadLagParams};
//!
//! let mut ff = LeadLagCompensator::new((-1.0, 1.0), (0.0, 100.0), 0.0, 50.0);
//! ff.set_params(LeadLagParams::new(2.0, 1.0, 2.0));
//!
//! assert_eq!(ff.evaluate(50.0, 0.5, 0.0).unwrap(), 50.0);
//! let u = ff.evaluate(50.0, 5.0, 1.0).unwrap();
//! assert!((u - 56.27).abs() < 0.01);
//! ```

pub mod error;
pub mod lead_lag;
pub mod nominal;
pub mod params;
pub mod range;
pub mod shared;

pub use error::{ControlError, ControlResult};
pub use lead_lag::{Compensation, CompensationMode, LeadLagCompensator, ZeroLagCheck};
pub use nominal::NominalCondition;
pub use params::LeadLagParams;
pub use range::Range;
pub use shared::SharedCompensator;
