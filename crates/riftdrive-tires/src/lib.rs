//! Tire force model.
//!
//! Slip ratio and slip angle are measured in the wheel frame, blended into a
//! single combined-slip scalar, and mapped to a friction-bounded force whose
//! magnitude is `normal force × μ`. Temperature nudges μ through a fixed
//! out-of-window penalty.

mod config;
mod slip;
mod force;
mod thermal;

pub use config::TireConfig;
pub use slip::{slip_ratio, slip_angle, combined_slip};
pub use force::{TireInput, TireOutput, compute_wheel_force, friction_coefficient, TEMPERATURE_PENALTY, SLIP_SIGN_DEADBAND};
pub use thermal::update_temperature;
