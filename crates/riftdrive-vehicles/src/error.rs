//! Error type for construction, reconfiguration and ticking.

use thiserror::Error;

/// Everything that can go wrong around a [`crate::VehicleDynamics`].
#[derive(Debug, Error, PartialEq)]
pub enum VehicleError {
    /// A configuration value is out of its legal range.
    #[error("invalid config `{field}`: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },

    /// `dt` was negative, NaN or infinite.
    #[error("invalid time step {0}")]
    InvalidTimeStep(f32),

    /// A NaN/∞ showed up in the simulated state.
    #[error("non-finite vehicle state: {what}")]
    NonFiniteState {
        /// Which part of the state went bad.
        what: &'static str,
    },

    /// A previous tick hit a non-finite state; call `reset_state` first.
    #[error("vehicle state is poisoned by an earlier non-finite tick; reset required")]
    Poisoned,
}

impl From<riftdrive_dynamics::DynamicsError> for VehicleError {
    fn from(e: riftdrive_dynamics::DynamicsError) -> Self {
        use riftdrive_dynamics::DynamicsError as D;
        let field = match e {
            D::InvalidMass(_) => "chassis.mass",
            D::InvalidInertia(..) => "chassis.inertia",
        };
        VehicleError::InvalidConfig { field, reason: e.to_string() }
    }
}
