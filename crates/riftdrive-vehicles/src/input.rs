//! Data fed in from outside every tick.

use riftdrive_core::{Scalar, Vec3};
use serde::{Deserialize, Serialize};

/// Driver controls, sampled once at the start of a tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverInput {
    /// Steering in [-1, 1]; positive steers toward chassis +X.
    pub steering: Scalar,
    /// Throttle pedal engaged.
    pub throttle: bool,
    /// Brake pedal engaged.
    pub brake: bool,
}

impl DriverInput {
    /// No pedals, wheel centered.
    pub const NEUTRAL: DriverInput = DriverInput { steering: 0.0, throttle: false, brake: false };

    /// Steering clamped to [-1, 1]; NaN reads as centered.
    pub fn sanitized(self) -> Self {
        let steering = if self.steering.is_nan() { 0.0 } else { self.steering.clamp(-1.0, 1.0) };
        Self { steering, ..self }
    }
}

/// Ground contact for one wheel, supplied by the collision layer.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelContact {
    /// Contact point in world space.
    pub point: Vec3,
    /// Normal force magnitude (N).
    pub normal_force: Scalar,
}
