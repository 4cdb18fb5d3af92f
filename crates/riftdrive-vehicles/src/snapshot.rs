//! Plain-data copy of the simulated state, for save/load code living elsewhere.

use riftdrive_core::{Isometry, Scalar, Velocity};
use serde::{Deserialize, Serialize};

use crate::WheelContact;

/// Saved state of one wheel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelSnapshot {
    /// Spin angle.
    pub rotation: Scalar,
    /// Spin rate.
    pub angular_velocity: Scalar,
    /// Steering angle.
    pub steering_angle: Scalar,
    /// Ground contact.
    pub contact: Option<WheelContact>,
    /// Drive torque.
    pub drive_torque: Scalar,
    /// Brake torque.
    pub brake_torque: Scalar,
    /// Slip ratio.
    pub slip_ratio: Scalar,
    /// Slip angle.
    pub slip_angle: Scalar,
    /// Tread temperature.
    pub temperature: Scalar,
}

/// Saved state of a whole vehicle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleSnapshot {
    /// Tick counter.
    pub tick: u64,
    /// Chassis pose.
    pub pose: Isometry,
    /// Chassis velocity.
    pub velocity: Velocity,
    /// Rack angle before the Ackermann split.
    pub steer_angle: Scalar,
    /// Per-wheel state, indexed by [`riftdrive_core::WheelIndex`].
    pub wheels: [WheelSnapshot; 4],
    /// Yaw rate the stability control reads on the next tick.
    pub yaw_rate: Scalar,
    /// Lateral acceleration in g.
    pub lateral_g: Scalar,
    /// ABS control clock.
    pub abs_timer: Scalar,
    /// ABS per-wheel release latch.
    pub abs_released: [bool; 4],
    /// ABS control cycles run.
    pub abs_cycles: u64,
    /// ABS cycles that released a wheel.
    pub abs_fired: u64,
}
