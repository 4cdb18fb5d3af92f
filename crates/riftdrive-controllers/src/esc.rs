use riftdrive_core::{Scalar, WheelIndex};
use serde::{Deserialize, Serialize};
use crate::WheelCommand;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscConfig {
    pub enabled: bool,
    /// |yaw error| (rad/s) that triggers a correction.
    pub yaw_threshold: Scalar,
    /// Brake torque (N·m) per rad/s of yaw error.
    pub braking_intervention: Scalar,
}

impl Default for EscConfig {
    fn default() -> Self { Self { enabled: true, yaw_threshold: 0.1, braking_intervention: 600.0 } }
}

/// Quantities the yaw controller needs for one tick.
#[derive(Copy, Clone, Debug, Default)]
pub struct YawInputs {
    /// Signed forward speed (m/s).
    pub speed: Scalar,
    /// Mean front steering angle (rad).
    pub front_steering_angle: Scalar,
    pub wheelbase: Scalar,
    /// Yaw rate from the previous tick's telemetry.
    pub actual_yaw_rate: Scalar,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EscCorrection {
    pub wheel: WheelIndex,
    pub brake_torque: Scalar,
    pub yaw_error: Scalar,
}

/// Bicycle-model yaw rate.
#[inline]
pub fn target_yaw_rate(speed: Scalar, front_steering_angle: Scalar, wheelbase: Scalar) -> Scalar {
    if wheelbase <= 0.0 { return 0.0; }
    speed * front_steering_angle / wheelbase
}

/// Brakes one wheel to pull the measured yaw rate toward the bicycle model.
///
/// Positive error (yawing harder toward +X than asked) brakes the front
/// wheel on the -X side, the outer front in a positive-yaw turn. Negative
/// error brakes the rear wheel on the +X side, the inner rear.
#[derive(Copy, Clone, Debug)]
pub struct StabilityControl {
    pub params: EscConfig,
    pub active: bool,
    pub last: Option<EscCorrection>,
}

impl StabilityControl {
    pub fn new(params: EscConfig) -> Self { Self { params, active: false, last: None } }

    pub fn step(&mut self, wheels: &mut [WheelCommand; 4], y: YawInputs) -> Option<EscCorrection> {
        self.active = false;
        self.last = None;
        if !self.params.enabled { return None; }

        let target = target_yaw_rate(y.speed, y.front_steering_angle, y.wheelbase);
        let yaw_error = y.actual_yaw_rate - target;
        if yaw_error.abs() <= self.params.yaw_threshold {
            return None;
        }

        let wheel = if yaw_error > 0.0 { WheelIndex::FrontRight } else { WheelIndex::RearLeft };
        let brake_torque = yaw_error.abs() * self.params.braking_intervention;
        wheels[wheel.idx()].brake_torque += brake_torque;

        let c = EscCorrection { wheel, brake_torque, yaw_error };
        self.active = true;
        self.last = Some(c);
        Some(c)
    }

    pub fn reset(&mut self) {
        self.active = false;
        self.last = None;
    }
}
