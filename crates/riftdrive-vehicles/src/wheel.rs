//! Per-wheel simulation state.

use riftdrive_core::{Scalar, Vec3, WheelIndex};
use riftdrive_tires::TireInput;

use crate::{WheelConfig, WheelContact};

/// Runtime state of one wheel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WheelState {
    /// Slot on the chassis.
    pub index: WheelIndex,
    /// Geometry and mass.
    pub config: WheelConfig,
    /// Spin angle (rad), kept in [0, 2π).
    pub rotation: Scalar,
    /// Spin rate (rad/s); positive rolls the car toward chassis +Z.
    pub angular_velocity: Scalar,
    /// Road-wheel angle about chassis +Y (rad). Always 0 on the rear axle.
    pub steering_angle: Scalar,
    /// Ground contact for the current tick; `None` while airborne.
    pub contact: Option<WheelContact>,
    /// Drive torque after traction control (N·m).
    pub drive_torque: Scalar,
    /// Brake torque after ESC and ABS (N·m).
    pub brake_torque: Scalar,
    /// Longitudinal slip; 0 when airborne or below the slip speed.
    pub slip_ratio: Scalar,
    /// Lateral slip angle (rad); 0 when airborne or below the slip speed.
    pub slip_angle: Scalar,
    /// Blended slip used for the grip lookup.
    pub combined_slip: Scalar,
    /// Tread temperature (°C).
    pub temperature: Scalar,
    /// Tire force applied to the chassis this tick (world).
    pub force: Vec3,
}

impl WheelState {
    /// Wheel at rest at the given temperature.
    pub fn new(index: WheelIndex, config: WheelConfig, temperature: Scalar) -> Self {
        Self {
            index,
            config,
            rotation: 0.0,
            angular_velocity: 0.0,
            steering_angle: 0.0,
            contact: None,
            drive_torque: 0.0,
            brake_torque: 0.0,
            slip_ratio: 0.0,
            slip_angle: 0.0,
            combined_slip: 0.0,
            temperature,
            force: Vec3::ZERO,
        }
    }

    /// Rolling radius (m).
    #[inline] pub fn radius(&self) -> Scalar { self.config.radius }
    /// Spin inertia (kg·m²).
    #[inline] pub fn inertia(&self) -> Scalar { self.config.inertia() }
    /// In contact with the ground this tick.
    #[inline] pub fn is_grounded(&self) -> bool { self.contact.is_some() }
    /// Tread surface speed, ω·r (m/s).
    #[inline] pub fn surface_speed(&self) -> Scalar { self.angular_velocity * self.config.radius }

    pub(crate) fn tire_input(&self) -> TireInput {
        TireInput {
            angular_velocity: self.angular_velocity,
            radius: self.config.radius,
            steering_angle: self.steering_angle,
            temperature: self.temperature,
            normal_force: self.contact.map(|c| c.normal_force),
            free_rolling: self.is_free_rolling(),
        }
    }

    /// Grounded with neither drive nor brake torque.
    #[inline]
    pub fn is_free_rolling(&self) -> bool {
        self.contact.is_some() && self.drive_torque == 0.0 && self.brake_torque == 0.0
    }

    /// Back to rest; keeps geometry and contact.
    pub(crate) fn reset(&mut self, temperature: Scalar) {
        let contact = self.contact;
        *self = Self::new(self.index, self.config, temperature);
        self.contact = contact;
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.rotation.is_finite()
            && self.angular_velocity.is_finite()
            && self.steering_angle.is_finite()
            && self.temperature.is_finite()
            && self.force.is_finite()
    }
}
