//! Immutable vehicle description.
//!
//! A [`VehicleConfig`] is built once and handed to
//! [`crate::VehicleDynamics::new`]. Changing it at runtime means building a
//! new value and calling [`crate::VehicleDynamics::reconfigure`].

use riftdrive_aero::AeroConfig;
use riftdrive_controllers::AssistConfig;
use riftdrive_core::{vec3, Scalar, Vec3, WheelIndex};
use riftdrive_dynamics::ChassisParams;
use riftdrive_tires::TireConfig;
use serde::{Deserialize, Serialize};

use crate::VehicleError;

/// Chassis mass properties and wheel mounting points.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChassisConfig {
    /// Mass (kg), > 0.
    pub mass: Scalar,
    /// Bounding box (width, height, length) in meters.
    pub dimensions: Vec3,
    /// Center of mass relative to the chassis origin, chassis space.
    pub com_offset: Vec3,
    /// Diagonal of the inertia tensor (kg·m²), each > 0.
    pub inertia: Vec3,
    /// Wheel hub positions in chassis space, indexed by [`WheelIndex`].
    pub wheel_offsets: [Vec3; 4],
}

impl ChassisConfig {
    /// Solid box inertia diagonal for `mass` and full `dimensions` (x, y, z).
    pub fn box_inertia(mass: Scalar, dimensions: Vec3) -> Vec3 {
        let d2 = dimensions * dimensions;
        vec3(
            (1.0 / 12.0) * mass * (d2.y + d2.z),
            (1.0 / 12.0) * mass * (d2.x + d2.z),
            (1.0 / 12.0) * mass * (d2.x + d2.y),
        )
    }

    /// Longitudinal distance between the front and rear axle midpoints.
    pub fn wheelbase(&self) -> Scalar {
        let o = &self.wheel_offsets;
        let front = 0.5 * (o[WheelIndex::FrontLeft.idx()].z + o[WheelIndex::FrontRight.idx()].z);
        let rear = 0.5 * (o[WheelIndex::RearLeft.idx()].z + o[WheelIndex::RearRight.idx()].z);
        (front - rear).abs()
    }

    pub(crate) fn params(&self) -> ChassisParams {
        ChassisParams { mass: self.mass, inertia: self.inertia, com_offset: self.com_offset }
    }
}

impl Default for ChassisConfig {
    fn default() -> Self {
        let mass = 1350.0;
        let dimensions = vec3(1.8, 1.3, 4.4);
        let (track, y, front, rear) = (0.8, -0.3, 1.35, -1.25);
        Self {
            mass,
            dimensions,
            com_offset: Vec3::ZERO,
            inertia: Self::box_inertia(mass, dimensions),
            wheel_offsets: [
                vec3(track, y, front),
                vec3(-track, y, front),
                vec3(track, y, rear),
                vec3(-track, y, rear),
            ],
        }
    }
}

/// Geometry and mass of one wheel.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Rolling radius (m), > 0.
    pub radius: Scalar,
    /// Tread width (m).
    pub width: Scalar,
    /// Mass (kg), > 0.
    pub mass: Scalar,
}

impl WheelConfig {
    /// Spin inertia, solid cylinder: ½·m·r².
    #[inline]
    pub fn inertia(&self) -> Scalar { 0.5 * self.mass * self.radius * self.radius }
}

impl Default for WheelConfig {
    fn default() -> Self { Self { radius: 0.33, width: 0.225, mass: 18.0 } }
}

/// Which wheels receive engine torque.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum DrivetrainLayout {
    /// Front axle only.
    FrontWheelDrive,
    /// Rear axle only.
    RearWheelDrive,
    /// All four wheels.
    AllWheelDrive,
}

impl DrivetrainLayout {
    /// Driven flag per [`WheelIndex`].
    pub fn driven_mask(self) -> [bool; 4] {
        match self {
            DrivetrainLayout::FrontWheelDrive => [true, true, false, false],
            DrivetrainLayout::RearWheelDrive => [false, false, true, true],
            DrivetrainLayout::AllWheelDrive => [true; 4],
        }
    }

    /// Number of driven wheels.
    pub fn driven_count(self) -> usize { self.driven_mask().iter().filter(|&&d| d).count() }
}

/// Engine torque delivery.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrivetrainConfig {
    /// Driven axle(s).
    pub layout: DrivetrainLayout,
    /// Total wheel torque at full throttle (N·m), split evenly over driven wheels.
    pub max_drive_torque: Scalar,
}

impl Default for DrivetrainConfig {
    fn default() -> Self { Self { layout: DrivetrainLayout::RearWheelDrive, max_drive_torque: 1600.0 } }
}

/// Steering rack behavior.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Road-wheel angle at full lock (rad).
    pub max_angle: Scalar,
    /// Rate toward the requested angle (rad/s).
    pub steer_speed: Scalar,
    /// Rate back to center with no steering input (rad/s).
    pub return_speed: Scalar,
    /// Inner wheel turns δ·(1+k), outer δ·(1−k).
    pub ackermann: Scalar,
}

impl Default for SteeringConfig {
    fn default() -> Self { Self { max_angle: 0.6, steer_speed: 2.5, return_speed: 3.0, ackermann: 0.1 } }
}

/// Service brake.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrakeConfig {
    /// Total brake torque over all four wheels (N·m).
    pub max_brake_torque: Scalar,
    /// Fraction of brake torque on the front axle, [0, 1].
    pub front_bias: Scalar,
}

impl Default for BrakeConfig {
    fn default() -> Self { Self { max_brake_torque: 6000.0, front_bias: 0.6 } }
}

/// Full description of one vehicle.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    /// Chassis body.
    pub chassis: ChassisConfig,
    /// Per-wheel geometry, indexed by [`WheelIndex`].
    pub wheels: [WheelConfig; 4],
    /// Tire model parameters shared by all wheels.
    pub tire: TireConfig,
    /// Aerodynamic coefficients.
    pub aero: AeroConfig,
    /// Engine torque delivery.
    pub drivetrain: DrivetrainConfig,
    /// Steering rack.
    pub steering: SteeringConfig,
    /// Service brake.
    pub brakes: BrakeConfig,
    /// TCS / ESC / ABS tuning.
    pub assists: AssistConfig,
}

fn invalid(field: &'static str, reason: impl Into<String>) -> VehicleError {
    VehicleError::InvalidConfig { field, reason: reason.into() }
}

fn positive(field: &'static str, v: Scalar) -> Result<(), VehicleError> {
    if v.is_finite() && v > 0.0 { Ok(()) } else { Err(invalid(field, format!("must be finite and > 0, got {v}"))) }
}

fn non_negative(field: &'static str, v: Scalar) -> Result<(), VehicleError> {
    if v.is_finite() && v >= 0.0 { Ok(()) } else { Err(invalid(field, format!("must be finite and >= 0, got {v}"))) }
}

fn unit(field: &'static str, v: Scalar) -> Result<(), VehicleError> {
    if (0.0..=1.0).contains(&v) { Ok(()) } else { Err(invalid(field, format!("must be in [0, 1], got {v}"))) }
}

impl VehicleConfig {
    /// Reject values that would turn into NaN/∞ during a tick.
    pub fn validate(&self) -> Result<(), VehicleError> {
        self.chassis.params().validate()?;
        if !self.chassis.com_offset.is_finite() {
            return Err(invalid("chassis.com_offset", "must be finite"));
        }
        if self.chassis.wheel_offsets.iter().any(|o| !o.is_finite()) {
            return Err(invalid("chassis.wheel_offsets", "must be finite"));
        }
        positive("chassis.wheelbase", self.chassis.wheelbase())?;

        for w in &self.wheels {
            positive("wheels.radius", w.radius)?;
            positive("wheels.mass", w.mass)?;
            non_negative("wheels.width", w.width)?;
        }

        let t = &self.tire;
        non_negative("tire.static_friction", t.static_friction)?;
        non_negative("tire.dynamic_friction", t.dynamic_friction)?;
        non_negative("tire.rolling_friction", t.rolling_friction)?;
        non_negative("tire.peak_slip_ratio", t.peak_slip_ratio)?;
        non_negative("tire.optimal_longitudinal_slip", t.optimal_longitudinal_slip)?;
        non_negative("tire.optimal_lateral_slip", t.optimal_lateral_slip)?;
        positive("tire.blend_exponent", t.blend_exponent)?;
        non_negative("tire.temperature_tolerance", t.temperature_tolerance)?;
        non_negative("tire.heat_rate", t.heat_rate)?;
        non_negative("tire.cool_rate", t.cool_rate)?;
        if !(t.optimal_temperature.is_finite() && t.ambient_temperature.is_finite()) {
            return Err(invalid("tire.optimal_temperature", "temperatures must be finite"));
        }

        let a = &self.aero;
        for (f, v) in [
            ("aero.drag_coefficient", a.drag_coefficient),
            ("aero.downforce_coefficient", a.downforce_coefficient),
            ("aero.lift_coefficient", a.lift_coefficient),
            ("aero.side_coefficient", a.side_coefficient),
            ("aero.air_density", a.air_density),
        ] {
            non_negative(f, v)?;
        }
        unit("aero.front_downforce_share", a.front_downforce_share)?;
        if let Some(field) = a.isa.and_then(|isa| isa.invalid_field()) {
            return Err(invalid("aero.isa", format!("`{field}` must be finite and > 0")));
        }

        non_negative("drivetrain.max_drive_torque", self.drivetrain.max_drive_torque)?;
        non_negative("steering.max_angle", self.steering.max_angle)?;
        non_negative("steering.steer_speed", self.steering.steer_speed)?;
        non_negative("steering.return_speed", self.steering.return_speed)?;
        unit("steering.ackermann", self.steering.ackermann)?;
        // inner wheel at full lock must stay short of π/2
        if self.steering.max_angle * (1.0 + self.steering.ackermann) >= std::f32::consts::FRAC_PI_2 {
            return Err(invalid("steering.max_angle", "inner wheel angle at full lock must be below π/2"));
        }
        non_negative("brakes.max_brake_torque", self.brakes.max_brake_torque)?;
        unit("brakes.front_bias", self.brakes.front_bias)?;

        let s = &self.assists;
        unit("assists.tcs.max_intervention", s.tcs.max_intervention)?;
        non_negative("assists.tcs.sensitivity", s.tcs.sensitivity)?;
        non_negative("assists.esc.yaw_threshold", s.esc.yaw_threshold)?;
        non_negative("assists.esc.braking_intervention", s.esc.braking_intervention)?;
        positive("assists.abs.frequency_hz", s.abs.frequency_hz)?;
        non_negative("assists.abs.slip_threshold", s.abs.slip_threshold)?;
        Ok(())
    }
}
