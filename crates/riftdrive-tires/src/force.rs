use glam::Quat;
use riftdrive_core::{Scalar, Vec3};
use crate::{TireConfig, slip_ratio, slip_angle, combined_slip};

/// Grip multiplier applied when the tire is outside its temperature window.
pub const TEMPERATURE_PENALTY: Scalar = 0.8;

/// Slip ratios this close to zero carry no sign; the tread matches the road.
pub const SLIP_SIGN_DEADBAND: Scalar = 1e-4;

/// Kinematic state of one wheel, as the tire model sees it.
#[derive(Copy, Clone, Debug)]
pub struct TireInput {
    pub angular_velocity: Scalar,
    pub radius: Scalar,
    /// Steering angle about chassis +Y (0 for rear wheels).
    pub steering_angle: Scalar,
    pub temperature: Scalar,
    /// Contact normal force (N); `None` while airborne.
    pub normal_force: Option<Scalar>,
    /// No drive or brake torque on the wheel. Only the lateral term acts.
    pub free_rolling: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TireOutput {
    /// World-space force at the contact patch.
    pub force: Vec3,
    pub slip_ratio: Scalar,
    pub slip_angle: Scalar,
    pub combined_slip: Scalar,
    pub friction: Scalar,
}

/// Static μ, dropped to the dynamic level past peak slip, times the
/// temperature penalty outside the window.
pub fn friction_coefficient(combined: Scalar, temperature: Scalar, cfg: &TireConfig) -> Scalar {
    let mut mu = cfg.static_friction;
    if mu <= 0.0 { return 0.0; }
    if combined > cfg.peak_slip_ratio {
        mu *= cfg.dynamic_friction / cfg.static_friction;
    }
    if (temperature - cfg.optimal_temperature).abs() > cfg.temperature_tolerance {
        mu *= TEMPERATURE_PENALTY;
    }
    mu
}

#[inline]
fn slip_sign(sr: Scalar) -> Scalar {
    if sr > SLIP_SIGN_DEADBAND { 1.0 } else if sr < -SLIP_SIGN_DEADBAND { -1.0 } else { 0.0 }
}

/// Force from one wheel. Airborne wheels report zero force and zero slip.
pub fn compute_wheel_force(wheel: &TireInput, chassis_vel: Vec3, chassis_rot: Quat, cfg: &TireConfig) -> TireOutput {
    let Some(normal) = wheel.normal_force else {
        return TireOutput::default();
    };

    let wheel_rot = chassis_rot * Quat::from_rotation_y(wheel.steering_angle);
    let heading = wheel_rot * Vec3::Z;
    let lateral = wheel_rot * Vec3::X;

    let speed = chassis_vel.length();
    let v_long = chassis_vel.dot(heading);
    let v_lat = chassis_vel.dot(lateral);

    let (sr, sa) = if speed < riftdrive_core::MIN_SLIP_SPEED {
        (0.0, 0.0)
    } else {
        (slip_ratio(wheel.angular_velocity * wheel.radius, v_long), slip_angle(v_long, v_lat, speed))
    };
    let combined = combined_slip(sr, sa, cfg.blend_exponent);
    let mu = friction_coefficient(combined, wheel.temperature, cfg);

    let mut out = TireOutput { force: Vec3::ZERO, slip_ratio: sr, slip_angle: sa, combined_slip: combined, friction: mu };
    if combined <= 0.0 || !combined.is_finite() {
        return out;
    }

    // Wheel frame: +Z rolling direction, +X lateral. Longitudinal push follows
    // the sign of the slip ratio (spin pushes forward, lock-up drags back).
    let long = if wheel.free_rolling { 0.0 } else { combined * slip_sign(sr) };
    let dir_local = Vec3::Z * long + Vec3::X * wheel.steering_angle.tan();
    let len2 = dir_local.length_squared();
    if len2 <= 1e-12 {
        return out;
    }
    let dir_world = wheel_rot * (dir_local / len2.sqrt());
    out.force = dir_world * (normal.max(0.0) * mu);
    out
}
