use riftdrive_core::Scalar;
use std::f32::consts::TAU;

/// Torques acting on one wheel's spin axis this tick (all N·m, magnitudes for the resistive ones).
#[derive(Copy, Clone, Debug, Default)]
pub struct SpinTorques {
    pub drive: Scalar,
    pub brake: Scalar,
    pub rolling: Scalar,
    /// Road reaction: |longitudinal tire force|·r. Pulls spin toward `road_omega`.
    pub traction: Scalar,
    /// Spin rate at which the tread matches the ground (v_long / r).
    pub road_omega: Scalar,
}

/// Wrap to [0, 2π).
#[inline]
pub fn wrap_angle(a: Scalar) -> Scalar {
    let w = a.rem_euclid(TAU);
    // rem_euclid can round up to TAU for tiny negative inputs
    if w >= TAU { 0.0 } else { w }
}

#[inline]
fn approach(from: Scalar, to: Scalar, max_step: Scalar) -> Scalar {
    let d = to - from;
    if d.abs() <= max_step { to } else { from + max_step.copysign(d) }
}

/// Advance wheel spin by `dt`. Returns `(omega, rotation)`.
///
/// Drive torque is applied first. Brake and rolling resistance then oppose
/// the resulting spin and at most bring it to rest; they never reverse it.
/// The road reaction finally pulls the spin toward `road_omega` without
/// overshooting it.
pub fn integrate_spin(omega: Scalar, rotation: Scalar, t: SpinTorques, inertia: Scalar, dt: Scalar) -> (Scalar, Scalar) {
    let mut w = omega + t.drive / inertia * dt;
    let resist = (t.brake.max(0.0) + t.rolling.max(0.0)) / inertia * dt;
    if w.abs() <= resist {
        w = 0.0;
    } else {
        w -= w.signum() * resist;
    }
    if t.traction > 0.0 {
        w = approach(w, t.road_omega, t.traction / inertia * dt);
    }
    (w, wrap_angle(rotation + w * dt))
}
