use riftdrive_core::{Isometry, Scalar, Vec3, MIN_SLIP_SPEED};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use crate::Isa;

/// Aerodynamic coefficients. Each coefficient already folds in its
/// reference area, so force = q · coefficient.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AeroConfig {
    pub drag_coefficient: Scalar,
    pub downforce_coefficient: Scalar,
    pub lift_coefficient: Scalar,
    pub side_coefficient: Scalar,
    /// Share of downforce carried by the front axle, in [0, 1].
    pub front_downforce_share: Scalar,
    /// kg/m³, used when `isa` is `None`.
    pub air_density: Scalar,
    /// When set, density follows chassis altitude (world y).
    pub isa: Option<Isa>,
}

impl Default for AeroConfig {
    fn default() -> Self {
        Self {
            drag_coefficient: 0.32,
            downforce_coefficient: 0.3,
            lift_coefficient: 0.05,
            side_coefficient: 0.5,
            front_downforce_share: 0.45,
            air_density: 1.225,
            isa: None,
        }
    }
}

impl AeroConfig {
    /// Every coefficient zero: the body is aerodynamically inert.
    pub fn inert() -> Self {
        Self {
            drag_coefficient: 0.0,
            downforce_coefficient: 0.0,
            lift_coefficient: 0.0,
            side_coefficient: 0.0,
            ..Self::default()
        }
    }

    fn density_at(&self, altitude_m: Scalar) -> Scalar {
        match self.isa {
            Some(isa) => isa.density(altitude_m),
            None => self.air_density,
        }
    }
}

/// Aero loads for one tick, world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct AeroForces {
    pub drag: Vec3,
    pub downforce: Vec3,
    /// Downforce magnitude split per axle. Not fed back into tire loads;
    /// the contact provider owns normal forces.
    pub downforce_front: Scalar,
    pub downforce_rear: Scalar,
    pub lift: Vec3,
    pub side: Vec3,
    /// Angle between chassis forward and velocity, [0, π].
    pub yaw_angle: Scalar,
    /// Signed angle of velocity out of the forward/up plane toward +lateral.
    pub sideslip_angle: Scalar,
}

impl AeroForces {
    #[inline]
    pub fn total(&self) -> Vec3 { self.drag + self.downforce + self.lift + self.side }
}

#[inline]
pub fn dynamic_pressure(density: Scalar, speed: Scalar) -> Scalar { 0.5 * density * speed * speed }

/// Aero loads on the chassis. Zero below [`MIN_SLIP_SPEED`].
pub fn compute_aero_forces(vel: Vec3, pose: &Isometry, cfg: &AeroConfig) -> AeroForces {
    let speed = vel.length();
    if speed < MIN_SLIP_SPEED {
        return AeroForces::default();
    }
    let vhat = vel / speed;
    let q = dynamic_pressure(cfg.density_at(pose.pos.y), speed);

    let fwd = pose.forward();
    let lat = pose.lateral();
    let up = pose.up();

    let drag = -vhat * (q * cfg.drag_coefficient);

    let down_mag = q * cfg.downforce_coefficient;
    let share = cfg.front_downforce_share.clamp(0.0, 1.0);
    let downforce = -up * down_mag;

    // Dot products of unit vectors can land a ulp outside [-1, 1].
    let yaw_angle = vhat.dot(fwd).clamp(-1.0, 1.0).acos();
    let sideslip_angle = FRAC_PI_2 - vhat.dot(lat).clamp(-1.0, 1.0).acos();

    let lift = up * (q * cfg.lift_coefficient * yaw_angle.cos().abs());
    let side = -lat * (q * cfg.side_coefficient * sideslip_angle.sin());

    AeroForces {
        drag,
        downforce,
        downforce_front: down_mag * share,
        downforce_rear: down_mag * (1.0 - share),
        lift,
        side,
        yaw_angle,
        sideslip_angle,
    }
}
