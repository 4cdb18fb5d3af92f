use glam::{Vec3A, Mat3A, Quat};
use serde::{Deserialize, Serialize};
use crate::Scalar;

pub type Vec3 = Vec3A;
pub type Mat3 = Mat3A;

#[inline] pub fn vec3(x: Scalar, y: Scalar, z: Scalar) -> Vec3 { Vec3::new(x, y, z) }
#[inline] pub fn iso(pos: Vec3, rot: Quat) -> Isometry { Isometry { pos, rot } }
#[inline] pub fn quat_identity() -> Quat { Quat::IDENTITY }

/// World pose. Chassis-local axes: forward = +Z, lateral = +X, up = +Y.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Isometry { pub pos: Vec3, pub rot: Quat }

/// Rigid-body velocity in world space; `ang` is about the centre of mass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity { pub lin: Vec3, pub ang: Vec3 }

impl Default for Isometry {
    fn default() -> Self { Self { pos: Vec3::ZERO, rot: Quat::IDENTITY } }
}

impl Isometry {
    #[inline] pub fn forward(&self) -> Vec3 { self.rot * Vec3::Z }
    #[inline] pub fn lateral(&self) -> Vec3 { self.rot * Vec3::X }
    #[inline] pub fn up(&self) -> Vec3 { self.rot * Vec3::Y }

    /// Local point → world point.
    #[inline] pub fn transform_point(&self, p: Vec3) -> Vec3 { self.pos + self.rot * p }

    /// Yaw about world +Y, zero when facing +Z; positive turns +Z toward +X.
    #[inline]
    pub fn heading(&self) -> Scalar {
        let f = self.forward();
        f.x.atan2(f.z)
    }

    /// Same position and heading, pitch and roll removed.
    pub fn leveled(&self) -> Isometry {
        Isometry { pos: self.pos, rot: Quat::from_rotation_y(self.heading()) }
    }
}

impl Velocity {
    #[inline]
    pub fn is_finite(&self) -> bool { self.lin.is_finite() && self.ang.is_finite() }
}
