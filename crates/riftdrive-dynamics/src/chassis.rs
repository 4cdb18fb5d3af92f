use riftdrive_core::{Isometry, Quat, Scalar, Vec3, Velocity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum DynamicsError {
    #[error("mass must be finite and > 0, got {0}")]
    InvalidMass(Scalar),
    #[error("inertia components must be finite and > 0, got [{0}, {1}, {2}]")]
    InvalidInertia(Scalar, Scalar, Scalar),
}

/// Mass properties of the chassis. Inertia is the diagonal of the local tensor.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChassisParams {
    pub mass: Scalar,
    pub inertia: Vec3,
    /// Center of mass in chassis space.
    pub com_offset: Vec3,
}

impl ChassisParams {
    pub fn validate(&self) -> Result<(), DynamicsError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(DynamicsError::InvalidMass(self.mass));
        }
        let i = self.inertia;
        if !(i.is_finite() && i.min_element() > 0.0) {
            return Err(DynamicsError::InvalidInertia(i.x, i.y, i.z));
        }
        Ok(())
    }
}

/// 6-DOF chassis state plus the per-tick force/torque accumulators.
///
/// Accumulators are filled by the force stages, read once by
/// [`ChassisBody::integrate`] and cleared there.
#[derive(Clone, Debug)]
pub struct ChassisBody {
    params: ChassisParams,
    inv_mass: Scalar,
    inv_inertia: Vec3,

    pub pose: Isometry,
    pub vel: Velocity,
    /// Linear acceleration of the last integration step (world).
    pub accel: Vec3,
    /// Angular acceleration of the last integration step (world).
    pub ang_accel: Vec3,

    force: Vec3,
    torque: Vec3,
}

impl ChassisBody {
    pub fn new(params: ChassisParams, pose: Isometry) -> Result<Self, DynamicsError> {
        params.validate()?;
        Ok(Self {
            params,
            inv_mass: 1.0 / params.mass,
            inv_inertia: params.inertia.recip(),
            pose,
            vel: Velocity::default(),
            accel: Vec3::ZERO,
            ang_accel: Vec3::ZERO,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
        })
    }

    #[inline] pub fn params(&self) -> &ChassisParams { &self.params }
    #[inline] pub fn mass(&self) -> Scalar { self.params.mass }
    #[inline] pub fn force(&self) -> Vec3 { self.force }
    #[inline] pub fn torque(&self) -> Vec3 { self.torque }

    /// World-space center of mass.
    #[inline]
    pub fn com_world(&self) -> Vec3 { self.pose.transform_point(self.params.com_offset) }

    /// Zero the accumulators. Called at the start of every tick.
    pub fn clear_accumulators(&mut self) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
    }

    #[inline] pub fn add_force(&mut self, f: Vec3) { self.force += f; }
    #[inline] pub fn add_torque(&mut self, t: Vec3) { self.torque += t; }

    /// Force applied at a world point; adds the moment about the COM.
    pub fn add_force_at_point(&mut self, f: Vec3, p_world: Vec3) {
        self.force += f;
        self.torque += (p_world - self.com_world()).cross(f);
    }

    /// Drop all motion and accumulated loads, keep the pose.
    pub fn stop(&mut self) {
        self.vel = Velocity::default();
        self.accel = Vec3::ZERO;
        self.ang_accel = Vec3::ZERO;
        self.clear_accumulators();
    }

    /// One explicit Euler step. Consumes and clears the accumulators.
    ///
    /// Orientation uses a small-angle quaternion built from `ω·dt`; large
    /// `ω·dt` products drift, which is accepted.
    pub fn integrate(&mut self, dt: Scalar) {
        self.accel = self.force * self.inv_mass;
        self.vel.lin += self.accel * dt;

        // Inertia is diagonal in chassis space.
        let rot = self.pose.rot;
        let torque_local = rot.inverse() * self.torque;
        self.ang_accel = rot * (torque_local * self.inv_inertia);
        self.vel.ang += self.ang_accel * dt;

        self.pose.pos += self.vel.lin * dt;
        self.apply_orientation_delta(self.vel.ang * dt);

        self.clear_accumulators();
    }

    fn apply_orientation_delta(&mut self, dtheta_world: Vec3) {
        if dtheta_world.length_squared() <= 0.0 { return; }
        let dq = Quat::from_xyzw(dtheta_world.x * 0.5, dtheta_world.y * 0.5, dtheta_world.z * 0.5, 1.0).normalize();
        self.pose.rot = (dq * self.pose.rot).normalize();
    }

    pub fn is_finite(&self) -> bool {
        self.pose.pos.is_finite() && self.pose.rot.is_finite() && self.vel.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use riftdrive_core::vec3;

    fn body() -> ChassisBody {
        let p = ChassisParams { mass: 1000.0, inertia: vec3(500.0, 1000.0, 250.0), com_offset: Vec3::ZERO };
        ChassisBody::new(p, Isometry::default()).unwrap()
    }

    #[test]
    fn rejects_bad_mass_and_inertia() {
        let mut p = ChassisParams { mass: 0.0, inertia: Vec3::ONE, com_offset: Vec3::ZERO };
        assert_eq!(p.validate(), Err(DynamicsError::InvalidMass(0.0)));
        p.mass = -3.0;
        assert!(p.validate().is_err());
        p.mass = 10.0;
        p.inertia = vec3(1.0, 0.0, 1.0);
        assert!(matches!(p.validate(), Err(DynamicsError::InvalidInertia(..))));
        p.inertia = vec3(1.0, f32::NAN, 1.0);
        assert!(p.validate().is_err());
    }

    #[test]
    fn no_force_keeps_velocity() {
        let mut b = body();
        b.vel.lin = vec3(3.0, 0.0, 20.0);
        for _ in 0..1000 {
            b.clear_accumulators();
            b.integrate(1.0 / 60.0);
        }
        assert_eq!(b.vel.lin, vec3(3.0, 0.0, 20.0));
        assert_relative_eq!(b.pose.pos.z, 20.0 * 1000.0 / 60.0, max_relative = 1e-4);
    }

    #[test]
    fn force_over_mass() {
        let mut b = body();
        b.add_force(vec3(0.0, 0.0, 2000.0));
        b.integrate(0.5);
        assert_relative_eq!(b.accel.z, 2.0);
        assert_relative_eq!(b.vel.lin.z, 1.0);
        assert_relative_eq!(b.pose.pos.z, 0.5);
        assert_eq!(b.force(), Vec3::ZERO);
        assert_eq!(b.torque(), Vec3::ZERO);
    }

    #[test]
    fn torque_divides_componentwise() {
        let mut b = body();
        b.add_torque(vec3(500.0, 1000.0, 500.0));
        b.integrate(1.0);
        assert_relative_eq!(b.vel.ang.x, 1.0);
        assert_relative_eq!(b.vel.ang.y, 1.0);
        assert_relative_eq!(b.vel.ang.z, 2.0);
    }

    #[test]
    fn off_center_force_produces_yaw() {
        let mut b = body();
        // Push forward on the +X side: yaws toward -Y.
        b.add_force_at_point(vec3(0.0, 0.0, 100.0), vec3(1.0, 0.0, 0.0));
        assert_relative_eq!(b.torque().y, -100.0);
    }

    #[test]
    fn small_yaw_rotates_forward_axis() {
        let mut b = body();
        b.vel.ang = vec3(0.0, 0.1, 0.0);
        b.integrate(0.1);
        let f = b.pose.forward();
        assert!(f.x > 0.0);
        assert_relative_eq!(f.length(), 1.0, epsilon = 1e-6);
    }
}
