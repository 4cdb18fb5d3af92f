//! Stand-in for the collision layer: an infinite flat plane.
//!
//! The core never applies normal forces or keeps the chassis on the road;
//! a physics engine does that. Headless runs and tests use this instead.

use riftdrive_core::{Scalar, Vec3, Velocity, STANDARD_GRAVITY};

use crate::{VehicleDynamics, WheelContact};

/// Horizontal ground at `height` (world Y).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FlatGround {
    /// World Y of the surface.
    pub height: Scalar,
}

impl FlatGround {
    /// Plane at `height`.
    pub fn new(height: Scalar) -> Self { Self { height } }

    /// Contacts under each hub, static weight split evenly over the wheels
    /// that touch. A hub higher than its radius above the plane is airborne.
    pub fn contacts(&self, v: &VehicleDynamics) -> [Option<WheelContact>; 4] {
        let poses = v.wheel_poses();
        let touching = poses
            .iter()
            .zip(v.wheels())
            .map(|(p, w)| p.position.y - w.radius() <= self.height + 1e-3)
            .collect::<Vec<_>>();
        let n = touching.iter().filter(|&&t| t).count().max(1) as Scalar;
        let load = v.config().chassis.mass * STANDARD_GRAVITY / n;

        let mut out = [None; 4];
        for (i, p) in poses.iter().enumerate() {
            if touching[i] {
                out[i] = Some(WheelContact { point: Vec3::new(p.position.x, self.height, p.position.z), normal_force: load });
            }
        }
        out
    }

    /// Hold the chassis level on the plane: keep only heading, ride height
    /// from the wheel geometry, no vertical motion, no pitch or roll rate.
    pub fn constrain(&self, v: &mut VehicleDynamics) {
        let mut pose = v.pose().leveled();
        pose.pos.y = self.height + self.ride_height(v);
        v.set_pose(pose);

        let vel = v.velocity();
        v.set_velocity(Velocity {
            lin: Vec3::new(vel.lin.x, 0.0, vel.lin.z),
            ang: Vec3::new(0.0, vel.ang.y, 0.0),
        });
    }

    /// Chassis origin height above the plane with every wheel touching.
    pub fn ride_height(&self, v: &VehicleDynamics) -> Scalar {
        let c = v.config();
        let sum: Scalar = c
            .chassis
            .wheel_offsets
            .iter()
            .zip(&c.wheels)
            .map(|(o, w)| w.radius - o.y)
            .sum();
        sum / 4.0
    }

    /// `constrain`, refresh contacts, then one tick.
    pub fn step(&self, v: &mut VehicleDynamics, dt: Scalar) -> Result<crate::TickOutput, crate::VehicleError> {
        self.constrain(v);
        let contacts = self.contacts(v);
        v.set_contacts(contacts);
        v.update(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VehicleConfig;
    use approx::assert_relative_eq;

    #[test]
    fn level_car_gets_four_equal_contacts() {
        let g = FlatGround::default();
        let mut v = VehicleDynamics::new(VehicleConfig::default()).unwrap();
        g.constrain(&mut v);
        assert_relative_eq!(v.pose().pos.y, 0.63, epsilon = 1e-5);
        let c = g.contacts(&v);
        for w in c {
            let w = w.unwrap();
            assert_relative_eq!(w.normal_force, 1350.0 * 9.81 / 4.0, epsilon = 1e-2);
            assert_eq!(w.point.y, 0.0);
        }
    }

    #[test]
    fn constrain_keeps_heading_only() {
        let g = FlatGround::default();
        let mut v = VehicleDynamics::new(VehicleConfig::default()).unwrap();
        let rot = riftdrive_core::Quat::from_rotation_y(0.7) * riftdrive_core::Quat::from_rotation_x(0.1);
        v.set_pose(riftdrive_core::iso(Vec3::new(3.0, 2.0, -1.0), rot));
        g.constrain(&mut v);
        assert_relative_eq!(v.pose().heading(), 0.7, epsilon = 1e-5);
        assert_relative_eq!(v.pose().up().y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(v.pose().pos.x, 3.0);
    }

    #[test]
    fn lifted_car_is_airborne() {
        let g = FlatGround::new(-5.0);
        let v = VehicleDynamics::new(VehicleConfig::default()).unwrap();
        assert!(g.contacts(&v).iter().all(|c| c.is_none()));
    }
}
