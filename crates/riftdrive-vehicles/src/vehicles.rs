//! The per-tick pipeline.

use std::fmt;

use riftdrive_aero::{compute_aero_forces, AeroForces};
use riftdrive_controllers::{AssistFlags, AssistSuite, WheelCommand, YawInputs};
use riftdrive_core::{
    hash_bool, hash_isometry, hash_scalar, hash_u64, hash_velocity, schedule_digest, Isometry, Quat, Scalar, StepCtx,
    StepHasher, StepStage, Vec3, Velocity, WheelIndex, MIN_SLIP_SPEED, STANDARD_GRAVITY,
    TICK_SCHEDULE,
};
use riftdrive_dynamics::{integrate_spin, wrap_angle, ChassisBody, SpinTorques};
use riftdrive_tires::{compute_wheel_force, friction_coefficient, update_temperature};
use tracing::{debug, info, trace, warn};

use crate::telemetry::assist_transitions;
use crate::{
    DriverInput, Telemetry, TickOutput, VehicleConfig, VehicleError, VehicleEvent, VehicleObserver,
    VehicleSnapshot, WheelContact, WheelPose, WheelSlip, WheelSnapshot, WheelState,
};

/// One simulated vehicle: chassis, four wheels and the assist controllers.
///
/// Owns all of its state; several vehicles never share anything. Not
/// internally synchronized: hosts that feed input from another thread must
/// hand over a complete [`DriverInput`] before calling [`update`](Self::update).
pub struct VehicleDynamics {
    config: VehicleConfig,
    spawn: Isometry,
    chassis: ChassisBody,
    wheels: [WheelState; 4],
    driven: [bool; 4],
    steer_angle: Scalar,
    input: DriverInput,
    assists: AssistSuite,
    flags: AssistFlags,
    telemetry: Telemetry,
    aero: AeroForces,
    grounded: [bool; 4],
    tick: u64,
    poisoned: bool,
    observer: Option<Box<dyn VehicleObserver + Send>>,
}

impl fmt::Debug for VehicleDynamics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VehicleDynamics")
            .field("tick", &self.tick)
            .field("pose", &self.chassis.pose)
            .field("velocity", &self.chassis.vel)
            .field("telemetry", &self.telemetry)
            .field("poisoned", &self.poisoned)
            .finish_non_exhaustive()
    }
}

impl VehicleDynamics {
    /// Build a vehicle at the world origin.
    pub fn new(config: VehicleConfig) -> Result<Self, VehicleError> {
        Self::spawn_at(config, Isometry::default())
    }

    /// Build a vehicle at `pose`. [`reset_state`](Self::reset_state) returns here.
    pub fn spawn_at(config: VehicleConfig, pose: Isometry) -> Result<Self, VehicleError> {
        config.validate()?;
        let chassis = ChassisBody::new(config.chassis.params(), pose)?;
        let temp = config.tire.optimal_temperature;
        let wheels = WheelIndex::ALL.map(|w| WheelState::new(w, config.wheels[w.idx()], temp));
        info!(
            mass = config.chassis.mass,
            layout = ?config.drivetrain.layout,
            wheelbase = config.chassis.wheelbase(),
            "vehicle constructed"
        );
        Ok(Self {
            driven: config.drivetrain.layout.driven_mask(),
            assists: AssistSuite::new(config.assists),
            config,
            spawn: pose,
            chassis,
            wheels,
            steer_angle: 0.0,
            input: DriverInput::NEUTRAL,
            flags: AssistFlags::default(),
            telemetry: Telemetry::default(),
            aero: AeroForces::default(),
            grounded: [false; 4],
            tick: 0,
            poisoned: false,
            observer: None,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &VehicleConfig { &self.config }
    /// Chassis body (pose, velocity, last acceleration).
    pub fn chassis(&self) -> &ChassisBody { &self.chassis }
    /// Chassis pose.
    pub fn pose(&self) -> Isometry { self.chassis.pose }
    /// Chassis velocity.
    pub fn velocity(&self) -> Velocity { self.chassis.vel }
    /// All four wheels, indexed by [`WheelIndex`].
    pub fn wheels(&self) -> &[WheelState; 4] { &self.wheels }
    /// One wheel.
    pub fn wheel(&self, w: WheelIndex) -> &WheelState { &self.wheels[w.idx()] }
    /// Telemetry from the last completed tick.
    pub fn telemetry(&self) -> &Telemetry { &self.telemetry }
    /// Driver input used by the next tick.
    pub fn input(&self) -> DriverInput { self.input }
    /// Completed ticks since construction or the last reset.
    pub fn tick(&self) -> u64 { self.tick }
    /// A non-finite state was hit; only a reset clears this.
    pub fn is_poisoned(&self) -> bool { self.poisoned }

    /// Driver controls for the next tick.
    pub fn set_input(&mut self, input: DriverInput) { self.input = input; }

    /// Ground contacts for the next tick, indexed by [`WheelIndex`]. `None` is airborne.
    pub fn set_contacts(&mut self, contacts: [Option<WheelContact>; 4]) {
        for (w, c) in self.wheels.iter_mut().zip(contacts) {
            w.contact = c;
        }
    }

    /// Ground contact for a single wheel.
    pub fn set_contact(&mut self, wheel: WheelIndex, contact: Option<WheelContact>) {
        self.wheels[wheel.idx()].contact = contact;
    }

    /// Pose correction from the physics layer that owns collision response.
    pub fn set_pose(&mut self, pose: Isometry) { self.chassis.pose = pose; }

    /// Velocity correction from the physics layer.
    pub fn set_velocity(&mut self, vel: Velocity) { self.chassis.vel = vel; }

    /// Attach an observer; replaces any previous one.
    pub fn set_observer(&mut self, observer: Box<dyn VehicleObserver + Send>) {
        self.observer = Some(observer);
    }

    /// Detach the observer, handing it back.
    pub fn take_observer(&mut self) -> Option<Box<dyn VehicleObserver + Send>> { self.observer.take() }

    /// Advance the vehicle by `dt` seconds.
    ///
    /// `dt == 0` is accepted and leaves the motion unchanged. Negative or
    /// non-finite `dt` is rejected before anything is touched.
    pub fn update(&mut self, dt: Scalar) -> Result<TickOutput, VehicleError> {
        if self.poisoned {
            return Err(VehicleError::Poisoned);
        }
        if !dt.is_finite() || dt < 0.0 {
            return Err(VehicleError::InvalidTimeStep(dt));
        }
        if !self.chassis.is_finite() {
            return Err(self.poison("chassis state before tick"));
        }

        let ctx = StepCtx { dt, tick: self.tick + 1 };
        let input = self.input.sanitized();
        let prev_flags = self.telemetry.flags();
        let mut events = Vec::new();

        self.contact_transitions(&mut events);
        self.chassis.clear_accumulators();
        self.update_steering(input, dt);
        self.apply_driver_commands(input);

        for stage in TICK_SCHEDULE {
            match stage {
                StepStage::Aero => self.stage_aero(),
                StepStage::TireForces => self.stage_tire_forces(),
                StepStage::Assists => self.stage_assists(&ctx),
                StepStage::Integrate => self.stage_integrate(&ctx)?,
                StepStage::Telemetry => self.stage_telemetry(),
            }
        }

        assist_transitions(prev_flags, self.flags, &mut events);
        for e in &events {
            debug!(tick = ctx.tick, event = ?e, "vehicle event");
        }
        self.tick = ctx.tick;
        trace!(
            tick = self.tick,
            speed = self.telemetry.speed,
            yaw_rate = self.telemetry.yaw_rate,
            lateral_g = self.telemetry.lateral_g,
            "tick"
        );

        if let Some(obs) = self.observer.as_mut() {
            for e in &events {
                obs.on_event(ctx.tick, e);
            }
        }

        Ok(TickOutput {
            tick: self.tick,
            pose: self.chassis.pose,
            wheels: self.wheel_poses(),
            telemetry: self.telemetry,
            aero: self.aero,
            events,
        })
    }

    fn poison(&mut self, what: &'static str) -> VehicleError {
        self.poisoned = true;
        warn!(tick = self.tick, what, "non-finite vehicle state; further updates refused until reset");
        VehicleError::NonFiniteState { what }
    }

    fn contact_transitions(&mut self, out: &mut Vec<VehicleEvent>) {
        for w in &self.wheels {
            let now = w.is_grounded();
            let was = std::mem::replace(&mut self.grounded[w.index.idx()], now);
            match (was, now) {
                (false, true) => out.push(VehicleEvent::WheelTouchdown(w.index)),
                (true, false) => out.push(VehicleEvent::WheelAirborne(w.index)),
                _ => {}
            }
        }
    }

    fn update_steering(&mut self, input: DriverInput, dt: Scalar) {
        let s = self.config.steering;
        let target = input.steering * s.max_angle;
        let rate = if input.steering == 0.0 { s.return_speed } else { s.steer_speed };
        self.steer_angle = approach(self.steer_angle, target, rate * dt);

        // The inner wheel is on the side the rack points toward.
        let inner = self.steer_angle * (1.0 + s.ackermann);
        let outer = self.steer_angle * (1.0 - s.ackermann);
        let (left, right) = if self.steer_angle >= 0.0 { (inner, outer) } else { (outer, inner) };
        for w in self.wheels.iter_mut() {
            w.steering_angle = match w.index {
                WheelIndex::FrontLeft => left,
                WheelIndex::FrontRight => right,
                WheelIndex::RearLeft | WheelIndex::RearRight => 0.0,
            };
        }
    }

    fn apply_driver_commands(&mut self, input: DriverInput) {
        let d = self.config.drivetrain;
        let per_wheel = d.max_drive_torque / d.layout.driven_count().max(1) as Scalar;
        let b = self.config.brakes;
        for w in self.wheels.iter_mut() {
            w.drive_torque = if input.throttle && self.driven[w.index.idx()] { per_wheel } else { 0.0 };
            let share = if w.index.is_front() { b.front_bias } else { 1.0 - b.front_bias };
            w.brake_torque = if input.brake { 0.5 * b.max_brake_torque * share } else { 0.0 };
        }
    }

    fn stage_aero(&mut self) {
        self.aero = compute_aero_forces(self.chassis.vel.lin, &self.chassis.pose, &self.config.aero);
        self.chassis.add_force(self.aero.total());
    }

    fn stage_tire_forces(&mut self) {
        let vel = self.chassis.vel.lin;
        let rot = self.chassis.pose.rot;
        let speed = vel.length();
        let tire = self.config.tire;

        for w in self.wheels.iter_mut() {
            let out = compute_wheel_force(&w.tire_input(), vel, rot, &tire);
            w.slip_ratio = out.slip_ratio;
            w.slip_angle = out.slip_angle;
            w.combined_slip = out.combined_slip;
            w.force = out.force;

            let Some(contact) = w.contact else { continue };
            if speed < MIN_SLIP_SPEED && w.drive_torque != 0.0 {
                // No slip is defined this slow; push with the drive torque
                // the tire can hold so the car can pull away.
                let cap = friction_coefficient(0.0, w.temperature, &tire) * contact.normal_force.max(0.0);
                let push = (w.drive_torque / w.radius()).clamp(-cap, cap);
                w.force = wheel_heading(rot, w.steering_angle) * push;
            }
            self.chassis.add_force_at_point(w.force, contact.point);
        }
    }

    fn stage_assists(&mut self, ctx: &StepCtx) {
        let mut cmds = [WheelCommand::default(); 4];
        for (c, w) in cmds.iter_mut().zip(&self.wheels) {
            *c = WheelCommand {
                slip_ratio: w.slip_ratio,
                drive_torque: w.drive_torque,
                brake_torque: w.brake_torque,
                driven: self.driven[w.index.idx()],
            };
        }

        let front = 0.5
            * (self.wheels[WheelIndex::FrontLeft.idx()].steering_angle
                + self.wheels[WheelIndex::FrontRight.idx()].steering_angle);
        let yaw = YawInputs {
            speed: self.chassis.vel.lin.dot(self.chassis.pose.forward()),
            front_steering_angle: front,
            wheelbase: self.config.chassis.wheelbase(),
            // last tick's telemetry
            actual_yaw_rate: self.telemetry.yaw_rate,
        };

        let (flags, correction) = self.assists.step(&mut cmds, self.config.tire.optimal_longitudinal_slip, yaw, ctx.dt);
        if let Some(c) = correction {
            trace!(tick = ctx.tick, wheel = %c.wheel, brake = c.brake_torque, yaw_error = c.yaw_error, "esc correction");
        }
        for (w, c) in self.wheels.iter_mut().zip(&cmds) {
            w.drive_torque = c.drive_torque;
            w.brake_torque = c.brake_torque;
        }
        self.flags = flags;
    }

    fn stage_integrate(&mut self, ctx: &StepCtx) -> Result<(), VehicleError> {
        let dt = ctx.dt;
        let tire = self.config.tire;

        self.chassis.integrate(dt);
        if !self.chassis.is_finite() {
            return Err(self.poison("chassis"));
        }

        // Wheels see the road as it moves after this step.
        let vel = self.chassis.vel.lin;
        let rot = self.chassis.pose.rot;
        for w in self.wheels.iter_mut() {
            let heading = wheel_heading(rot, w.steering_angle);
            let r = w.radius();
            let road_omega = vel.dot(heading) / r;
            match w.contact {
                Some(_) if w.is_free_rolling() => {
                    w.angular_velocity = road_omega;
                    w.rotation = wrap_angle(w.rotation + road_omega * dt);
                }
                contact => {
                    let (rolling, traction) = match contact {
                        Some(c) => (tire.rolling_friction * c.normal_force.max(0.0) * r, w.force.dot(heading).abs() * r),
                        None => (0.0, 0.0),
                    };
                    let torques = SpinTorques { drive: w.drive_torque, brake: w.brake_torque, rolling, traction, road_omega };
                    (w.angular_velocity, w.rotation) = integrate_spin(w.angular_velocity, w.rotation, torques, w.inertia(), dt);
                }
            }
            w.temperature = update_temperature(w.temperature, w.combined_slip, w.is_grounded(), &tire, dt);
        }

        if self.wheels.iter().any(|w| !w.is_finite()) {
            return Err(self.poison("wheel"));
        }
        Ok(())
    }

    fn stage_telemetry(&mut self) {
        let pose = self.chassis.pose;
        let vel = self.chassis.vel;
        let sliding_at = self.config.tire.optimal_lateral_slip;
        self.telemetry = Telemetry {
            yaw_rate: vel.ang.y,
            lateral_g: self.chassis.accel.dot(pose.lateral()) / STANDARD_GRAVITY,
            speed: vel.lin.length(),
            forward_speed: vel.lin.dot(pose.forward()),
            tcs_active: self.flags.tcs,
            esc_active: self.flags.esc,
            abs_active: self.flags.abs,
            abs_cycles: self.assists.abs.cycles(),
            wheels: self.wheels.map(|w| WheelSlip {
                slip_ratio: w.slip_ratio,
                slip_angle: w.slip_angle,
                combined_slip: w.combined_slip,
                temperature: w.temperature,
                grounded: w.is_grounded(),
                sliding: w.slip_angle.abs() > sliding_at,
            }),
        };
    }

    /// Hub transforms for the renderer.
    pub fn wheel_poses(&self) -> [WheelPose; 4] {
        let pose = self.chassis.pose;
        let offsets = self.config.chassis.wheel_offsets;
        self.wheels.map(|w| WheelPose {
            position: pose.transform_point(offsets[w.index.idx()]),
            rotation: w.rotation,
            steering_angle: w.steering_angle,
        })
    }

    /// Back to the spawn pose, at rest, assists cleared. Config, contacts
    /// and the observer are kept. Clears a poisoned state.
    pub fn reset_state(&mut self) {
        let spawn = self.spawn;
        self.reset_to(spawn);
    }

    /// Like [`reset_state`](Self::reset_state) but at `pose`, which becomes the new spawn pose.
    pub fn reset_to(&mut self, pose: Isometry) {
        self.spawn = pose;
        self.chassis.pose = pose;
        self.chassis.stop();
        let temp = self.config.tire.optimal_temperature;
        for w in self.wheels.iter_mut() {
            w.reset(temp);
        }
        self.steer_angle = 0.0;
        self.input = DriverInput::NEUTRAL;
        self.assists.reset();
        self.flags = AssistFlags::default();
        self.telemetry = Telemetry::default();
        self.aero = AeroForces::default();
        self.tick = 0;
        let was_poisoned = std::mem::replace(&mut self.poisoned, false);
        info!(was_poisoned, "vehicle reset");
    }

    /// Swap in a new configuration, keeping the motion state.
    ///
    /// On error nothing changes.
    pub fn reconfigure(&mut self, config: VehicleConfig) -> Result<(), VehicleError> {
        config.validate()?;
        let mut chassis = ChassisBody::new(config.chassis.params(), self.chassis.pose)?;
        chassis.vel = self.chassis.vel;
        self.chassis = chassis;
        for w in self.wheels.iter_mut() {
            w.config = config.wheels[w.index.idx()];
        }
        self.driven = config.drivetrain.layout.driven_mask();
        self.assists.tcs.params = config.assists.tcs;
        self.assists.esc.params = config.assists.esc;
        self.assists.abs.params = config.assists.abs;
        self.config = config;
        info!(mass = config.chassis.mass, layout = ?config.drivetrain.layout, "vehicle reconfigured");
        Ok(())
    }

    /// Copy of the simulated state.
    pub fn snapshot(&self) -> VehicleSnapshot {
        let abs = &self.assists.abs;
        VehicleSnapshot {
            tick: self.tick,
            pose: self.chassis.pose,
            velocity: self.chassis.vel,
            steer_angle: self.steer_angle,
            wheels: self.wheels.map(|w| WheelSnapshot {
                rotation: w.rotation,
                angular_velocity: w.angular_velocity,
                steering_angle: w.steering_angle,
                contact: w.contact,
                drive_torque: w.drive_torque,
                brake_torque: w.brake_torque,
                slip_ratio: w.slip_ratio,
                slip_angle: w.slip_angle,
                temperature: w.temperature,
            }),
            yaw_rate: self.telemetry.yaw_rate,
            lateral_g: self.telemetry.lateral_g,
            abs_timer: abs.timer(),
            abs_released: abs.released(),
            abs_cycles: abs.cycles(),
            abs_fired: abs.fired(),
        }
    }

    /// Reinstate a snapshot. Config and observer are kept; a poisoned state is cleared.
    pub fn restore(&mut self, snap: &VehicleSnapshot) {
        self.chassis.stop();
        self.chassis.pose = snap.pose;
        self.chassis.vel = snap.velocity;
        self.steer_angle = snap.steer_angle;
        for (w, s) in self.wheels.iter_mut().zip(&snap.wheels) {
            w.rotation = s.rotation;
            w.angular_velocity = s.angular_velocity;
            w.steering_angle = s.steering_angle;
            w.contact = s.contact;
            w.drive_torque = s.drive_torque;
            w.brake_torque = s.brake_torque;
            w.slip_ratio = s.slip_ratio;
            w.slip_angle = s.slip_angle;
            w.temperature = s.temperature;
            w.force = Vec3::ZERO;
        }
        self.grounded = self.wheels.map(|w| w.is_grounded());
        self.assists.reset();
        self.assists.abs.restore(snap.abs_timer, snap.abs_released, snap.abs_cycles, snap.abs_fired);
        self.flags = AssistFlags { abs: self.assists.abs.active(), ..AssistFlags::default() };
        self.telemetry = Telemetry {
            yaw_rate: snap.yaw_rate,
            lateral_g: snap.lateral_g,
            abs_active: self.flags.abs,
            abs_cycles: snap.abs_cycles,
            ..Telemetry::default()
        };
        self.tick = snap.tick;
        self.poisoned = false;
    }

    /// blake3 digest over the simulated state, in a fixed field order.
    pub fn state_hash(&self) -> [u8; 32] {
        let mut h = StepHasher::for_state();
        hash_u64(&mut h, self.tick);
        hash_isometry(&mut h, &self.chassis.pose);
        hash_velocity(&mut h, &self.chassis.vel);
        hash_scalar(&mut h, self.steer_angle);
        for w in &self.wheels {
            for s in [w.rotation, w.angular_velocity, w.steering_angle, w.temperature, w.slip_ratio, w.slip_angle] {
                hash_scalar(&mut h, s);
            }
        }
        hash_scalar(&mut h, self.assists.abs.timer());
        hash_u64(&mut h, self.assists.abs.cycles());
        for r in self.assists.abs.released() {
            hash_bool(&mut h, r);
        }
        h.finalize()
    }

    /// Digest of the stage order every tick runs.
    pub fn schedule_digest() -> [u8; 32] { schedule_digest(&TICK_SCHEDULE) }

    /// Tear down, handing back the final state for a save/load layer.
    pub fn dispose(mut self) -> VehicleSnapshot {
        self.observer = None;
        let snap = self.snapshot();
        info!(tick = snap.tick, "vehicle disposed");
        snap
    }
}

#[inline]
fn approach(from: Scalar, to: Scalar, max_step: Scalar) -> Scalar {
    let d = to - from;
    if d.abs() <= max_step { to } else { from + max_step.copysign(d) }
}

/// World rolling direction of a wheel steered by `steer` about chassis +Y.
#[inline]
fn wheel_heading(chassis_rot: Quat, steer: Scalar) -> Vec3 {
    chassis_rot * (Quat::from_rotation_y(steer) * Vec3::Z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn car() -> VehicleDynamics { VehicleDynamics::new(VehicleConfig::default()).unwrap() }

    #[test]
    fn steering_ramps_and_splits_ackermann() {
        let mut v = car();
        v.set_input(DriverInput { steering: 1.0, ..DriverInput::NEUTRAL });
        v.update(0.1).unwrap();
        // 2.5 rad/s for 0.1 s
        assert_relative_eq!(v.steer_angle, 0.25, epsilon = 1e-6);
        let fl = v.wheel(WheelIndex::FrontLeft).steering_angle;
        let fr = v.wheel(WheelIndex::FrontRight).steering_angle;
        assert_relative_eq!(fl, 0.25 * 1.1, epsilon = 1e-6);
        assert_relative_eq!(fr, 0.25 * 0.9, epsilon = 1e-6);
        assert_eq!(v.wheel(WheelIndex::RearLeft).steering_angle, 0.0);

        for _ in 0..10 { v.update(0.1).unwrap(); }
        assert_relative_eq!(v.steer_angle, 0.6, epsilon = 1e-6);

        v.set_input(DriverInput::NEUTRAL);
        v.update(0.1).unwrap();
        assert_relative_eq!(v.steer_angle, 0.3, epsilon = 1e-5);
        v.update(0.2).unwrap();
        assert_eq!(v.steer_angle, 0.0);
    }

    #[test]
    fn negative_steer_puts_inner_wheel_on_the_right() {
        let mut v = car();
        v.set_input(DriverInput { steering: -0.5, ..DriverInput::NEUTRAL });
        v.update(1.0).unwrap();
        assert!(v.wheel(WheelIndex::FrontRight).steering_angle < v.wheel(WheelIndex::FrontLeft).steering_angle);
    }

    #[test]
    fn pedal_mapping() {
        let mut v = car();
        v.set_input(DriverInput { steering: 0.0, throttle: true, brake: true });
        v.update(0.0).unwrap();
        let w = v.wheels();
        assert_eq!(w[WheelIndex::FrontLeft.idx()].drive_torque, 0.0);
        assert_relative_eq!(w[WheelIndex::RearLeft.idx()].drive_torque, 800.0);
        assert_relative_eq!(w[WheelIndex::FrontRight.idx()].brake_torque, 1800.0);
        assert_relative_eq!(w[WheelIndex::RearRight.idx()].brake_torque, 1200.0, epsilon = 1e-3);
    }

    #[test]
    fn rejects_bad_dt_without_touching_state() {
        let mut v = car();
        let before = v.state_hash();
        assert_eq!(v.update(-0.01).unwrap_err(), VehicleError::InvalidTimeStep(-0.01));
        assert!(matches!(v.update(f32::NAN), Err(VehicleError::InvalidTimeStep(_))));
        assert!(matches!(v.update(f32::INFINITY), Err(VehicleError::InvalidTimeStep(_))));
        assert_eq!(v.state_hash(), before);
        assert!(!v.is_poisoned());
    }

    #[test]
    fn zero_dt_keeps_motion() {
        let mut v = car();
        v.set_velocity(Velocity { lin: Vec3::Z * 5.0, ang: Vec3::ZERO });
        let out = v.update(0.0).unwrap();
        assert_eq!(v.velocity().lin, Vec3::Z * 5.0);
        assert_eq!(out.tick, 1);
    }

    #[test]
    fn reconfigure_rejects_and_keeps_old_config() {
        let mut v = car();
        let mut bad = VehicleConfig::default();
        bad.chassis.mass = -5.0;
        assert!(v.reconfigure(bad).is_err());
        assert_eq!(v.config().chassis.mass, 1350.0);

        let mut awd = VehicleConfig::default();
        awd.drivetrain.layout = crate::DrivetrainLayout::AllWheelDrive;
        v.reconfigure(awd).unwrap();
        v.set_input(DriverInput { throttle: true, ..DriverInput::NEUTRAL });
        v.update(0.0).unwrap();
        assert_relative_eq!(v.wheel(WheelIndex::FrontLeft).drive_torque, 400.0);
    }

    #[test]
    fn snapshot_restore_reproduces_state_hash() {
        let mut v = car();
        v.set_velocity(Velocity { lin: Vec3::Z * 12.0, ang: Vec3::Y * 0.05 });
        v.set_input(DriverInput { steering: 0.3, throttle: true, brake: false });
        for _ in 0..5 { v.update(1.0 / 60.0).unwrap(); }
        let snap = v.snapshot();
        let hash = v.state_hash();

        for _ in 0..5 { v.update(1.0 / 60.0).unwrap(); }
        assert_ne!(v.state_hash(), hash);
        v.restore(&snap);
        assert_eq!(v.state_hash(), hash);
        assert_eq!(v.tick(), 5);
    }

    #[test]
    fn schedule_digest_matches_core() {
        assert_eq!(VehicleDynamics::schedule_digest(), schedule_digest(&TICK_SCHEDULE));
    }
}
