use std::sync::{Arc, Mutex};

use approx::assert_relative_eq;
use riftdrive_core::{hex_digest, vec3, Vec3, Velocity};
use riftdrive_vehicles::{
    AeroConfig, Assist, DriverInput, FlatGround, TireConfig, VehicleConfig, VehicleDynamics,
    VehicleError, VehicleEvent, WheelIndex,
};

const DT: f32 = 1.0 / 60.0;

fn car(cfg: VehicleConfig) -> VehicleDynamics {
    let mut v = VehicleDynamics::new(cfg).unwrap();
    FlatGround::default().constrain(&mut v);
    v
}

fn rolling_at(v: &mut VehicleDynamics, speed: f32) {
    v.set_velocity(Velocity { lin: Vec3::Z * speed, ang: Vec3::ZERO });
    let ground = FlatGround::default();
    // one free-rolling tick spins the wheels up to road speed
    v.set_input(DriverInput::NEUTRAL);
    ground.step(v, DT).unwrap();
}

#[test]
fn reset_then_neutral_tick_is_at_rest() {
    let ground = FlatGround::default();
    let mut v = car(VehicleConfig::default());
    v.set_input(DriverInput { steering: 0.4, throttle: true, brake: false });
    for _ in 0..90 {
        ground.step(&mut v, DT).unwrap();
    }
    assert!(v.velocity().lin.length() > 0.5);

    v.reset_state();
    assert_eq!(v.tick(), 0);
    v.update(DT).unwrap();
    assert_eq!(v.velocity().lin, Vec3::ZERO);
    assert_eq!(v.velocity().ang, Vec3::ZERO);
}

#[test]
fn no_friction_no_aero_keeps_speed() {
    let cfg = VehicleConfig { tire: TireConfig::frictionless(), aero: AeroConfig::inert(), ..VehicleConfig::default() };
    let ground = FlatGround::default();
    let mut v = car(cfg);
    v.set_contacts(ground.contacts(&v));
    v.set_velocity(Velocity { lin: vec3(3.0, 0.0, 20.0), ang: vec3(0.0, 0.3, 0.0) });
    let speed = v.velocity().lin.length();

    v.set_input(DriverInput { steering: 0.7, throttle: true, brake: true });
    for _ in 0..300 {
        v.update(DT).unwrap();
    }
    assert_relative_eq!(v.velocity().lin.length(), speed, epsilon = 1e-4);
    assert_relative_eq!(v.velocity().ang.y, 0.3, epsilon = 1e-6);
}

#[test]
fn coasting_slide_leaves_free_rolling_wheels_without_drag() {
    let ground = FlatGround::default();
    let mut v = car(VehicleConfig::default());
    // about 3 degrees of slide
    rolling_at(&mut v, 20.0);
    v.set_velocity(Velocity { lin: vec3(1.05, 0.0, 20.0), ang: Vec3::ZERO });

    for _ in 0..30 {
        ground.step(&mut v, DT).unwrap();
        for w in [WheelIndex::RearLeft, WheelIndex::RearRight] {
            let wheel = v.wheel(w);
            let normal = wheel.contact.map_or(0.0, |c| c.normal_force);
            assert!(wheel.combined_slip > 0.0);
            assert!(wheel.force.z.abs() < 0.01 * normal, "{w}: fz {}", wheel.force.z);
        }
    }
    assert!(v.telemetry().forward_speed > 19.5, "forward speed {}", v.telemetry().forward_speed);
}

#[test]
fn huge_time_step_still_returns() {
    let mut v = car(VehicleConfig::default());
    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let _ = v.update(5.0e6);
        let _ = tx.send(v.snapshot().abs_cycles);
    });
    let cycles = rx.recv_timeout(std::time::Duration::from_secs(10)).expect("update(5e6) returned");
    // 15 Hz for 5e6 s
    assert!((cycles as f64 - 7.5e7).abs() < 7.5e7 * 1e-5, "cycles {cycles}");
}

#[test]
fn traction_control_cuts_spinning_rear_wheel() {
    let ground = FlatGround::default();
    let mut v = car(VehicleConfig::default());
    v.set_contacts(ground.contacts(&v));
    v.set_velocity(Velocity { lin: Vec3::Z * 20.0, ang: Vec3::ZERO });

    let mut snap = v.snapshot();
    let r = v.config().wheels[0].radius;
    for w in WheelIndex::ALL {
        // rear tread 26 m/s over a 20 m/s chassis: slip ratio 0.3
        let surface = if w.is_front() { 20.0 } else { 26.0 };
        snap.wheels[w.idx()].angular_velocity = surface / r;
    }
    v.restore(&snap);

    v.set_input(DriverInput { throttle: true, ..DriverInput::NEUTRAL });
    let out = v.update(DT).unwrap();

    let rl = v.wheel(WheelIndex::RearLeft);
    assert_relative_eq!(rl.slip_ratio, 0.3, epsilon = 1e-4);
    // min(0.8, (0.3 - 0.12) * 0.5) = 0.09
    assert_relative_eq!(rl.drive_torque, 800.0 * 0.91, epsilon = 0.1);
    assert_relative_eq!(v.wheel(WheelIndex::RearRight).drive_torque, 800.0 * 0.91, epsilon = 0.1);
    assert_eq!(v.wheel(WheelIndex::FrontLeft).drive_torque, 0.0);
    assert!(out.telemetry.tcs_active);
    assert!(out.events.contains(&VehicleEvent::AssistEngaged(Assist::Tcs)));
}

#[test]
fn stability_control_brakes_outer_front_on_oversteer() {
    let mut cfg = VehicleConfig::default();
    cfg.assists.esc.braking_intervention = 0.5;
    let ground = FlatGround::default();
    let mut v = car(cfg);
    v.set_contacts(ground.contacts(&v));

    let mut snap = v.snapshot();
    snap.velocity.ang = Vec3::Y * 0.5;
    snap.yaw_rate = 0.5;
    v.restore(&snap);

    let out = v.update(DT).unwrap();
    assert!(out.telemetry.esc_active);
    for w in v.wheels() {
        let expected = if w.index == WheelIndex::FrontRight { 0.25 } else { 0.0 };
        assert_relative_eq!(w.brake_torque, expected, epsilon = 1e-6);
    }
    assert!(out.events.contains(&VehicleEvent::AssistEngaged(Assist::Esc)));
}

#[test]
fn stability_control_brakes_inner_rear_on_understeer() {
    let mut cfg = VehicleConfig::default();
    cfg.assists.esc.braking_intervention = 0.5;
    let mut v = car(cfg);
    let mut snap = v.snapshot();
    snap.yaw_rate = -0.5;
    v.restore(&snap);

    let out = v.update(DT).unwrap();
    assert!(out.telemetry.esc_active);
    assert_relative_eq!(v.wheel(WheelIndex::RearLeft).brake_torque, 0.25, epsilon = 1e-6);
    assert_eq!(v.wheel(WheelIndex::FrontRight).brake_torque, 0.0);
}

#[test]
fn small_yaw_error_leaves_brakes_alone() {
    let mut v = car(VehicleConfig::default());
    let mut snap = v.snapshot();
    snap.yaw_rate = 0.05;
    v.restore(&snap);
    let out = v.update(DT).unwrap();
    assert!(!out.telemetry.esc_active);
    assert!(v.wheels().iter().all(|w| w.brake_torque == 0.0));
}

fn abs_cycles_after(total: f32, steps: u32) -> u64 {
    let ground = FlatGround::default();
    let mut v = car(VehicleConfig::default());
    rolling_at(&mut v, 25.0);
    v.set_input(DriverInput { brake: true, ..DriverInput::NEUTRAL });
    let start = v.telemetry().abs_cycles;
    let dt = total / steps as f32;
    for _ in 0..steps {
        ground.step(&mut v, dt).unwrap();
    }
    v.telemetry().abs_cycles - start
}

#[test]
fn abs_cycle_count_does_not_depend_on_frame_rate() {
    // 15 Hz over 2 s
    let one = abs_cycles_after(2.0, 1);
    let sixty = abs_cycles_after(2.0, 120);
    let fast = abs_cycles_after(2.0, 480);
    for n in [one, sixty, fast] {
        assert!((29..=31).contains(&n), "cycles {n}");
    }
    assert!(one.abs_diff(sixty) <= 1 && sixty.abs_diff(fast) <= 1);
}

#[test]
fn hard_braking_engages_abs() {
    let ground = FlatGround::default();
    let mut v = car(VehicleConfig::default());
    rolling_at(&mut v, 25.0);
    v.set_input(DriverInput { brake: true, ..DriverInput::NEUTRAL });

    let mut engaged = false;
    for _ in 0..120 {
        let out = ground.step(&mut v, DT).unwrap();
        engaged |= out.events.contains(&VehicleEvent::AssistEngaged(Assist::Abs));
    }
    assert!(engaged);
    assert!(v.snapshot().abs_fired > 0);
    assert!(v.telemetry().forward_speed < 24.0);
    assert!(v.telemetry().forward_speed > 0.0);
}

#[test]
fn launches_from_rest() {
    let ground = FlatGround::default();
    let mut v = car(VehicleConfig::default());
    v.set_input(DriverInput { throttle: true, ..DriverInput::NEUTRAL });
    for _ in 0..180 {
        ground.step(&mut v, DT).unwrap();
    }
    let t = v.telemetry();
    assert!(t.forward_speed > 3.0, "forward speed {}", t.forward_speed);
    assert!(v.pose().pos.z > 2.0);
    assert!(v.pose().pos.x.abs() < 1e-3);
}

fn scripted(v: &mut VehicleDynamics) {
    let ground = FlatGround::default();
    for i in 0..240 {
        let steering = if (i / 40) % 2 == 0 { 0.5 } else { -0.5 };
        v.set_input(DriverInput { steering, throttle: i < 160, brake: i >= 200 });
        ground.step(v, DT).unwrap();
    }
}

#[test]
fn same_inputs_same_state_hash() {
    let mut a = car(VehicleConfig::default());
    let mut b = car(VehicleConfig::default());
    scripted(&mut a);
    scripted(&mut b);
    assert_eq!(hex_digest(&a.state_hash()), hex_digest(&b.state_hash()));

    let mut c = car(VehicleConfig::default());
    scripted(&mut c);
    c.update(DT).unwrap();
    assert_ne!(a.state_hash(), c.state_hash());
}

#[test]
fn non_finite_state_poisons_until_reset() {
    let mut v = car(VehicleConfig::default());
    v.set_velocity(Velocity { lin: vec3(f32::NAN, 0.0, 1.0), ang: Vec3::ZERO });

    assert!(matches!(v.update(DT), Err(VehicleError::NonFiniteState { .. })));
    assert!(v.is_poisoned());
    assert_eq!(v.update(DT).unwrap_err(), VehicleError::Poisoned);

    v.reset_state();
    assert!(!v.is_poisoned());
    v.update(DT).unwrap();
    assert!(v.velocity().lin.is_finite());
}

#[test]
fn observer_sees_contact_and_assist_events_in_order() {
    let seen: Arc<Mutex<Vec<(u64, VehicleEvent)>>> = Arc::default();
    let sink = Arc::clone(&seen);

    let ground = FlatGround::default();
    let mut v = car(VehicleConfig::default());
    v.set_observer(Box::new(move |tick: u64, e: &VehicleEvent| sink.lock().unwrap().push((tick, *e))));

    ground.step(&mut v, DT).unwrap();
    {
        let got = seen.lock().unwrap();
        let expected: Vec<_> = WheelIndex::ALL.iter().map(|&w| (1u64, VehicleEvent::WheelTouchdown(w))).collect();
        assert_eq!(*got, expected);
    }

    v.set_contact(WheelIndex::FrontLeft, None);
    let out = v.update(DT).unwrap();
    assert_eq!(out.events, vec![VehicleEvent::WheelAirborne(WheelIndex::FrontLeft)]);
    assert_eq!(seen.lock().unwrap().last(), Some(&(2u64, VehicleEvent::WheelAirborne(WheelIndex::FrontLeft))));
    assert!(!out.telemetry.wheels[WheelIndex::FrontLeft.idx()].grounded);
}

#[test]
fn wheel_poses_follow_chassis() {
    let mut v = car(VehicleConfig::default());
    let out = v.update(0.0).unwrap();
    let fl = out.wheels[WheelIndex::FrontLeft.idx()].position;
    let rr = out.wheels[WheelIndex::RearRight.idx()].position;
    assert!(fl.x > 0.0 && fl.z > 0.0);
    assert!(rr.x < 0.0 && rr.z < 0.0);
    assert_relative_eq!(fl.y, 0.33, epsilon = 1e-5);
}

#[test]
fn dispose_hands_back_final_state() {
    let mut v = car(VehicleConfig::default());
    v.update(DT).unwrap();
    v.update(DT).unwrap();
    let snap = v.dispose();
    assert_eq!(snap.tick, 2);

    let json = serde_json::to_string(&snap).unwrap();
    let back: riftdrive_vehicles::VehicleSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tick, 2);
    assert_eq!(back.pose, snap.pose);
}
