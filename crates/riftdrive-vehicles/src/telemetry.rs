//! What a tick hands back to rendering and HUD code.

use riftdrive_aero::AeroForces;
use riftdrive_controllers::AssistFlags;
use riftdrive_core::{Isometry, Scalar, Vec3, WheelIndex};
use serde::{Deserialize, Serialize};

/// Slip readout for one wheel.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelSlip {
    /// Longitudinal slip ratio.
    pub slip_ratio: Scalar,
    /// Slip angle (rad).
    pub slip_angle: Scalar,
    /// Blended slip.
    pub combined_slip: Scalar,
    /// Tread temperature (°C).
    pub temperature: Scalar,
    /// Wheel had ground contact.
    pub grounded: bool,
    /// Slip angle past the tire's optimal lateral slip.
    pub sliding: bool,
}

/// Derived quantities, recomputed after every integration.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Telemetry {
    /// Angular velocity about world +Y (rad/s).
    pub yaw_rate: Scalar,
    /// Chassis acceleration along its lateral axis, in g.
    pub lateral_g: Scalar,
    /// |v| (m/s).
    pub speed: Scalar,
    /// Velocity along chassis forward (m/s).
    pub forward_speed: Scalar,
    /// Traction control cut torque this tick.
    pub tcs_active: bool,
    /// Stability control applied a correction this tick.
    pub esc_active: bool,
    /// ABS holds at least one wheel released.
    pub abs_active: bool,
    /// ABS control cycles run so far.
    pub abs_cycles: u64,
    /// Per-wheel slip, indexed by [`WheelIndex`].
    pub wheels: [WheelSlip; 4],
}

impl Telemetry {
    /// The three assist flags.
    pub fn flags(&self) -> AssistFlags {
        AssistFlags { tcs: self.tcs_active, esc: self.esc_active, abs: self.abs_active }
    }
}

/// Transform data for one wheel mesh.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WheelPose {
    /// Hub position, world space.
    pub position: Vec3,
    /// Spin angle in [0, 2π).
    pub rotation: Scalar,
    /// Steering angle about chassis +Y.
    pub steering_angle: Scalar,
}

/// One of the driver assists.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Assist {
    /// Traction control.
    Tcs,
    /// Electronic stability control.
    Esc,
    /// Anti-lock brakes.
    Abs,
}

/// State changes worth telling someone about.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum VehicleEvent {
    /// Assist went from idle to intervening.
    AssistEngaged(Assist),
    /// Assist went from intervening to idle.
    AssistReleased(Assist),
    /// Wheel gained ground contact.
    WheelTouchdown(WheelIndex),
    /// Wheel lost ground contact.
    WheelAirborne(WheelIndex),
}

pub(crate) fn assist_transitions(prev: AssistFlags, now: AssistFlags, out: &mut Vec<VehicleEvent>) {
    for (a, was, is) in [
        (Assist::Tcs, prev.tcs, now.tcs),
        (Assist::Esc, prev.esc, now.esc),
        (Assist::Abs, prev.abs, now.abs),
    ] {
        match (was, is) {
            (false, true) => out.push(VehicleEvent::AssistEngaged(a)),
            (true, false) => out.push(VehicleEvent::AssistReleased(a)),
            _ => {}
        }
    }
}

/// Receives events after each completed tick, in emission order.
pub trait VehicleObserver {
    /// Called once per event; `tick` is the tick that produced it.
    fn on_event(&mut self, tick: u64, event: &VehicleEvent);
}

impl<F: FnMut(u64, &VehicleEvent)> VehicleObserver for F {
    fn on_event(&mut self, tick: u64, event: &VehicleEvent) { self(tick, event) }
}

/// Result of one [`crate::VehicleDynamics::update`].
#[derive(Clone, Debug)]
pub struct TickOutput {
    /// Tick counter after this update (first update is 1).
    pub tick: u64,
    /// Chassis pose for the renderer.
    pub pose: Isometry,
    /// Wheel transforms for the renderer, indexed by [`WheelIndex`].
    pub wheels: [WheelPose; 4],
    /// HUD readout.
    pub telemetry: Telemetry,
    /// Aero loads applied this tick.
    pub aero: AeroForces,
    /// Events raised this tick.
    pub events: Vec<VehicleEvent>,
}
