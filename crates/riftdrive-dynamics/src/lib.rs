//! Rigid-body state for the chassis and the explicit Euler integrator that
//! advances it (and the wheels' spin) once per tick.

mod chassis;
mod spin;

pub use chassis::{ChassisBody, ChassisParams, DynamicsError};
pub use spin::{SpinTorques, integrate_spin, wrap_angle};
