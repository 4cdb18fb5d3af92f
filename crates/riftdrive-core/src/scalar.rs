/// Simulation scalar. Everything runs in `f32` for reproducible results.
pub type Scalar = f32;

/// Standard gravity (m/s²), used to express accelerations in g.
pub const STANDARD_GRAVITY: Scalar = 9.81;

/// Below this speed (m/s) slip quantities and aero forces are forced to zero.
pub const MIN_SLIP_SPEED: Scalar = 0.1;
