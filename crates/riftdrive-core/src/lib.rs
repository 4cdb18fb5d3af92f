//! Shared building blocks for the riftdrive vehicle simulation.
//!
//! Math aliases over `glam`, the fixed four-wheel index, per-tick context,
//! the stage schedule and the blake3 hashing used for determinism checks.

pub mod scalar;
pub mod types;
pub mod wheel;
pub mod hash;
pub mod schedule;
pub mod step_ctx;

pub use scalar::{Scalar, STANDARD_GRAVITY, MIN_SLIP_SPEED};
pub use types::{Vec3, Mat3, Isometry, Velocity, vec3, iso, quat_identity};
pub use wheel::WheelIndex;
pub use hash::{
    StepHasher, hash_bool, hash_isometry, hash_quat, hash_scalar, hash_u64, hash_vec3, hash_velocity, hex_digest,
    SCHEDULE_HASH_CONTEXT, STATE_HASH_CONTEXT,
};
pub use schedule::{StepStage, TICK_SCHEDULE, schedule_digest};
pub use step_ctx::StepCtx;
pub use glam::Quat;
