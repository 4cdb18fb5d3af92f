//! Bit-exact digests of simulation state.
//!
//! Two runs fed the same inputs must produce the same digest, so every value
//! goes in as its little-endian bit pattern in a caller-fixed order. Each
//! digest kind derives its own key from a context string; a state hash and a
//! schedule digest never collide even over identical bytes.

use blake3::Hasher;
use glam::Quat;
use crate::types::{Isometry, Vec3, Velocity};
use crate::Scalar;

/// Key context for [`StepHasher::for_state`].
pub const STATE_HASH_CONTEXT: &str = "riftdrive 2024 vehicle state v1";
/// Key context for [`StepHasher::for_schedule`].
pub const SCHEDULE_HASH_CONTEXT: &str = "riftdrive 2024 tick schedule v1";

pub struct StepHasher(Hasher);

impl StepHasher {
    /// Unkeyed hasher, for ad-hoc digests in tools and tests.
    pub fn new() -> Self { StepHasher(Hasher::new()) }

    /// Hasher keyed by `context`; use a distinct, hard-coded string per digest kind.
    pub fn derived(context: &str) -> Self { StepHasher(Hasher::new_derive_key(context)) }

    pub fn for_state() -> Self { Self::derived(STATE_HASH_CONTEXT) }
    pub fn for_schedule() -> Self { Self::derived(SCHEDULE_HASH_CONTEXT) }

    pub fn update_bytes(&mut self, bytes: &[u8]) { self.0.update(bytes); }
    pub fn finalize(self) -> [u8; 32] { *self.0.finalize().as_bytes() }
}

impl Default for StepHasher {
    fn default() -> Self { Self::new() }
}

/// Every NaN hashes as the canonical quiet NaN; `-0.0` stays distinct from `0.0`.
#[inline]
pub fn hash_scalar(h: &mut StepHasher, s: Scalar) {
    let bits = if s.is_nan() { Scalar::NAN.to_bits() } else { s.to_bits() };
    h.update_bytes(&bits.to_le_bytes());
}

#[inline]
pub fn hash_u64(h: &mut StepHasher, n: u64) { h.update_bytes(&n.to_le_bytes()); }

#[inline]
pub fn hash_bool(h: &mut StepHasher, b: bool) { h.update_bytes(&[b as u8]); }

#[inline]
pub fn hash_vec3(h: &mut StepHasher, v: &Vec3) {
    for c in [v.x, v.y, v.z] { hash_scalar(h, c); }
}

#[inline]
pub fn hash_quat(h: &mut StepHasher, q: &Quat) {
    for c in [q.x, q.y, q.z, q.w] { hash_scalar(h, c); }
}

/// Position, then rotation.
pub fn hash_isometry(h: &mut StepHasher, iso: &Isometry) {
    hash_vec3(h, &iso.pos);
    hash_quat(h, &iso.rot);
}

/// Linear, then angular.
pub fn hash_velocity(h: &mut StepHasher, vel: &Velocity) {
    hash_vec3(h, &vel.lin);
    hash_vec3(h, &vel.ang);
}

/// Lowercase hex of a digest, for logs and CLI output.
pub fn hex_digest(bytes: &[u8; 32]) -> String {
    use std::fmt::Write;
    let mut s = String::with_capacity(64);
    for b in bytes { let _ = write!(s, "{:02x}", b); }
    s
}
