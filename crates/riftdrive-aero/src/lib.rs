// riftdrive-aero/src/lib.rs
mod isa;
mod models;

pub use isa::{Isa, SEA_LEVEL_DENSITY, SEA_LEVEL_TEMPERATURE, TROPOSPHERE_LAPSE_RATE, DRY_AIR_GAS_CONSTANT, TROPOPAUSE_ALTITUDE};
pub use models::{AeroConfig, AeroForces, compute_aero_forces, dynamic_pressure};
