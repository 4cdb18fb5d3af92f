use riftdrive_core::Scalar;
use serde::{Deserialize, Serialize};

/// Tire parameters shared by all four wheels of a vehicle.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TireConfig {
    pub static_friction: Scalar,
    pub dynamic_friction: Scalar,
    /// Rolling resistance coefficient (torque = coeff · N · radius).
    pub rolling_friction: Scalar,
    /// Combined slip above which grip falls to the dynamic coefficient.
    pub peak_slip_ratio: Scalar,
    /// Slip ratio the traction control aims to hold.
    pub optimal_longitudinal_slip: Scalar,
    /// Slip angle (rad) past which a wheel is reported as sliding.
    pub optimal_lateral_slip: Scalar,
    pub blend_exponent: Scalar,
    pub optimal_temperature: Scalar,
    pub temperature_tolerance: Scalar,
    /// °C per second per unit combined slip.
    pub heat_rate: Scalar,
    /// Fraction of the gap to ambient closed per second.
    pub cool_rate: Scalar,
    pub ambient_temperature: Scalar,
}

impl Default for TireConfig {
    fn default() -> Self {
        Self {
            static_friction: 1.0,
            dynamic_friction: 0.7,
            rolling_friction: 0.015,
            peak_slip_ratio: 0.08,
            optimal_longitudinal_slip: 0.12,
            optimal_lateral_slip: 0.14,
            blend_exponent: 2.0,
            optimal_temperature: 85.0,
            temperature_tolerance: 25.0,
            heat_rate: 40.0,
            cool_rate: 0.05,
            ambient_temperature: 20.0,
        }
    }
}

impl TireConfig {
    /// No grip at all: every tire force and rolling loss is zero.
    pub fn frictionless() -> Self {
        Self { static_friction: 0.0, dynamic_friction: 0.0, rolling_friction: 0.0, ..Self::default() }
    }
}
