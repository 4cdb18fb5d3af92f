use riftdrive_core::Scalar;
use serde::{Deserialize, Serialize};

/// Sea-level air density (kg/m³).
pub const SEA_LEVEL_DENSITY: Scalar = 1.225;
/// Sea-level temperature (K).
pub const SEA_LEVEL_TEMPERATURE: Scalar = 288.15;
/// Temperature drop per metre of altitude in the troposphere (K/m).
pub const TROPOSPHERE_LAPSE_RATE: Scalar = 0.0065;
/// Specific gas constant of dry air (J/(kg·K)).
pub const DRY_AIR_GAS_CONSTANT: Scalar = 287.05;
/// Top of the troposphere (m); the density curve is held flat above it.
pub const TROPOPAUSE_ALTITUDE: Scalar = 11_000.0;

/// Standard-atmosphere air density for cars driving on high ground.
///
/// Density follows the troposphere power law
/// `ρ = ρ0 · (1 − L·h / T0)^(g / (R·L) − 1)`, evaluated at the chassis
/// height. Heights below sea level use the curve as is; heights above the
/// tropopause are clamped to it.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Isa {
    /// Density at altitude 0 (kg/m³).
    pub sea_level_density: Scalar,
    /// Temperature at altitude 0 (K).
    pub sea_level_temperature: Scalar,
    /// K/m, must be > 0.
    pub lapse_rate: Scalar,
    /// J/(kg·K).
    pub gas_constant: Scalar,
    /// m/s².
    pub gravity: Scalar,
}

impl Default for Isa {
    fn default() -> Self {
        Self {
            sea_level_density: SEA_LEVEL_DENSITY,
            sea_level_temperature: SEA_LEVEL_TEMPERATURE,
            lapse_rate: TROPOSPHERE_LAPSE_RATE,
            gas_constant: DRY_AIR_GAS_CONSTANT,
            gravity: 9.80665,
        }
    }
}

impl Isa {
    /// Exponent of the temperature ratio in the density law (about 4.256 for air).
    #[inline]
    pub fn density_exponent(&self) -> Scalar {
        self.gravity / (self.gas_constant * self.lapse_rate) - 1.0
    }

    /// Air density (kg/m³) at `altitude` metres.
    pub fn density(&self, altitude: Scalar) -> Scalar {
        let h = altitude.min(TROPOPAUSE_ALTITUDE);
        let ratio = 1.0 - self.lapse_rate * h / self.sea_level_temperature;
        self.sea_level_density * ratio.max(0.0).powf(self.density_exponent())
    }

    /// Name of the first field that would make `density` NaN/∞ or negative.
    pub fn invalid_field(&self) -> Option<&'static str> {
        [
            ("sea_level_density", self.sea_level_density),
            ("sea_level_temperature", self.sea_level_temperature),
            ("lapse_rate", self.lapse_rate),
            ("gas_constant", self.gas_constant),
            ("gravity", self.gravity),
        ]
        .into_iter()
        .find(|&(_, v)| !(v.is_finite() && v > 0.0))
        .map(|(name, _)| name)
    }
}
