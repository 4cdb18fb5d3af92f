use riftdrive_core::Scalar;
use crate::TireConfig;

/// Heat from sliding while in contact, Newtonian cooling toward ambient always.
///
/// Heating saturates at a combined slip of 1 (full slide).
pub fn update_temperature(temperature: Scalar, combined_slip: Scalar, in_contact: bool, cfg: &TireConfig, dt: Scalar) -> Scalar {
    let mut t = temperature;
    if in_contact {
        t += cfg.heat_rate * combined_slip.clamp(0.0, 1.0) * dt;
    }
    let k = (cfg.cool_rate * dt).clamp(0.0, 1.0);
    t - (t - cfg.ambient_temperature) * k
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sliding_heats_up() {
        let cfg = TireConfig::default();
        let t = update_temperature(85.0, 1.0, true, &cfg, 0.1);
        assert!(t > 85.0);
    }

    #[test]
    fn heating_saturates_at_full_slide() {
        let cfg = TireConfig { cool_rate: 0.0, ..TireConfig::default() };
        assert_relative_eq!(update_temperature(85.0, 1.0, true, &cfg, 0.1), 89.0, epsilon = 1e-4);
        assert_relative_eq!(update_temperature(85.0, 400.0, true, &cfg, 0.1), 89.0, epsilon = 1e-4);
    }

    #[test]
    fn airborne_cools_toward_ambient() {
        let cfg = TireConfig::default();
        let mut t = 85.0;
        for _ in 0..10_000 {
            t = update_temperature(t, 5.0, false, &cfg, 0.1);
        }
        assert_relative_eq!(t, cfg.ambient_temperature, epsilon = 1e-3);
    }

    #[test]
    fn huge_step_does_not_overshoot() {
        let cfg = TireConfig::default();
        let t = update_temperature(85.0, 0.0, false, &cfg, 1e6);
        assert_relative_eq!(t, cfg.ambient_temperature);
    }
}
