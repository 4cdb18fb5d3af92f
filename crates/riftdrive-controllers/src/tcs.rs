use riftdrive_core::Scalar;
use serde::{Deserialize, Serialize};
use crate::WheelCommand;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TcsConfig {
    pub enabled: bool,
    /// Upper bound on the torque fraction removed from one wheel.
    pub max_intervention: Scalar,
    /// Torque fraction removed per unit of excess slip.
    pub sensitivity: Scalar,
}

impl Default for TcsConfig {
    fn default() -> Self { Self { enabled: true, max_intervention: 0.8, sensitivity: 0.5 } }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TcsState { Inactive, Intervening }

/// Cuts drive torque on spinning driven wheels. No hysteresis: every tick
/// starts from the instantaneous slip.
#[derive(Copy, Clone, Debug)]
pub struct TractionControl {
    pub params: TcsConfig,
    pub state: TcsState,
    /// Torque fraction removed per wheel on the last tick.
    pub reduction: [Scalar; 4],
}

impl TractionControl {
    pub fn new(params: TcsConfig) -> Self {
        Self { params, state: TcsState::Inactive, reduction: [0.0; 4] }
    }

    #[inline]
    pub fn reduction_for(&self, slip_ratio: Scalar, optimal_slip: Scalar) -> Scalar {
        if slip_ratio <= optimal_slip { return 0.0; }
        ((slip_ratio - optimal_slip) * self.params.sensitivity)
            .min(self.params.max_intervention)
            .max(0.0)
    }

    /// Returns whether any wheel was cut this tick.
    pub fn step(&mut self, wheels: &mut [WheelCommand; 4], optimal_slip: Scalar) -> bool {
        self.reduction = [0.0; 4];
        self.state = TcsState::Inactive;
        if !self.params.enabled { return false; }

        for (i, w) in wheels.iter_mut().enumerate() {
            if !w.driven || w.slip_ratio <= optimal_slip { continue; }
            let r = self.reduction_for(w.slip_ratio, optimal_slip);
            w.drive_torque *= 1.0 - r;
            self.reduction[i] = r;
            self.state = TcsState::Intervening;
        }
        self.state == TcsState::Intervening
    }

    pub fn reset(&mut self) {
        self.state = TcsState::Inactive;
        self.reduction = [0.0; 4];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn driven(slip: Scalar, torque: Scalar) -> WheelCommand {
        WheelCommand { slip_ratio: slip, drive_torque: torque, brake_torque: 0.0, driven: true }
    }

    #[test]
    fn launch_scenario_cuts_nine_percent() {
        let mut tcs = TractionControl::new(TcsConfig { enabled: true, max_intervention: 0.8, sensitivity: 0.5 });
        let mut w = [driven(0.3, 1000.0), driven(0.0, 1000.0), WheelCommand::default(), WheelCommand::default()];
        assert!(tcs.step(&mut w, 0.12));
        assert_eq!(tcs.state, TcsState::Intervening);
        assert_relative_eq!(tcs.reduction[0], 0.09, epsilon = 1e-6);
        assert_relative_eq!(w[0].drive_torque, 910.0, max_relative = 1e-5);
        assert_eq!(w[1].drive_torque, 1000.0);
    }

    #[test]
    fn reduction_is_capped() {
        let tcs = TractionControl::new(TcsConfig::default());
        for k in [0.2f32, 1.0, 10.0, 1e6, f32::MAX] {
            assert!(tcs.reduction_for(k, 0.12) <= 0.8);
        }
        assert_relative_eq!(tcs.reduction_for(1e6, 0.12), 0.8);
    }

    #[test]
    fn undriven_wheels_are_ignored() {
        let mut tcs = TractionControl::new(TcsConfig::default());
        let mut w = [WheelCommand { slip_ratio: 2.0, drive_torque: 50.0, brake_torque: 0.0, driven: false }; 4];
        assert!(!tcs.step(&mut w, 0.12));
        assert_eq!(tcs.state, TcsState::Inactive);
        assert_eq!(w[0].drive_torque, 50.0);
    }

    #[test]
    fn recomputed_fresh_each_tick() {
        let mut tcs = TractionControl::new(TcsConfig::default());
        let mut w = [driven(0.5, 100.0); 4];
        assert!(tcs.step(&mut w, 0.12));
        let mut w = [driven(0.05, 100.0); 4];
        assert!(!tcs.step(&mut w, 0.12));
        assert_eq!(tcs.reduction, [0.0; 4]);
    }

    #[test]
    fn disabled_does_nothing() {
        let mut tcs = TractionControl::new(TcsConfig { enabled: false, ..TcsConfig::default() });
        let mut w = [driven(0.9, 100.0); 4];
        assert!(!tcs.step(&mut w, 0.12));
        assert_eq!(w[2].drive_torque, 100.0);
    }
}
