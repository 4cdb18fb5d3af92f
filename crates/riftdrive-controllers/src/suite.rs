use riftdrive_core::Scalar;
use serde::{Deserialize, Serialize};
use crate::{
    AbsConfig, AntiLockBrakes, EscConfig, EscCorrection, StabilityControl, TcsConfig,
    TractionControl, WheelCommand, YawInputs,
};

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistConfig {
    pub tcs: TcsConfig,
    pub esc: EscConfig,
    pub abs: AbsConfig,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AssistFlags {
    pub tcs: bool,
    pub esc: bool,
    pub abs: bool,
}

/// The three assists, run in fixed order: TCS, then ESC, then ABS.
///
/// ABS runs last, so an ESC correction on a wheel ABS has latched is dropped
/// for that tick.
#[derive(Copy, Clone, Debug)]
pub struct AssistSuite {
    pub tcs: TractionControl,
    pub esc: StabilityControl,
    pub abs: AntiLockBrakes,
}

impl AssistSuite {
    pub fn new(cfg: AssistConfig) -> Self {
        Self {
            tcs: TractionControl::new(cfg.tcs),
            esc: StabilityControl::new(cfg.esc),
            abs: AntiLockBrakes::new(cfg.abs),
        }
    }

    pub fn step(
        &mut self,
        wheels: &mut [WheelCommand; 4],
        optimal_slip: Scalar,
        yaw: YawInputs,
        dt: Scalar,
    ) -> (AssistFlags, Option<EscCorrection>) {
        let tcs = self.tcs.step(wheels, optimal_slip);
        let corr = self.esc.step(wheels, yaw);
        let abs = self.abs.step(wheels, dt);
        (AssistFlags { tcs, esc: corr.is_some(), abs }, corr)
    }

    pub fn flags(&self) -> AssistFlags {
        AssistFlags { tcs: self.tcs.reduction.iter().any(|&r| r > 0.0), esc: self.esc.active, abs: self.abs.active() }
    }

    pub fn reset(&mut self) {
        self.tcs.reset();
        self.esc.reset();
        self.abs.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riftdrive_core::WheelIndex;

    #[test]
    fn abs_overrides_esc_on_a_locked_wheel() {
        let mut suite = AssistSuite::new(AssistConfig {
            abs: AbsConfig { enabled: true, frequency_hz: 10.0, slip_threshold: 0.2 },
            ..AssistConfig::default()
        });
        let mut w = [WheelCommand { slip_ratio: -0.5, brake_torque: 100.0, ..WheelCommand::default() }; 4];
        let yaw = YawInputs { speed: 20.0, front_steering_angle: 0.0, wheelbase: 2.6, actual_yaw_rate: 1.0 };
        let (flags, corr) = suite.step(&mut w, 0.12, yaw, 0.1);
        assert_eq!(corr.map(|c| c.wheel), Some(WheelIndex::FrontRight));
        assert!(flags.esc && flags.abs && !flags.tcs);
        assert!(w.iter().all(|w| w.brake_torque == 0.0));
        assert_eq!(suite.flags(), flags);
    }
}
