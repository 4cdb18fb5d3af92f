use riftdrive_core::Scalar;
use serde::{Deserialize, Serialize};
use crate::WheelCommand;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsConfig {
    pub enabled: bool,
    /// Control cycles per simulated second.
    pub frequency_hz: Scalar,
    /// A wheel with slip ratio below `-slip_threshold` is locking.
    pub slip_threshold: Scalar,
}

impl Default for AbsConfig {
    fn default() -> Self { Self { enabled: true, frequency_hz: 15.0, slip_threshold: 0.2 } }
}

/// Fixed-rate brake release.
///
/// The timer runs on simulated time, so the number of control cycles over a
/// given span does not depend on how that span is cut into ticks. Each cycle
/// latches a per-wheel release decision that holds until the next cycle.
#[derive(Copy, Clone, Debug)]
pub struct AntiLockBrakes {
    pub params: AbsConfig,
    timer: Scalar,
    released: [bool; 4],
    active: bool,
    cycles: u64,
    fired: u64,
}

impl AntiLockBrakes {
    pub fn new(params: AbsConfig) -> Self {
        Self { params, timer: 0.0, released: [false; 4], active: false, cycles: 0, fired: 0 }
    }

    #[inline] pub fn active(&self) -> bool { self.active }
    #[inline] pub fn released(&self) -> [bool; 4] { self.released }
    /// Control cycles run since construction or reset.
    #[inline] pub fn cycles(&self) -> u64 { self.cycles }
    /// Control cycles that released at least one wheel.
    #[inline] pub fn fired(&self) -> u64 { self.fired }
    #[inline] pub fn timer(&self) -> Scalar { self.timer }

    #[inline]
    fn period(&self) -> Scalar { 1.0 / self.params.frequency_hz }

    /// Advance the control clock by `dt` and apply the latched releases.
    pub fn step(&mut self, wheels: &mut [WheelCommand; 4], dt: Scalar) -> bool {
        if !self.params.enabled || self.params.frequency_hz <= 0.0 {
            self.released = [false; 4];
            self.active = false;
            return false;
        }

        self.timer += dt;
        let period = self.period();
        if self.timer >= period {
            // Every cycle inside one tick sees the same slip, so they all latch alike.
            let rest = self.timer.rem_euclid(period);
            let n = ((self.timer - rest) / period).round().max(1.0) as u64;
            self.timer = rest;
            self.cycles += n;
            for (flag, w) in self.released.iter_mut().zip(wheels.iter()) {
                *flag = w.slip_ratio < -self.params.slip_threshold;
            }
            self.active = self.released.iter().any(|&r| r);
            if self.active { self.fired += n; }
        }

        for (w, &r) in wheels.iter_mut().zip(self.released.iter()) {
            if r { w.brake_torque = 0.0; }
        }
        self.active
    }

    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.released = [false; 4];
        self.active = false;
        self.cycles = 0;
        self.fired = 0;
    }

    /// Restore the clock and latch from a snapshot.
    pub fn restore(&mut self, timer: Scalar, released: [bool; 4], cycles: u64, fired: u64) {
        self.timer = timer;
        self.released = released;
        self.active = released.iter().any(|&r| r);
        self.cycles = cycles;
        self.fired = fired;
    }
}
