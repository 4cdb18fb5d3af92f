use core::fmt;
use serde::{Deserialize, Serialize};

/// Fixed wheel slot. Arrays of per-wheel data are indexed with [`WheelIndex::idx`].
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum WheelIndex {
    FrontLeft = 0,
    FrontRight = 1,
    RearLeft = 2,
    RearRight = 3,
}

const STEERABLE: [bool; 4] = [true, true, false, false];
const LEFT_SIDE: [bool; 4] = [true, false, true, false];

impl WheelIndex {
    pub const ALL: [WheelIndex; 4] = [
        WheelIndex::FrontLeft,
        WheelIndex::FrontRight,
        WheelIndex::RearLeft,
        WheelIndex::RearRight,
    ];

    #[inline] pub fn idx(self) -> usize { self as usize }
    #[inline] pub fn is_front(self) -> bool { STEERABLE[self.idx()] }
    #[inline] pub fn is_steerable(self) -> bool { STEERABLE[self.idx()] }
    /// Left wheels sit on the chassis +X side.
    #[inline] pub fn is_left(self) -> bool { LEFT_SIDE[self.idx()] }

    pub fn short_name(self) -> &'static str {
        match self {
            WheelIndex::FrontLeft => "FL",
            WheelIndex::FrontRight => "FR",
            WheelIndex::RearLeft => "RL",
            WheelIndex::RearRight => "RR",
        }
    }
}

impl fmt::Display for WheelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.short_name()) }
}
