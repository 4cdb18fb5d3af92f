use crate::StepHasher;

/// Stages of one vehicle tick. Discriminants are hashed; keep them stable.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum StepStage {
    Aero = 1,
    TireForces = 2,
    Assists = 3,
    Integrate = 4,
    Telemetry = 5,
}

/// The only legal stage order.
pub const TICK_SCHEDULE: [StepStage; 5] = [
    StepStage::Aero,
    StepStage::TireForces,
    StepStage::Assists,
    StepStage::Integrate,
    StepStage::Telemetry,
];

pub fn schedule_digest(stages: &[StepStage]) -> [u8; 32] {
    let mut h = StepHasher::for_schedule();
    for s in stages { h.update_bytes(&[*s as u8]); }
    h.finalize()
}
