use riftdrive_core::Scalar;

/// What the assists see of one wheel, and what they are allowed to change.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct WheelCommand {
    pub slip_ratio: Scalar,
    pub drive_torque: Scalar,
    pub brake_torque: Scalar,
    pub driven: bool,
}
