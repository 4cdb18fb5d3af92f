mod command;
mod tcs;
mod esc;
mod abs;
mod suite;

pub use command::WheelCommand;
pub use tcs::{TcsConfig, TcsState, TractionControl};
pub use esc::{EscConfig, EscCorrection, StabilityControl, YawInputs, target_yaw_rate};
pub use abs::{AbsConfig, AntiLockBrakes};
pub use suite::{AssistConfig, AssistFlags, AssistSuite};
