#![deny(missing_docs)]
//! Four-wheel vehicle dynamics with driver assists.
//!
//! Usage:
//! - build a [`VehicleConfig`] (or deserialize one) and call [`VehicleDynamics::new`].
//! - each tick: [`VehicleDynamics::set_input`], [`VehicleDynamics::set_contacts`]
//!   with the ground contacts from your collision layer, then
//!   [`VehicleDynamics::update`].
//! - read the returned [`TickOutput`] for pose, wheel transforms and HUD telemetry.
//!
//! Without a physics engine, [`FlatGround`] supplies contacts and keeps the
//! chassis level.

pub mod config;
pub mod error;
pub mod ground;
pub mod input;
pub mod snapshot;
pub mod telemetry;
pub mod vehicles;
pub mod wheel;

pub use config::{
    BrakeConfig, ChassisConfig, DrivetrainConfig, DrivetrainLayout, SteeringConfig, VehicleConfig,
    WheelConfig,
};
pub use error::VehicleError;
pub use ground::FlatGround;
pub use input::{DriverInput, WheelContact};
pub use snapshot::{VehicleSnapshot, WheelSnapshot};
pub use telemetry::{Assist, Telemetry, TickOutput, VehicleEvent, VehicleObserver, WheelPose, WheelSlip};
pub use vehicles::VehicleDynamics;
pub use wheel::WheelState;

pub use riftdrive_aero::{AeroConfig, AeroForces, Isa};
pub use riftdrive_controllers::{AbsConfig, AssistConfig, AssistFlags, EscConfig, TcsConfig};
pub use riftdrive_core::WheelIndex;
pub use riftdrive_tires::TireConfig;
