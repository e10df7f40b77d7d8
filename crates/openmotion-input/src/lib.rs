//! Named input controls and device discovery for OpenMotion
//!
//! Devices publish their state as named scalar controls ([`Input`]). The
//! [`DeviceRegistry`] collects devices from backends and resolves controls
//! by name for consumers such as the pose tracker.
//!
//! ## Backends
//! - [`sixense`]: Razer Hydra base stations over any
//!   [`HidTransport`](openmotion_hid_common::HidTransport).

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod control;
pub mod device;
pub mod mock;
pub mod registry;
pub mod sixense;
pub mod state;

pub use control::{AxisHalf, ControlBinding, ControlState, Input, InputHandle, SensorInput};
pub use device::{Device, DeviceQualifier};
pub use registry::{DeviceBackend, DeviceRegistry, InputRegistry, SurfaceHandle};
pub use sixense::{SixenseBackend, SixenseBackendConfig, SixenseDevice};
pub use state::{SensorStateStore, SharedSensorState};

use openmotion_hid_common::HidCommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InputError {
    #[error("Device unavailable at {path}: {reason}")]
    DeviceUnavailable { path: String, reason: String },

    #[error("Invalid device qualifier: {0:?}")]
    InvalidQualifier(String),

    #[error("HID error: {0}")]
    Hid(#[from] HidCommonError),
}

pub type InputResult<T> = Result<T, InputError>;
