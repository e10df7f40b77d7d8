//! Common HID utilities for motion controller backends
//!
//! This crate provides the pieces every OpenMotion device backend shares:
//! an explicit little-endian report parser/builder, interface descriptors
//! yielded by enumeration, and the [`ReportChannel`] / [`HidTransport`]
//! traits a backend reads raw reports through.
//!
//! ## Features
//! - `hidapi`: a [`HidapiTransport`](hidapi_transport::HidapiTransport)
//!   backed by the system HID stack.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod device_info;
pub mod hid_traits;
#[cfg(feature = "hidapi")]
pub mod hidapi_transport;
pub mod report_parser;

pub use device_info::*;
pub use hid_traits::*;
pub use report_parser::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HidCommonError {
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Failed to open device: {0}")]
    OpenError(String),

    #[error("Failed to read from device: {0}")]
    ReadError(String),

    #[error("Invalid report format: {0}")]
    InvalidReport(String),

    #[error("Device disconnected")]
    Disconnected,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type HidCommonResult<T> = Result<T, HidCommonError>;
