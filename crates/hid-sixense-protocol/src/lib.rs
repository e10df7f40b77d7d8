//! HID protocol implementation for Sixense motion controllers
//!
//! The Razer Hydra base station streams one 52-byte report per tick on its
//! motion interface (interface 0). Each report carries the full state of
//! both handheld sensors; buttons are also mirrored on the gamepad
//! interface (interface 1), which is opened but never read.
//!
//! ## Report layout
//!
//! | Offset | Field | Size |
//! |--------|-------|------|
//! | 0 | reserved | 6 |
//! | 6 | sensor 0 (left) | 22 |
//! | 28 | sensor 1 (right) | 22 |
//! | 50 | checksum (`u16` LE) | 2 |
//!
//! Sensor block, all multi-byte fields little-endian:
//!
//! | Offset | Field | Type |
//! |--------|-------|------|
//! | 0 | unit id | `u8` |
//! | 1 | packet counter | `u8` |
//! | 2 | position x/y/z | `[i16; 3]` |
//! | 8 | quaternion w/x/y/z | `[i16; 4]` |
//! | 16 | buttons | `u8` bitmask |
//! | 17 | stick x/y | `[i16; 2]` |
//! | 21 | trigger | `u8` |

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod ids;
pub mod input;
pub mod types;

pub use ids::*;
pub use input::*;
pub use types::*;

use openmotion_hid_common::HidCommonError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SixenseError {
    #[error("Invalid report size: expected {expected}, got {actual}")]
    InvalidReportSize { expected: usize, actual: usize },

    #[error("HID error: {0}")]
    HidError(String),
}

pub type SixenseResult<T> = Result<T, SixenseError>;

impl From<HidCommonError> for SixenseError {
    fn from(e: HidCommonError) -> Self {
        SixenseError::HidError(e.to_string())
    }
}

pub const REPORT_HEADER_SIZE: usize = 6;
pub const SENSOR_REPORT_SIZE: usize = 22;
pub const SENSOR_COUNT: usize = 2;
pub const HYDRA_REPORT_SIZE: usize = REPORT_HEADER_SIZE + SENSOR_COUNT * SENSOR_REPORT_SIZE + 2;
