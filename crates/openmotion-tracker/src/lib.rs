//! Head pose tracking over named OpenMotion controls
//!
//! [`PoseTracker`] reads three position and four orientation controls from
//! an [`InputRegistry`](openmotion_input::InputRegistry) and turns them into
//! a view transform each frame. [`PoseTracker::reset_view`] captures a
//! baseline; afterwards position is reported relative to it and heading is
//! re-based around the vertical axis only, so pitch and roll stay absolute.

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod pose;

pub use config::*;
pub use pose::*;

use openmotion_input::InputError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Invalid tracker configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse tracker configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

pub type TrackerResult<T> = Result<T, TrackerError>;
