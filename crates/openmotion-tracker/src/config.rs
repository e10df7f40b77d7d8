//! Tracker configuration

use crate::{TrackerError, TrackerResult};
use openmotion_input::DeviceQualifier;
use serde::{Deserialize, Serialize};

pub const DEFAULT_POSITION_INPUTS: [&str; 3] = ["Pos X", "Pos Y", "Pos Z"];
pub const DEFAULT_ORIENTATION_INPUTS: [&str; 4] = ["Quat W", "Quat X", "Quat Y", "Quat Z"];

/// Names of the controls a [`PoseTracker`](crate::PoseTracker) resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// X, Y, Z position controls.
    pub position_inputs: [String; 3],
    /// W, X, Y, Z orientation controls.
    pub orientation_inputs: [String; 4],
    /// Restrict lookup to one device; `None` searches every device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceQualifier>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            position_inputs: DEFAULT_POSITION_INPUTS.map(String::from),
            orientation_inputs: DEFAULT_ORIENTATION_INPUTS.map(String::from),
            device: None,
        }
    }
}

impl TrackerConfig {
    pub fn with_device(mut self, device: DeviceQualifier) -> Self {
        self.device = Some(device);
        self
    }

    /// Parse and validate a JSON configuration. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> TrackerResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> TrackerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> TrackerResult<()> {
        let empty = self
            .position_inputs
            .iter()
            .chain(&self.orientation_inputs)
            .any(|name| name.trim().is_empty());

        if empty {
            return Err(TrackerError::InvalidConfig(
                "control names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
