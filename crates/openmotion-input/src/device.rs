//! Device trait and device qualifiers

use crate::control::{Input, InputHandle};
use crate::{InputError, InputResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A connected device publishing named controls.
pub trait Device {
    /// Human-readable device label.
    fn name(&self) -> &str;

    /// Backend that discovered the device.
    fn source(&self) -> &str;

    /// Enumeration index assigned at discovery, stable within one run.
    fn id(&self) -> u32;

    fn inputs(&self) -> &[InputHandle];

    /// Pull pending data from the hardware. Returns `true` when the
    /// published state changed; `false` means "no update this tick".
    fn update_input(&mut self) -> bool;

    /// Push output state. Returns `false` for input-only devices.
    fn update_output(&mut self) -> bool {
        false
    }

    fn clear_input_state(&mut self);

    fn find_input(&self, name: &str) -> Option<&InputHandle> {
        self.inputs().iter().find(|input| input.name() == name)
    }

    fn qualifier(&self) -> DeviceQualifier {
        DeviceQualifier::new(self.source(), self.id(), self.name())
    }
}

/// Identifies one device as `source/id/name`, e.g. `Sixense/0/Razer Hydra`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceQualifier {
    pub source: String,
    pub id: u32,
    pub name: String,
}

impl DeviceQualifier {
    pub fn new(source: impl Into<String>, id: u32, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            id,
            name: name.into(),
        }
    }

    pub fn matches(&self, device: &dyn Device) -> bool {
        self.source == device.source() && self.id == device.id() && self.name == device.name()
    }
}

impl fmt::Display for DeviceQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.source, self.id, self.name)
    }
}

impl FromStr for DeviceQualifier {
    type Err = InputError;

    fn from_str(s: &str) -> InputResult<Self> {
        let invalid = || InputError::InvalidQualifier(s.to_string());

        // Names may themselves contain '/', so only the first two separate fields.
        let mut parts = s.splitn(3, '/');
        let source = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;
        let id = parts
            .next()
            .and_then(|p| p.parse::<u32>().ok())
            .ok_or_else(invalid)?;
        let name = parts.next().filter(|p| !p.is_empty()).ok_or_else(invalid)?;

        Ok(Self::new(source, id, name))
    }
}

impl TryFrom<String> for DeviceQualifier {
    type Error = InputError;

    fn try_from(value: String) -> InputResult<Self> {
        value.parse()
    }
}

impl From<DeviceQualifier> for String {
    fn from(value: DeviceQualifier) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_display() {
        let q = DeviceQualifier::new("Sixense", 0, "Razer Hydra");
        assert_eq!(q.to_string(), "Sixense/0/Razer Hydra");
    }

    #[test]
    fn test_qualifier_parse() {
        let q: DeviceQualifier = "Sixense/3/Razer Hydra".parse().expect("valid qualifier");
        assert_eq!(q, DeviceQualifier::new("Sixense", 3, "Razer Hydra"));

        let q: DeviceQualifier = "OSVR/0/head/tracker".parse().expect("valid qualifier");
        assert_eq!(q.name, "head/tracker");
    }

    #[test]
    fn test_qualifier_parse_rejects_malformed() {
        for bad in ["", "Sixense", "Sixense/x/Razer Hydra", "Sixense/0/", "/0/Razer Hydra"] {
            assert!(
                matches!(bad.parse::<DeviceQualifier>(), Err(InputError::InvalidQualifier(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
