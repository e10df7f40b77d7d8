//! Control naming and scaling tables for Sixense controllers

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorSide {
    Left,
    Right,
}

impl SensorSide {
    pub const ALL: [SensorSide; 2] = [SensorSide::Left, SensorSide::Right];

    /// Index of this sensor's block in a report.
    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }

    /// Prefix prepended to every control name of this sensor.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Left => "Left ",
            Self::Right => "Right ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedButton {
    pub name: &'static str,
    pub bitmask: u8,
}

/// Buttons in publication order. The bit assignment is not sequential.
pub const NAMED_BUTTONS: [NamedButton; 7] = [
    NamedButton { name: "Button 1", bitmask: 0x04 },
    NamedButton { name: "Button 2", bitmask: 0x08 },
    NamedButton { name: "Button 3", bitmask: 0x02 },
    NamedButton { name: "Button 4", bitmask: 0x10 },
    NamedButton { name: "Button 5", bitmask: 0x20 },
    NamedButton { name: "Bumper", bitmask: 0x01 },
    NamedButton { name: "Stick", bitmask: 0x40 },
];

pub const TRIGGER_NAME: &str = "Trigger";

pub const STICK_AXIS_NAMES: [&str; 2] = ["Stick X", "Stick Y"];

pub const POSITION_AXIS_NAMES: [&str; 3] = ["X", "Y", "Z"];

/// Raw position units mapped to a control value of 1.0.
///
/// This is a fixed calibration of the Hydra's position output, not derived
/// from the `i16` range.
pub const POSITION_RANGE: f64 = 100.0;

/// Number of controls published per sensor: buttons, trigger, two halves
/// per stick axis, two halves per position axis.
pub const CONTROLS_PER_SENSOR: usize =
    NAMED_BUTTONS.len() + 1 + 2 * STICK_AXIS_NAMES.len() + 2 * POSITION_AXIS_NAMES.len();
