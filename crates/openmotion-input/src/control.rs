//! Named scalar controls
//!
//! Every control a device publishes implements [`Input`]: a stable display
//! name plus a side-effect free `state()` read. Sensor-backed controls are a
//! [`ControlBinding`] (which field, which scale) evaluated against the
//! device's [`SharedSensorState`] on every read.

use crate::state::SharedSensorState;
use hid_sixense_protocol::{
    NAMED_BUTTONS, POSITION_AXIS_NAMES, POSITION_RANGE, STICK_AXIS_NAMES, SensorReport,
    SensorSide, TRIGGER_NAME,
};
use std::sync::Arc;

/// Scalar value of a control. Digital controls read 0.0 or 1.0, analog
/// controls read within [0.0, 1.0] unless documented otherwise.
pub type ControlState = f64;

pub trait Input: Send + Sync {
    fn name(&self) -> &str;

    fn state(&self) -> ControlState;

    /// Whether input-detection UIs may pick this control up from movement.
    fn is_detectable(&self) -> bool {
        true
    }
}

/// Shared, non-owning view of a control published by some device.
pub type InputHandle = Arc<dyn Input>;

/// Which half of a signed field a split control reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisHalf {
    Negative,
    Positive,
}

impl AxisHalf {
    pub const BOTH: [AxisHalf; 2] = [AxisHalf::Negative, AxisHalf::Positive];

    pub fn suffix(self) -> char {
        match self {
            Self::Negative => '-',
            Self::Positive => '+',
        }
    }
}

/// Binding of a control to one field of a sensor block and its scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlBinding {
    Button { label: &'static str, bitmask: u8 },
    Trigger { label: &'static str },
    /// One half of a joystick channel, normalized by the `i16` extremes.
    Stick { label: &'static str, channel: usize, half: AxisHalf },
    /// One half of a position channel, normalized by [`POSITION_RANGE`].
    Position { label: &'static str, channel: usize, half: AxisHalf },
}

impl ControlBinding {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Button { label, .. }
            | Self::Trigger { label }
            | Self::Stick { label, .. }
            | Self::Position { label, .. } => *label,
        }
    }

    pub fn display_name(&self, side: SensorSide) -> String {
        let mut name = format!("{}{}", side.prefix(), self.label());
        match self {
            Self::Stick { half, .. } | Self::Position { half, .. } => name.push(half.suffix()),
            Self::Button { .. } | Self::Trigger { .. } => {}
        }
        name
    }

    pub fn evaluate(&self, sensor: &SensorReport) -> ControlState {
        match *self {
            Self::Button { bitmask, .. } => {
                if sensor.is_pressed(bitmask) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Trigger { .. } => f64::from(sensor.trigger) / f64::from(u8::MAX),
            Self::Stick { channel, half, .. } => {
                let raw = f64::from(sensor.axis.get(channel).copied().unwrap_or(0));
                let range = match half {
                    AxisHalf::Negative => f64::from(i16::MIN),
                    AxisHalf::Positive => f64::from(i16::MAX),
                };
                (raw / range).max(0.0)
            }
            Self::Position { channel, half, .. } => {
                let raw = f64::from(sensor.position.get(channel).copied().unwrap_or(0));
                let range = match half {
                    AxisHalf::Negative => -POSITION_RANGE,
                    AxisHalf::Positive => POSITION_RANGE,
                };
                (raw / range).max(0.0)
            }
        }
    }

    /// Positions drift with every hand movement and would swamp detection.
    pub fn is_detectable(&self) -> bool {
        !matches!(self, Self::Position { .. })
    }
}

/// A control reading one field of one sensor through the device's store.
pub struct SensorInput {
    name: String,
    side: SensorSide,
    binding: ControlBinding,
    state: SharedSensorState,
}

impl SensorInput {
    pub fn new(side: SensorSide, binding: ControlBinding, state: SharedSensorState) -> Self {
        Self {
            name: binding.display_name(side),
            side,
            binding,
            state,
        }
    }

    pub fn side(&self) -> SensorSide {
        self.side
    }

    pub fn binding(&self) -> &ControlBinding {
        &self.binding
    }
}

impl Input for SensorInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> ControlState {
        self.binding.evaluate(&self.state.sensor(self.side.index()))
    }

    fn is_detectable(&self) -> bool {
        self.binding.is_detectable()
    }
}

/// Bindings published for one sensor, in publication order.
pub fn sensor_bindings() -> Vec<ControlBinding> {
    let mut bindings = Vec::with_capacity(hid_sixense_protocol::CONTROLS_PER_SENSOR);

    for button in NAMED_BUTTONS {
        bindings.push(ControlBinding::Button {
            label: button.name,
            bitmask: button.bitmask,
        });
    }

    bindings.push(ControlBinding::Trigger {
        label: TRIGGER_NAME,
    });

    for (channel, label) in STICK_AXIS_NAMES.into_iter().enumerate() {
        for half in AxisHalf::BOTH {
            bindings.push(ControlBinding::Stick {
                label,
                channel,
                half,
            });
        }
    }

    for (channel, label) in POSITION_AXIS_NAMES.into_iter().enumerate() {
        for half in AxisHalf::BOTH {
            bindings.push(ControlBinding::Position {
                label,
                channel,
                half,
            });
        }
    }

    bindings
}

/// Build every control of both sensors bound to `state`.
pub fn build_sensor_inputs(state: &SharedSensorState) -> Vec<InputHandle> {
    let bindings = sensor_bindings();
    SensorSide::ALL
        .into_iter()
        .flat_map(|side| {
            bindings.iter().map(move |binding| {
                Arc::new(SensorInput::new(side, *binding, state.clone())) as InputHandle
            })
        })
        .collect()
}
