//! Sixense (Razer Hydra) device backend
//!
//! Discovery is split in two: [`pair_interfaces`] is a pure pass over the
//! enumerated interfaces, and [`SixenseBackend::acquire`] opens both
//! channels of one candidate. A candidate that cannot be acquired is skipped
//! without affecting the others.

use crate::control::{InputHandle, build_sensor_inputs};
use crate::device::Device;
use crate::registry::DeviceBackend;
use crate::state::SharedSensorState;
use crate::{InputError, InputResult};
use hid_sixense_protocol::{
    GAMEPAD_INTERFACE, HYDRA_DEVICE_NAME, HYDRA_REPORT_SIZE, HydraReport, MOTION_INTERFACE,
    RAZER_HYDRA_PID, SIXENSE_SOURCE, SIXENSE_VENDOR_ID,
};
use openmotion_hid_common::{HidInterfaceInfo, HidTransport, ReportChannel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SixenseBackendConfig {
    pub vendor_id: u16,
    pub product_id: u16,
}

impl Default for SixenseBackendConfig {
    fn default() -> Self {
        Self {
            vendor_id: SIXENSE_VENDOR_ID,
            product_id: RAZER_HYDRA_PID,
        }
    }
}

/// Motion and gamepad interfaces of one physical base station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfacePair {
    /// Ordinal of this candidate among all pairs found in one scan.
    pub index: u32,
    pub motion: HidInterfaceInfo,
    pub gamepad: HidInterfaceInfo,
}

/// Group enumerated interfaces into devices.
///
/// A device is an interface-0 entry immediately followed by an interface-1
/// entry. Entries that do not start such a run are ignored.
pub fn pair_interfaces(interfaces: &[HidInterfaceInfo]) -> Vec<InterfacePair> {
    let mut pairs = Vec::new();
    let mut rest = interfaces;

    while let [first, second, tail @ ..] = rest {
        if first.interface_number == MOTION_INTERFACE
            && second.interface_number == GAMEPAD_INTERFACE
        {
            pairs.push(InterfacePair {
                index: u32::try_from(pairs.len()).unwrap_or(u32::MAX),
                motion: first.clone(),
                gamepad: second.clone(),
            });
            rest = tail;
        } else {
            rest = rest.get(1..).unwrap_or_default();
        }
    }

    pairs
}

/// One Razer Hydra base station with its two handheld sensors.
pub struct SixenseDevice {
    id: u32,
    motion: Box<dyn ReportChannel>,
    // Held open for the device's lifetime; buttons are read from motion reports.
    _gamepad: Box<dyn ReportChannel>,
    state: SharedSensorState,
    inputs: Vec<InputHandle>,
}

impl SixenseDevice {
    /// Take ownership of both opened channels and publish the controls.
    pub fn new(
        id: u32,
        mut motion: Box<dyn ReportChannel>,
        gamepad: Box<dyn ReportChannel>,
    ) -> InputResult<Self> {
        motion.set_nonblocking()?;

        let state = SharedSensorState::new();
        let inputs = build_sensor_inputs(&state);

        let mut device = Self {
            id,
            motion,
            _gamepad: gamepad,
            state,
            inputs,
        };
        device.clear_input_state();
        Ok(device)
    }

    /// Read one report from the motion channel without blocking.
    ///
    /// The store is only touched when a complete report of exactly
    /// [`HYDRA_REPORT_SIZE`] bytes arrives. Empty, short, oversized and
    /// failed reads leave the previous state in place.
    pub fn poll(&mut self) -> bool {
        // One spare byte so an oversized report shows up as a length mismatch.
        let mut buf = [0u8; HYDRA_REPORT_SIZE + 1];
        let read = match self.motion.read(&mut buf) {
            Ok(read) => read,
            Err(e) => {
                debug!("Sixense {} motion read failed: {}", self.id, e);
                return false;
            }
        };

        let Some(data) = buf.get(..read) else {
            return false;
        };

        match HydraReport::parse(data) {
            Ok(report) => {
                self.state.publish(&report);
                true
            }
            Err(e) => {
                if read > 0 {
                    trace!("Sixense {} dropped partial report: {}", self.id, e);
                }
                false
            }
        }
    }

    pub fn state(&self) -> &SharedSensorState {
        &self.state
    }
}

impl Device for SixenseDevice {
    fn name(&self) -> &str {
        HYDRA_DEVICE_NAME
    }

    fn source(&self) -> &str {
        SIXENSE_SOURCE
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn inputs(&self) -> &[InputHandle] {
        &self.inputs
    }

    fn update_input(&mut self) -> bool {
        self.poll()
    }

    fn clear_input_state(&mut self) {
        self.state.clear();
    }
}

/// Discovers Razer Hydra base stations over a [`HidTransport`].
pub struct SixenseBackend<T: HidTransport> {
    transport: T,
    config: SixenseBackendConfig,
}

impl<T: HidTransport> SixenseBackend<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, SixenseBackendConfig::default())
    }

    pub fn with_config(transport: T, config: SixenseBackendConfig) -> Self {
        Self { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// List device candidates without opening anything.
    pub fn candidates(&mut self) -> InputResult<Vec<InterfacePair>> {
        let interfaces = self
            .transport
            .enumerate(self.config.vendor_id, self.config.product_id)?;
        Ok(pair_interfaces(&interfaces))
    }

    /// Open both channels of one candidate.
    pub fn acquire(&mut self, pair: &InterfacePair) -> InputResult<SixenseDevice> {
        let open = |transport: &mut T, info: &HidInterfaceInfo| {
            transport
                .open_path(&info.path)
                .map_err(|e| InputError::DeviceUnavailable {
                    path: info.path.clone(),
                    reason: e.to_string(),
                })
        };

        let motion = open(&mut self.transport, &pair.motion)?;
        let gamepad = open(&mut self.transport, &pair.gamepad)?;
        SixenseDevice::new(pair.index, motion, gamepad)
    }
}

impl<T: HidTransport> DeviceBackend for SixenseBackend<T> {
    fn source(&self) -> &str {
        SIXENSE_SOURCE
    }

    fn discover(&mut self) -> Vec<Box<dyn Device>> {
        let pairs = match self.candidates() {
            Ok(pairs) => pairs,
            Err(e) => {
                warn!("Sixense enumeration failed: {}", e);
                return Vec::new();
            }
        };

        let mut devices: Vec<Box<dyn Device>> = Vec::with_capacity(pairs.len());
        for pair in &pairs {
            match self.acquire(pair) {
                Ok(device) => {
                    info!(
                        "Found {} #{} (motion {}, gamepad {})",
                        HYDRA_DEVICE_NAME, pair.index, pair.motion.path, pair.gamepad.path
                    );
                    devices.push(Box::new(device));
                }
                Err(e) => warn!("Skipping {} #{}: {}", HYDRA_DEVICE_NAME, pair.index, e),
            }
        }
        devices
    }
}
