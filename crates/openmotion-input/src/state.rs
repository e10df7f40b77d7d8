//! Latest decoded sensor state shared between a device and its controls

use hid_sixense_protocol::{HydraReport, SENSOR_COUNT, SensorReport};
use parking_lot::RwLock;
use std::sync::Arc;

/// Most recent complete state of every sensor on one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorStateStore {
    sensors: [SensorReport; SENSOR_COUNT],
}

impl SensorStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every sensor block with the ones from `report`.
    pub fn apply(&mut self, report: &HydraReport) {
        self.sensors = report.sensors;
    }

    pub fn clear(&mut self) {
        self.sensors = [SensorReport::default(); SENSOR_COUNT];
    }

    pub fn sensor(&self, index: usize) -> Option<&SensorReport> {
        self.sensors.get(index)
    }

    pub fn sensors(&self) -> &[SensorReport; SENSOR_COUNT] {
        &self.sensors
    }
}

/// Handle to a [`SensorStateStore`] owned by one device.
///
/// The device writes through it on a successful poll; controls hold clones
/// and only read. Polling and reading are expected on one thread, so the
/// lock is never contended.
#[derive(Debug, Clone, Default)]
pub struct SharedSensorState {
    inner: Arc<RwLock<SensorStateStore>>,
}

impl SharedSensorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, report: &HydraReport) {
        self.inner.write().apply(report);
    }

    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Copy of one sensor's block; an out-of-range index reads as all zero.
    pub fn sensor(&self, index: usize) -> SensorReport {
        self.inner.read().sensor(index).copied().unwrap_or_default()
    }

    pub fn snapshot(&self) -> SensorStateStore {
        *self.inner.read()
    }
}
