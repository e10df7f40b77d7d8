//! Device registry and named-control lookup

use crate::control::InputHandle;
use crate::device::{Device, DeviceQualifier};
use tracing::{debug, info};

/// Opaque handle of the window/surface the host renders into. Backends
/// that need a window for their platform APIs receive it at initialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceHandle(u64);

impl SurfaceHandle {
    pub const NONE: SurfaceHandle = SurfaceHandle(0);

    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A source of devices, e.g. one vendor's HID discovery.
pub trait DeviceBackend {
    fn source(&self) -> &str;

    /// Find and acquire every available device. Candidates that cannot be
    /// acquired are skipped.
    fn discover(&mut self) -> Vec<Box<dyn Device>>;

    fn shutdown(&mut self) {}
}

/// Lookup of named controls across every registered device.
pub trait InputRegistry {
    fn initialize(&mut self, surface: SurfaceHandle);

    fn shutdown(&mut self);

    /// Find a control by exact name. With a filter only the matching device
    /// is searched; otherwise devices are searched in registration order.
    fn find_input(&self, name: &str, filter: Option<&DeviceQualifier>) -> Option<InputHandle>;
}

#[derive(Default)]
pub struct DeviceRegistry {
    backends: Vec<Box<dyn DeviceBackend>>,
    devices: Vec<Box<dyn Device>>,
    surface: Option<SurfaceHandle>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: impl DeviceBackend + 'static) -> Self {
        self.backends.push(Box::new(backend));
        self
    }

    /// Register a device that was created outside any backend.
    pub fn add_device(&mut self, device: Box<dyn Device>) {
        debug!("Registered device {}", device.qualifier());
        self.devices.push(device);
    }

    pub fn devices(&self) -> &[Box<dyn Device>] {
        &self.devices
    }

    pub fn device(&self, qualifier: &DeviceQualifier) -> Option<&dyn Device> {
        self.devices
            .iter()
            .map(|d| &**d)
            .find(|d| qualifier.matches(*d))
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.surface
    }

    /// Poll every device once. Returns how many produced fresh data.
    pub fn update_input(&mut self) -> usize {
        self.devices
            .iter_mut()
            .map(|d| d.update_input())
            .filter(|updated| *updated)
            .count()
    }

    /// Push output to every device. Returns `true` only if all accepted it.
    pub fn update_output(&mut self) -> bool {
        self.devices
            .iter_mut()
            .fold(true, |ok, d| d.update_output() && ok)
    }
}

impl InputRegistry for DeviceRegistry {
    fn initialize(&mut self, surface: SurfaceHandle) {
        if self.surface.is_some() {
            return;
        }
        self.surface = Some(surface);

        for backend in &mut self.backends {
            let found = backend.discover();
            info!("{} backend found {} device(s)", backend.source(), found.len());
            self.devices.extend(found);
        }
    }

    fn shutdown(&mut self) {
        // Dropping the devices closes their channels.
        self.devices.clear();
        for backend in &mut self.backends {
            backend.shutdown();
        }
        self.surface = None;
    }

    fn find_input(&self, name: &str, filter: Option<&DeviceQualifier>) -> Option<InputHandle> {
        self.devices
            .iter()
            .map(|d| &**d)
            .filter(|d| filter.is_none_or(|q| q.matches(*d)))
            .find_map(|d| d.find_input(name))
            .cloned()
    }
}
