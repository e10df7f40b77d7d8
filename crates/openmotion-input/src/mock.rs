//! In-memory devices for hosts and tests that need controls without
//! hardware.

use crate::control::{ControlState, Input, InputHandle};
use crate::device::Device;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A control whose value is set directly. Clones share the value.
#[derive(Clone)]
pub struct MockInput {
    name: Arc<str>,
    bits: Arc<AtomicU64>,
}

impl MockInput {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            bits: Arc::new(AtomicU64::new(0.0f64.to_bits())),
        }
    }

    pub fn set(&self, value: ControlState) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}

impl Input for MockInput {
    fn name(&self) -> &str {
        &self.name
    }

    fn state(&self) -> ControlState {
        f64::from_bits(self.bits.load(Ordering::Acquire))
    }
}

pub struct MockDevice {
    source: String,
    id: u32,
    name: String,
    mocks: Vec<MockInput>,
    inputs: Vec<InputHandle>,
    updates: u64,
}

impl MockDevice {
    pub fn new(source: impl Into<String>, id: u32, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            id,
            name: name.into(),
            mocks: Vec::new(),
            inputs: Vec::new(),
            updates: 0,
        }
    }

    pub fn with_input(mut self, input: MockInput) -> Self {
        self.mocks.push(input.clone());
        self.inputs.push(Arc::new(input));
        self
    }

    /// Number of `update_input` calls received.
    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl Device for MockDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn inputs(&self) -> &[InputHandle] {
        &self.inputs
    }

    fn update_input(&mut self) -> bool {
        self.updates = self.updates.saturating_add(1);
        true
    }

    fn clear_input_state(&mut self) {
        for input in &self.mocks {
            input.set(0.0);
        }
    }
}
