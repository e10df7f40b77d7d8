//! Interface descriptors yielded by HID enumeration

use serde::{Deserialize, Serialize};

/// One enumerated HID interface.
///
/// Composite devices show up as several of these sharing a vendor/product
/// pair and differing in `interface_number` and `path`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HidInterfaceInfo {
    pub vendor_id: u16,
    pub product_id: u16,
    pub interface_number: i32,
    pub path: String,
    pub serial_number: Option<String>,
    pub product_name: Option<String>,
}

impl HidInterfaceInfo {
    pub fn new(vendor_id: u16, product_id: u16, interface_number: i32, path: impl Into<String>) -> Self {
        Self {
            vendor_id,
            product_id,
            interface_number,
            path: path.into(),
            serial_number: None,
            product_name: None,
        }
    }

    pub fn with_serial(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    pub fn with_product_name(mut self, name: impl Into<String>) -> Self {
        self.product_name = Some(name.into());
        self
    }

    pub fn matches(&self, vendor_id: u16, product_id: u16) -> bool {
        self.vendor_id == vendor_id && self.product_id == product_id
    }

    pub fn display_name(&self) -> String {
        self.product_name.clone().unwrap_or_else(|| {
            format!(
                "{:04x}:{:04x} if{}",
                self.vendor_id, self.product_id, self.interface_number
            )
        })
    }
}
