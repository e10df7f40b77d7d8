//! Device IDs for Sixense products
//!
//! The Razer Hydra is the only shipping Sixense-based controller and uses
//! Razer's VID. It enumerates as a composite device with two HID interfaces.

pub const SIXENSE_VENDOR_ID: u16 = 0x1532;

/// Razer Hydra base station.
pub const RAZER_HYDRA_PID: u16 = 0x0300;

/// Interface streaming motion reports.
pub const MOTION_INTERFACE: i32 = 0;
/// Interface carrying the gamepad mirror of the buttons.
pub const GAMEPAD_INTERFACE: i32 = 1;

pub const HYDRA_DEVICE_NAME: &str = "Razer Hydra";
pub const SIXENSE_SOURCE: &str = "Sixense";

pub fn is_razer_hydra(vendor_id: u16, product_id: u16) -> bool {
    vendor_id == SIXENSE_VENDOR_ID && product_id == RAZER_HYDRA_PID
}
