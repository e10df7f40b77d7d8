//! hidapi-backed transport

use crate::{HidCommonError, HidCommonResult, HidInterfaceInfo, HidTransport, ReportChannel};
use hidapi::{HidApi, HidDevice};
use std::ffi::CString;
use tracing::debug;

pub struct HidapiTransport {
    api: HidApi,
}

impl HidapiTransport {
    pub fn new() -> HidCommonResult<Self> {
        let api = HidApi::new().map_err(|e| HidCommonError::OpenError(e.to_string()))?;
        Ok(Self { api })
    }
}

impl HidTransport for HidapiTransport {
    fn enumerate(
        &mut self,
        vendor_id: u16,
        product_id: u16,
    ) -> HidCommonResult<Vec<HidInterfaceInfo>> {
        self.api
            .refresh_devices()
            .map_err(|e| HidCommonError::ReadError(e.to_string()))?;

        let interfaces: Vec<HidInterfaceInfo> = self
            .api
            .device_list()
            .filter(|d| d.vendor_id() == vendor_id && d.product_id() == product_id)
            .map(|d| {
                let mut info = HidInterfaceInfo::new(
                    d.vendor_id(),
                    d.product_id(),
                    d.interface_number(),
                    d.path().to_string_lossy().into_owned(),
                );
                if let Some(serial) = d.serial_number() {
                    info = info.with_serial(serial);
                }
                if let Some(product) = d.product_string() {
                    info = info.with_product_name(product);
                }
                info
            })
            .collect();

        debug!(
            "Enumerated {} interfaces for {:04x}:{:04x}",
            interfaces.len(),
            vendor_id,
            product_id
        );
        Ok(interfaces)
    }

    fn open_path(&mut self, path: &str) -> HidCommonResult<Box<dyn ReportChannel>> {
        let c_path = CString::new(path)
            .map_err(|e| HidCommonError::OpenError(format!("{path}: {e}")))?;
        let device = self
            .api
            .open_path(&c_path)
            .map_err(|e| HidCommonError::OpenError(format!("{path}: {e}")))?;

        Ok(Box::new(HidapiChannel {
            device,
            path: path.to_string(),
        }))
    }
}

pub struct HidapiChannel {
    device: HidDevice,
    path: String,
}

impl ReportChannel for HidapiChannel {
    fn set_nonblocking(&mut self) -> HidCommonResult<()> {
        self.device
            .set_blocking_mode(false)
            .map_err(|e| HidCommonError::ReadError(format!("{}: {e}", self.path)))
    }

    fn read(&mut self, buf: &mut [u8]) -> HidCommonResult<usize> {
        self.device
            .read(buf)
            .map_err(|e| HidCommonError::ReadError(format!("{}: {e}", self.path)))
    }

    fn path(&self) -> &str {
        &self.path
    }
}
