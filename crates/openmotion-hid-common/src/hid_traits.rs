//! HID channel and transport traits

use crate::{HidCommonResult, HidInterfaceInfo};

/// A single opened HID interface delivering raw input reports.
///
/// Dropping the channel closes the underlying handle.
pub trait ReportChannel: Send {
    /// Switch the channel to non-blocking reads.
    fn set_nonblocking(&mut self) -> HidCommonResult<()>;

    /// Read at most one report into `buf`.
    ///
    /// Returns the number of bytes written to `buf`; `Ok(0)` means no report
    /// was pending on a non-blocking channel.
    fn read(&mut self, buf: &mut [u8]) -> HidCommonResult<usize>;

    fn path(&self) -> &str;
}

/// Enumerates interfaces and opens them by path.
pub trait HidTransport {
    /// List every interface matching the vendor/product pair, in the order
    /// the platform reports them.
    fn enumerate(&mut self, vendor_id: u16, product_id: u16)
    -> HidCommonResult<Vec<HidInterfaceInfo>>;

    fn open_path(&mut self, path: &str) -> HidCommonResult<Box<dyn ReportChannel>>;
}

pub mod mock {
    use super::*;
    use crate::HidCommonError;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    /// In-memory channel. Clones share the same report queue, so a test can
    /// keep one handle and feed reports after handing another to a device.
    #[derive(Clone)]
    pub struct MockReportChannel {
        path: String,
        read_queue: Arc<Mutex<VecDeque<HidCommonResult<Vec<u8>>>>>,
        nonblocking: Arc<AtomicBool>,
        connected: Arc<AtomicBool>,
    }

    impl MockReportChannel {
        pub fn new(path: impl Into<String>) -> Self {
            Self {
                path: path.into(),
                read_queue: Arc::new(Mutex::new(VecDeque::new())),
                nonblocking: Arc::new(AtomicBool::new(false)),
                connected: Arc::new(AtomicBool::new(true)),
            }
        }

        pub fn queue_read(&self, data: impl Into<Vec<u8>>) {
            let mut queue = self.read_queue.lock().unwrap_or_else(|e| e.into_inner());
            queue.push_back(Ok(data.into()));
        }

        pub fn queue_error(&self, error: HidCommonError) {
            let mut queue = self.read_queue.lock().unwrap_or_else(|e| e.into_inner());
            queue.push_back(Err(error));
        }

        pub fn pending(&self) -> usize {
            self.read_queue
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .len()
        }

        pub fn is_nonblocking(&self) -> bool {
            self.nonblocking.load(Ordering::Acquire)
        }

        pub fn disconnect(&self) {
            self.connected.store(false, Ordering::Release);
        }
    }

    impl ReportChannel for MockReportChannel {
        fn set_nonblocking(&mut self) -> HidCommonResult<()> {
            self.nonblocking.store(true, Ordering::Release);
            Ok(())
        }

        fn read(&mut self, buf: &mut [u8]) -> HidCommonResult<usize> {
            if !self.connected.load(Ordering::Acquire) {
                return Err(HidCommonError::Disconnected);
            }

            let mut queue = self.read_queue.lock().unwrap_or_else(|e| e.into_inner());
            match queue.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(report)) => {
                    // hidraw semantics: an oversized report is truncated to the buffer.
                    let count = report.len().min(buf.len());
                    if let (Some(dst), Some(src)) = (buf.get_mut(..count), report.get(..count)) {
                        dst.copy_from_slice(src);
                    }
                    Ok(count)
                }
            }
        }

        fn path(&self) -> &str {
            &self.path
        }
    }

    struct MockInterface {
        info: HidInterfaceInfo,
        channel: MockReportChannel,
        openable: bool,
    }

    /// Transport over a fixed list of mock interfaces.
    #[derive(Default)]
    pub struct MockHidTransport {
        interfaces: Vec<MockInterface>,
        open_count: usize,
    }

    impl MockHidTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register an interface and return a handle sharing its report queue.
        pub fn add_interface(&mut self, info: HidInterfaceInfo) -> MockReportChannel {
            let channel = MockReportChannel::new(info.path.clone());
            self.interfaces.push(MockInterface {
                info,
                channel: channel.clone(),
                openable: true,
            });
            channel
        }

        /// Register an interface whose `open_path` always fails.
        pub fn add_unopenable_interface(&mut self, info: HidInterfaceInfo) {
            let channel = MockReportChannel::new(info.path.clone());
            self.interfaces.push(MockInterface {
                info,
                channel,
                openable: false,
            });
        }

        pub fn interface_count(&self) -> usize {
            self.interfaces.len()
        }

        /// Number of successful `open_path` calls so far.
        pub fn open_count(&self) -> usize {
            self.open_count
        }
    }

    impl HidTransport for MockHidTransport {
        fn enumerate(
            &mut self,
            vendor_id: u16,
            product_id: u16,
        ) -> HidCommonResult<Vec<HidInterfaceInfo>> {
            Ok(self
                .interfaces
                .iter()
                .filter(|i| i.info.matches(vendor_id, product_id))
                .map(|i| i.info.clone())
                .collect())
        }

        fn open_path(&mut self, path: &str) -> HidCommonResult<Box<dyn ReportChannel>> {
            let interface = self
                .interfaces
                .iter()
                .find(|i| i.info.path == path)
                .ok_or_else(|| HidCommonError::DeviceNotFound(path.to_string()))?;

            if !interface.openable {
                return Err(HidCommonError::OpenError(format!(
                    "permission denied: {path}"
                )));
            }

            self.open_count = self.open_count.saturating_add(1);
            Ok(Box::new(interface.channel.clone()))
        }
    }
}
