//! hidapi transport for a directly attached controller

use std::ffi::CString;

use hidapi::{HidApi, HidDevice};
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::REPORT_SIZE;
use crate::types::TransportDeviceInfo;
use crate::FeatureTransport;

/// HID transport using feature reports on one hidraw/hid.dll device path
///
/// The device handle only exists between `open` and `close`.
pub struct HidFeatureTransport {
    /// Open handle, if any
    device: Option<HidDevice>,
    /// Device information
    info: TransportDeviceInfo,
}

impl HidFeatureTransport {
    /// Create a closed transport for a discovered device
    pub fn new(info: TransportDeviceInfo) -> Self {
        Self { device: None, info }
    }

    fn device(&self) -> Result<&HidDevice, TransportError> {
        self.device.as_ref().ok_or(TransportError::NotOpen)
    }
}

impl FeatureTransport for HidFeatureTransport {
    fn open(&mut self) -> Result<(), TransportError> {
        if self.device.is_some() {
            return Ok(());
        }
        let path = CString::new(self.info.device_path.as_bytes())
            .map_err(|e| TransportError::Internal(format!("Invalid device path: {e}")))?;
        let api = HidApi::new()?;
        let device = api.open_path(&path)?;
        debug!("Opened {}", self.info.device_path);
        self.device = Some(device);
        Ok(())
    }

    fn close(&mut self) -> Result<(), TransportError> {
        // HidDevice closes on drop
        if self.device.take().is_some() {
            debug!("Closed {}", self.info.device_path);
        }
        Ok(())
    }

    fn get_feature_report(&mut self, report_id: u8) -> Result<Vec<u8>, TransportError> {
        let device = self.device()?;
        let mut buf = vec![0u8; REPORT_SIZE];
        buf[0] = report_id;
        let len = device.get_feature_report(&mut buf)?;
        buf.truncate(len);
        debug!("Got feature report 0x{:02X} ({} bytes)", report_id, len);
        Ok(buf)
    }

    fn send_feature_report(&mut self, data: &[u8]) -> Result<(), TransportError> {
        let device = self.device()?;
        device.send_feature_report(data)?;
        debug!("Sent feature report: {:02X?}", &data[..data.len().min(8)]);
        Ok(())
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }
}

impl Drop for HidFeatureTransport {
    fn drop(&mut self) {
        if self.device.is_some() {
            debug!("HidFeatureTransport dropped while open, releasing handle");
        }
    }
}
