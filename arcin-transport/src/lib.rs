//! Transport abstraction layer for arcin controller communication
//!
//! The controller exposes its configuration through HID feature reports.
//! This crate provides the synchronous transport the configuration core talks
//! to, a hidapi backend for it, and device listing by VID/PID.

pub mod device_registry;
pub mod error;
pub mod printer;
pub mod protocol;
pub mod types;

mod discovery;
mod hid_feature;

pub use device_registry::{is_supported, PRODUCT_ID, VENDOR_ID};
pub use error::TransportError;
pub use printer::{Printer, PrinterConfig};
pub use types::{DiscoveredDevice, TransportDeviceInfo};

pub use discovery::HidDiscovery;
pub use hid_feature::HidFeatureTransport;

/// The core transport trait - all backends implement this
///
/// Calls are synchronous and each one may fail. A transport starts closed;
/// `open` acquires the device handle and `close` releases it.
pub trait FeatureTransport {
    /// Acquire the device handle
    fn open(&mut self) -> Result<(), TransportError>;

    /// Release the device handle. Closing an already closed transport is a no-op.
    fn close(&mut self) -> Result<(), TransportError>;

    /// Fetch a feature report
    ///
    /// # Returns
    /// Report bytes, starting with the report ID
    fn get_feature_report(&mut self, report_id: u8) -> Result<Vec<u8>, TransportError>;

    /// Send a feature report (first byte is the report ID)
    fn send_feature_report(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;
}

impl<T: FeatureTransport + ?Sized> FeatureTransport for Box<T> {
    fn open(&mut self) -> Result<(), TransportError> {
        (**self).open()
    }

    fn close(&mut self) -> Result<(), TransportError> {
        (**self).close()
    }

    fn get_feature_report(&mut self, report_id: u8) -> Result<Vec<u8>, TransportError> {
        (**self).get_feature_report(report_id)
    }

    fn send_feature_report(&mut self, data: &[u8]) -> Result<(), TransportError> {
        (**self).send_feature_report(data)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        (**self).device_info()
    }
}

/// Type alias for a boxed transport
pub type BoxedTransport = Box<dyn FeatureTransport>;
