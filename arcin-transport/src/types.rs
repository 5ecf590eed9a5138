//! Common types for transport layer

use serde::Serialize;

/// Device identification information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// Device path or identifier (transport-specific)
    pub device_path: String,
    /// USB interface number (-1 if unknown)
    pub interface_number: i32,
    /// Serial number if available
    pub serial: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

impl TransportDeviceInfo {
    /// Short human-readable name: product name and serial when known
    pub fn display_name(&self) -> String {
        let product = self.product_name.as_deref().unwrap_or("Unknown device");
        match &self.serial {
            Some(serial) => format!("{product} ({serial})"),
            None => product.to_string(),
        }
    }
}

/// Discovered device that can be opened
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredDevice {
    /// Device information
    pub info: TransportDeviceInfo,
}
