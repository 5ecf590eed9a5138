//! Device discovery for arcin controllers

use hidapi::HidApi;
use tracing::{debug, info};

use crate::device_registry;
use crate::error::TransportError;
use crate::hid_feature::HidFeatureTransport;
use crate::printer::{Printer, PrinterConfig};
use crate::types::{DiscoveredDevice, TransportDeviceInfo};
use crate::BoxedTransport;

/// HID device discovery by VID/PID
pub struct HidDiscovery {
    /// Optional printer config for monitoring mode - wraps transports automatically
    printer_config: Option<PrinterConfig>,
}

impl Default for HidDiscovery {
    fn default() -> Self {
        Self::new()
    }
}

impl HidDiscovery {
    /// Create a new HID discovery instance
    pub fn new() -> Self {
        Self { printer_config: None }
    }

    /// Create with printer config for monitoring mode
    /// All transports opened via open_device() will be wrapped with Printer
    pub fn with_printer_config(config: PrinterConfig) -> Self {
        Self {
            printer_config: Some(config),
        }
    }

    /// List currently attached controllers
    ///
    /// A composite controller can expose several HID paths. When one of them
    /// declares the vendor configuration usage, only that path is kept
    /// for the device.
    pub fn list_devices(&self) -> Result<Vec<DiscoveredDevice>, TransportError> {
        let api = HidApi::new()?;
        let mut devices: Vec<(DiscoveredDevice, bool)> = Vec::new();

        for device_info in api.device_list() {
            let vid = device_info.vendor_id();
            let pid = device_info.product_id();

            if !device_registry::is_supported(vid, pid) {
                continue;
            }

            let path = device_info.path().to_string_lossy().to_string();
            let serial = device_info.serial_number().map(|s| s.to_string());
            let product_name = device_info.product_string().map(|s| s.to_string());
            let is_config_interface =
                device_registry::is_config_usage(device_info.usage_page(), device_info.usage());

            debug!(
                "Found device: VID={:04X} PID={:04X} iface={} usage={:04X}:{:04X} path={}",
                vid,
                pid,
                device_info.interface_number(),
                device_info.usage_page(),
                device_info.usage(),
                path
            );

            if devices.iter().any(|(d, _)| d.info.device_path == path) {
                continue;
            }

            devices.push((
                DiscoveredDevice {
                    info: TransportDeviceInfo {
                        vid,
                        pid,
                        device_path: path,
                        interface_number: device_info.interface_number(),
                        serial,
                        product_name,
                    },
                },
                is_config_interface,
            ));
        }

        let devices = prefer_config_interfaces(devices);
        info!("Found {} devices", devices.len());
        Ok(devices)
    }

    /// Create a (closed) transport for a specific device
    pub fn open_device(&self, device: &DiscoveredDevice) -> BoxedTransport {
        let transport: BoxedTransport = Box::new(HidFeatureTransport::new(device.info.clone()));

        // Wrap with printer if monitoring is enabled
        match &self.printer_config {
            Some(config) => Box::new(Printer::wrap(transport, config.clone())),
            None => transport,
        }
    }

    /// Pick a device by serial number, or the first one when no serial is given
    pub fn find_device(&self, serial: Option<&str>) -> Result<DiscoveredDevice, TransportError> {
        let devices = self.list_devices()?;
        let found = match serial {
            Some(wanted) => devices
                .into_iter()
                .find(|d| d.info.serial.as_deref() == Some(wanted)),
            None => devices.into_iter().next(),
        };
        found.ok_or_else(|| {
            TransportError::DeviceNotFound(match serial {
                Some(s) => format!("No controller with serial {s}"),
                None => "No supported controller found".into(),
            })
        })
    }
}

/// Drop secondary paths of a device whose config interface was identified.
///
/// Devices are grouped by serial number; a group without any config
/// interface keeps all of its paths.
fn prefer_config_interfaces(devices: Vec<(DiscoveredDevice, bool)>) -> Vec<DiscoveredDevice> {
    let has_config = |serial: &Option<String>| {
        devices
            .iter()
            .any(|(d, is_config)| *is_config && &d.info.serial == serial)
    };
    devices
        .iter()
        .filter(|(d, is_config)| *is_config || !has_config(&d.info.serial))
        .map(|(d, _)| d.clone())
        .collect()
}
