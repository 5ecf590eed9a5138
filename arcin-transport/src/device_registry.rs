//! Device registry - controller identification by VID/PID
//!
//! The arcin firmware in "Infinitas" mode enumerates with the Konami
//! controller identifiers so that the official client accepts it.

/// Infinitas controller vendor ID
pub const VENDOR_ID: u16 = 0x1CCF;

/// Infinitas controller product ID
pub const PRODUCT_ID: u16 = 0x8048;

/// Vendor-defined usage page that carries the configuration segment
pub const CONFIG_USAGE_PAGE: u16 = 0xFF55;

/// Vendor usage identifying the configuration segment inside report 0xC0
pub const CONFIG_USAGE: u16 = 0xC0FF;

/// Check if a VID/PID pair is a supported controller
#[inline]
pub fn is_supported(vid: u16, pid: u16) -> bool {
    vid == VENDOR_ID && pid == PRODUCT_ID
}

/// Check if a HID usage page/usage pair is the configuration interface
#[inline]
pub fn is_config_usage(usage_page: u16, usage: u16) -> bool {
    usage_page == CONFIG_USAGE_PAGE && usage == CONFIG_USAGE
}
