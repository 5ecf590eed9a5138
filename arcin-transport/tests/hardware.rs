//! Integration tests against a real controller.
//!
//! These tests require an arcin controller to be connected.
//! Run with: cargo test -p arcin-transport --test hardware -- --ignored --nocapture

use arcin_transport::protocol::{report, REPORT_SIZE};
use arcin_transport::{FeatureTransport, HidDiscovery};

#[test]
fn list_devices_without_hardware() {
    // Enumeration itself must work even when nothing is plugged in
    let discovery = HidDiscovery::new();
    if let Ok(devices) = discovery.list_devices() {
        for device in devices {
            assert!(arcin_transport::is_supported(device.info.vid, device.info.pid));
        }
    }
}

#[test]
#[ignore] // requires hardware
fn config_report_has_full_size() {
    let discovery = HidDiscovery::new();
    let device = discovery
        .find_device(None)
        .expect("No controller found, plug in a supported device");
    println!("Using {}", device.info.display_name());

    let mut transport = discovery.open_device(&device);
    transport.open().expect("open failed");
    let data = transport
        .get_feature_report(report::CONFIG)
        .expect("get_feature_report failed");
    transport.close().expect("close failed");

    println!("{:02X?}", data);
    assert_eq!(data[0], report::CONFIG);
    assert_eq!(data.len(), REPORT_SIZE);
}
