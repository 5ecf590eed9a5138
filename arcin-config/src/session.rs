//! Device session protocol: open, exchange reports, close
//!
//! Every call opens the transport, performs one logical operation and
//! closes it again on all exit paths. A write is always the config report
//! followed by the restart command; the restart is only sent once the config
//! report went through.

use arcin_transport::protocol::{
    command, report, CONFIG_HEADER_SIZE, CONFIG_PAYLOAD_SIZE, CONFIG_SEGMENT, REPORT_SIZE,
};
use arcin_transport::FeatureTransport;
use tracing::{debug, info, warn};

use crate::codec::{self, ConfigurationRecord, CONFIG_SIZE};
use crate::error::ConfigError;

/// Command report asking the controller to restart with the new config
pub const RESTART_REPORT: [u8; 2] = [report::COMMAND, command::RESTART];

/// Open transport, closed again on drop
struct Session<'a, T: FeatureTransport + ?Sized> {
    transport: &'a mut T,
}

impl<'a, T: FeatureTransport + ?Sized> Session<'a, T> {
    fn open(transport: &'a mut T) -> Result<Self, ConfigError> {
        transport.open()?;
        debug!("Session opened on {}", transport.device_info().device_path);
        Ok(Self { transport })
    }
}

impl<T: FeatureTransport + ?Sized> Drop for Session<'_, T> {
    fn drop(&mut self) {
        if let Err(e) = self.transport.close() {
            warn!("Failed to close device: {e}");
        }
    }
}

/// Frame a payload as the 64-byte config report
pub fn build_config_report(payload: &[u8; CONFIG_SIZE]) -> [u8; REPORT_SIZE] {
    let mut buf = [0u8; REPORT_SIZE];
    buf[0] = report::CONFIG;
    buf[1] = CONFIG_SEGMENT;
    buf[2] = CONFIG_PAYLOAD_SIZE as u8;
    buf[CONFIG_HEADER_SIZE..].copy_from_slice(payload);
    buf
}

/// Extract the payload from a config report read back from the device
pub fn config_payload(data: &[u8]) -> Result<&[u8], ConfigError> {
    match data {
        [report::CONFIG, _segment, size, _pad, payload @ ..] if payload.len() >= CONFIG_SIZE => {
            if usize::from(*size) != CONFIG_PAYLOAD_SIZE {
                warn!("Config report announces {size} bytes, expected {CONFIG_PAYLOAD_SIZE}");
            }
            Ok(payload)
        }
        [report::CONFIG, ..] => Err(ConfigError::Decode(format!(
            "config report too short: {} bytes",
            data.len()
        ))),
        [id, ..] => Err(ConfigError::Decode(format!(
            "unexpected report 0x{id:02x}, expected 0x{:02x}",
            report::CONFIG
        ))),
        [] => Err(ConfigError::Decode("empty config report".into())),
    }
}

/// Read and decode the current configuration.
///
/// Nothing is returned unless the whole exchange and the decode succeed.
pub fn read_config<T: FeatureTransport + ?Sized>(
    transport: &mut T,
) -> Result<ConfigurationRecord, ConfigError> {
    let mut session = Session::open(transport)?;
    let data = session.transport.get_feature_report(report::CONFIG)?;
    debug!("Config report: {} bytes", data.len());
    let record = codec::decode(config_payload(&data)?)?;
    info!("Read configuration '{}'", record.label_text());
    Ok(record)
}

/// Encode and write a configuration, then restart the controller.
///
/// Format errors are raised before the transport is opened.
pub fn write_config<T: FeatureTransport + ?Sized>(
    transport: &mut T,
    record: &ConfigurationRecord,
) -> Result<(), ConfigError> {
    let payload = codec::encode(record)?;
    let config_report = build_config_report(&payload);

    let mut session = Session::open(transport)?;
    session.transport.send_feature_report(&config_report)?;
    debug!("Config report sent, restarting controller");
    session.transport.send_feature_report(&RESTART_REPORT)?;
    info!("Wrote configuration '{}'", record.label_text());
    Ok(())
}
