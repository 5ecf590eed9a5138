//! Configuration core for arcin-infinitas controllers
//!
//! This crate owns the 60-byte configuration record: its wire codec, the
//! translation between raw flag bits and user-level settings, and the
//! session protocol that reads it from or writes it to a device through any
//! `FeatureTransport`.

pub mod codec;
pub mod error;
pub mod flags;
pub mod keycodes;
pub mod rgb;
pub mod session;
pub mod settings;
pub mod translate;

pub use codec::{decode, encode, ConfigurationRecord, RgbColor, RgbRecord, CONFIG_SIZE};
pub use error::ConfigError;
pub use keycodes::{Key, KeyBindings, KeyPreset};
pub use rgb::{FadeOut, IdleUnit, RgbModeDescriptor, RgbSettings, PALETTES, RGB_MODES};
pub use session::{read_config, write_config, RESTART_REPORT};
pub use settings::Settings;
pub use translate::{
    Effector, EffectorMapping, InputMode, LedMode, PollRate, Sensitivity, TurntableMode,
};

use arcin_transport::{
    BoxedTransport, DiscoveredDevice, FeatureTransport, HidDiscovery, TransportDeviceInfo,
};
use tracing::debug;

/// List all attached controllers
pub fn list_controllers() -> Result<Vec<DiscoveredDevice>, ConfigError> {
    Ok(HidDiscovery::new().list_devices()?)
}

/// Configuration interface for one controller
///
/// Each call is a complete device session: the transport is opened for the
/// call and closed before it returns.
pub struct Controller<T: FeatureTransport> {
    transport: T,
}

impl Controller<BoxedTransport> {
    /// Find a controller (by serial, or the first one) and wrap its transport
    pub fn find(discovery: &HidDiscovery, serial: Option<&str>) -> Result<Self, ConfigError> {
        let device = discovery.find_device(serial)?;
        debug!("Selected {}", device.info.display_name());
        Ok(Self::new(discovery.open_device(&device)))
    }
}

impl<T: FeatureTransport> Controller<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn device_info(&self) -> &TransportDeviceInfo {
        self.transport.device_info()
    }

    /// Read the raw configuration record
    pub fn read_record(&mut self) -> Result<ConfigurationRecord, ConfigError> {
        read_config(&mut self.transport)
    }

    /// Write a raw configuration record and restart the controller
    pub fn write_record(&mut self, record: &ConfigurationRecord) -> Result<(), ConfigError> {
        write_config(&mut self.transport, record)
    }

    pub fn read_settings(&mut self) -> Result<Settings, ConfigError> {
        Ok(Settings::from_record(&self.read_record()?))
    }

    /// Replace the whole configuration with `settings`
    pub fn write_settings(&mut self, settings: &Settings) -> Result<(), ConfigError> {
        self.write_record(&settings.to_record()?)
    }

    /// Read, modify and write back the configuration.
    ///
    /// Nothing is written if `edit` fails. Returns the settings that were
    /// written.
    pub fn update<F>(&mut self, edit: F) -> Result<Settings, ConfigError>
    where
        F: FnOnce(&mut Settings) -> Result<(), ConfigError>,
    {
        let base = self.read_record()?;
        let mut settings = Settings::from_record(&base);
        edit(&mut settings)?;
        self.write_record(&settings.merge_into(&base)?)?;
        Ok(settings)
    }

    /// Unwrap the inner transport
    pub fn into_inner(self) -> T {
        self.transport
    }
}
