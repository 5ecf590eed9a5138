//! arcin-conf: configuration tool for arcin-infinitas controllers
//!
//! The device protocol lives in `arcin-config`; this crate adds the
//! presentation layer: settings files and human-readable output.

pub mod display;
pub mod settings_file;

pub use settings_file::SettingsFileError;
