//! Command handlers for the CLI application.
//!
//! This module organizes command handlers by category:
//! - `query`: Read-only commands (list, show, export)
//! - `set`: Commands that write the device (apply, set, keys, rgb)
//! - `catalog`: Static tables (modes, palettes, keycodes)

pub mod catalog;
pub mod query;
pub mod set;

use anyhow::Context;
use arcin_config::Controller;
use arcin_transport::{BoxedTransport, HidDiscovery, PrinterConfig};

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// Which controller to talk to, and how
#[derive(Debug, Clone, Default)]
pub struct Target {
    pub serial: Option<String>,
    pub printer_config: Option<PrinterConfig>,
}

impl Target {
    fn discovery(&self) -> HidDiscovery {
        match &self.printer_config {
            Some(config) => HidDiscovery::with_printer_config(config.clone()),
            None => HidDiscovery::new(),
        }
    }

    /// Find the selected controller
    pub fn open(&self) -> anyhow::Result<Controller<BoxedTransport>> {
        Controller::find(&self.discovery(), self.serial.as_deref())
            .context("Could not select a controller")
    }
}

/// Create printer config if monitoring is enabled
pub fn create_printer_config(monitor: bool, hex: bool) -> Option<PrinterConfig> {
    monitor.then(|| PrinterConfig::default().with_hex(hex))
}
