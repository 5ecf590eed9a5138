//! Printer middleware for monitoring feature report traffic
//!
//! Wraps any `FeatureTransport` and prints every report passing through it
//! to stderr.
//!
//! # Example
//!
//! ```ignore
//! use arcin_transport::{HidFeatureTransport, Printer, PrinterConfig};
//!
//! let transport = HidFeatureTransport::new(device.info.clone());
//! let monitored = Printer::wrap(transport, PrinterConfig::default().with_hex(true));
//! // Now all reports will be printed
//! ```

use crossterm::style::Stylize;

use crate::protocol::{command, report, CONFIG_HEADER_SIZE};
use crate::{FeatureTransport, TransportDeviceInfo, TransportError};

/// Configuration for the Printer
#[derive(Debug, Clone, Default)]
pub struct PrinterConfig {
    /// Show raw hex dump alongside decoded output
    pub show_hex: bool,
}

impl PrinterConfig {
    /// Create config with hex output setting
    pub fn with_hex(mut self, show: bool) -> Self {
        self.show_hex = show;
        self
    }
}

/// Transport middleware that prints all reports
pub struct Printer<T> {
    inner: T,
    config: PrinterConfig,
}

impl<T: FeatureTransport> Printer<T> {
    /// Wrap a transport with printing middleware
    pub fn wrap(transport: T, config: PrinterConfig) -> Self {
        Self {
            inner: transport,
            config,
        }
    }

    fn print_hex(&self, data: &[u8]) {
        if self.config.show_hex {
            eprintln!("    {}  {:02x?}", "HEX".dim(), data);
        }
    }

    /// Print a report being sent
    fn print_send(&self, data: &[u8]) {
        eprintln!(
            "{} {}  {}",
            ">>>".cyan(),
            "SET".cyan().bold(),
            describe_report(data)
        );
        self.print_hex(data);
    }

    /// Print a report received
    fn print_get(&self, data: &[u8]) {
        eprintln!(
            "{} {}  {}",
            "<<<".green(),
            "GET".green().bold(),
            describe_report(data)
        );
        self.print_hex(data);
    }

    fn print_error(&self, what: &str, err: &TransportError) {
        eprintln!("{} {}  {}: {}", "!!!".red(), "ERR".red().bold(), what, err);
    }
}

/// One-line summary of a feature report
pub fn describe_report(data: &[u8]) -> String {
    match data {
        [] => "(empty)".to_string(),
        [report::CONFIG, segment, size, ..] => format!(
            "0x{:02x} {} segment={} size={} ({} bytes)",
            report::CONFIG,
            report::name(report::CONFIG).yellow(),
            segment,
            size,
            data.len().saturating_sub(CONFIG_HEADER_SIZE)
        ),
        [report::COMMAND, sub, ..] => format!(
            "0x{:02x} {} 0x{:02x} {}",
            report::COMMAND,
            report::name(report::COMMAND).yellow(),
            sub,
            command::name(*sub)
        ),
        [id, ..] => format!(
            "0x{:02x} {} ({} bytes)",
            id,
            report::name(*id).yellow(),
            data.len()
        ),
    }
}

impl<T: FeatureTransport> FeatureTransport for Printer<T> {
    fn open(&mut self) -> Result<(), TransportError> {
        let result = self.inner.open();
        match &result {
            Ok(()) => eprintln!(
                "{} {}  {}",
                "---".dim(),
                "OPEN".bold(),
                self.inner.device_info().device_path
            ),
            Err(e) => self.print_error("open", e),
        }
        result
    }

    fn close(&mut self) -> Result<(), TransportError> {
        let result = self.inner.close();
        match &result {
            Ok(()) => eprintln!("{} {}", "---".dim(), "CLOSE".bold()),
            Err(e) => self.print_error("close", e),
        }
        result
    }

    fn get_feature_report(&mut self, report_id: u8) -> Result<Vec<u8>, TransportError> {
        let result = self.inner.get_feature_report(report_id);
        match &result {
            Ok(data) => self.print_get(data),
            Err(e) => self.print_error(&format!("get 0x{report_id:02x}"), e),
        }
        result
    }

    fn send_feature_report(&mut self, data: &[u8]) -> Result<(), TransportError> {
        self.print_send(data);
        let result = self.inner.send_feature_report(data);
        if let Err(e) = &result {
            self.print_error("send", e);
        }
        result
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        self.inner.device_info()
    }
}
