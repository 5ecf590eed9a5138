//! Feature report constants for arcin controller communication

/// Feature report IDs
pub mod report {
    /// Configuration segment report (read and write)
    pub const CONFIG: u8 = 0xC0;
    /// Device command report
    pub const COMMAND: u8 = 0xB0;

    /// Get human-readable name for a report ID
    pub fn name(id: u8) -> &'static str {
        match id {
            CONFIG => "CONFIG",
            COMMAND => "COMMAND",
            _ => "UNKNOWN",
        }
    }
}

/// Sub-commands carried by the command report
pub mod command {
    /// Restart the controller so it applies the stored configuration
    pub const RESTART: u8 = 0x20;

    /// Get human-readable name for a sub-command
    pub fn name(sub: u8) -> &'static str {
        match sub {
            RESTART => "RESTART",
            _ => "UNKNOWN",
        }
    }
}

/// Full feature report size, including the report ID
pub const REPORT_SIZE: usize = 64;

/// Header of the config report: report id, segment, size, padding
pub const CONFIG_HEADER_SIZE: usize = 4;

/// Size of the configuration payload carried by one config report
pub const CONFIG_PAYLOAD_SIZE: usize = REPORT_SIZE - CONFIG_HEADER_SIZE;

/// The only configuration segment the firmware exposes
pub const CONFIG_SEGMENT: u8 = 0x00;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_fits_report() {
        assert_eq!(CONFIG_PAYLOAD_SIZE, 60);
        assert_eq!(CONFIG_PAYLOAD_SIZE as u8, 0x3C);
    }

    #[test]
    fn test_names() {
        assert_eq!(report::name(0xC0), "CONFIG");
        assert_eq!(report::name(0xB0), "COMMAND");
        assert_eq!(report::name(0x01), "UNKNOWN");
        assert_eq!(command::name(0x20), "RESTART");
    }
}
