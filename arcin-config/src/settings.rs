//! Human-facing controller settings

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codec::{ConfigurationRecord, LABEL_MAX};
use crate::error::ConfigError;
use crate::flags::config as cfg;
use crate::keycodes::KeyBindings;
use crate::rgb::RgbSettings;
use crate::translate::{
    sanitize_debounce, EffectorMapping, InputMode, LedMode, PollRate, Sensitivity, TurntableMode,
};

/// Everything the controller stores, in user terms.
///
/// `from_record` never fails; `to_record` validates anything that cannot be
/// represented on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    pub label: String,
    pub poll_rate: PollRate,
    pub turntable_mode: TurntableMode,
    pub input_mode: InputMode,
    pub led_mode: LedMode,
    pub select_multi_tap: bool,
    pub invert_qe1: bool,
    pub debounce: bool,
    pub debounce_ticks: u8,
    pub mode_switching: bool,
    pub led_off: bool,
    pub ws2812b: bool,
    pub sensitivity: Sensitivity,
    pub effectors: EffectorMapping,
    pub keys: KeyBindings,
    pub rgb: RgbSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_record(&ConfigurationRecord::default())
    }
}

impl Settings {
    pub fn from_record(record: &ConfigurationRecord) -> Self {
        let flags = record.flags;
        if !record.label_is_utf8() {
            warn!(
                "Label {:02x?} is not valid UTF-8, showing it as '{}'",
                record.label,
                record.label_text()
            );
        }
        Self {
            label: record.label_text(),
            poll_rate: PollRate::from_flags(flags),
            turntable_mode: TurntableMode::from_flags(flags),
            input_mode: InputMode::from_flags(flags),
            led_mode: LedMode::from_flags(flags),
            select_multi_tap: flags & cfg::SEL_MULTI_TAP != 0,
            invert_qe1: flags & cfg::INVERT_QE1 != 0,
            debounce: flags & cfg::DEBOUNCE != 0,
            debounce_ticks: sanitize_debounce(record.debounce_ticks),
            mode_switching: flags & cfg::MODE_SWITCHING_ENABLE != 0,
            led_off: flags & cfg::LED_OFF != 0,
            ws2812b: flags & cfg::WS2812B != 0,
            sensitivity: Sensitivity::from_raw(record.turntable_sensitivity_primary),
            effectors: EffectorMapping::from_bytes(record.remap_start_select, record.remap_b8_b9),
            keys: KeyBindings(record.keycodes),
            rgb: RgbSettings::from_record(&record.rgb),
        }
    }

    /// Build a fresh record from these settings.
    ///
    /// Flags are rebuilt from scratch, so the retired bit and any unknown
    /// bits are always cleared.
    pub fn to_record(&self) -> Result<ConfigurationRecord, ConfigError> {
        self.build_record(self.label_bytes()?)
    }

    /// Apply these settings on top of an existing record.
    ///
    /// Unlike `to_record`, wire fields the settings model does not cover
    /// (secondary sensitivity, reserved keycode slots) are carried over. An
    /// unedited label keeps the raw bytes of `base`, even when they are not
    /// valid UTF-8.
    pub fn merge_into(&self, base: &ConfigurationRecord) -> Result<ConfigurationRecord, ConfigError> {
        let label = if self.label == base.label_text() {
            base.label.clone()
        } else {
            self.label_bytes()?
        };
        let mut record = self.build_record(label)?;
        record.turntable_sensitivity_secondary = base.turntable_sensitivity_secondary;
        record.keycodes_reserved = base.keycodes_reserved;
        Ok(record)
    }

    fn label_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        if self.label.len() > LABEL_MAX {
            return Err(ConfigError::Format(format!(
                "label '{}' is {} bytes, at most {LABEL_MAX} allowed",
                self.label,
                self.label.len()
            )));
        }
        Ok(self.label.as_bytes().to_vec())
    }

    fn build_record(&self, label: Vec<u8>) -> Result<ConfigurationRecord, ConfigError> {
        let mut flags = 0;
        for (enabled, bit) in [
            (self.select_multi_tap, cfg::SEL_MULTI_TAP),
            (self.invert_qe1, cfg::INVERT_QE1),
            (self.debounce, cfg::DEBOUNCE),
            (self.mode_switching, cfg::MODE_SWITCHING_ENABLE),
            (self.led_off, cfg::LED_OFF),
            (self.ws2812b, cfg::WS2812B),
        ] {
            if enabled {
                flags |= bit;
            }
        }
        flags = self.poll_rate.apply(flags);
        flags = self.turntable_mode.apply(flags);
        flags = self.input_mode.apply(flags);
        flags = self.led_mode.apply(flags);

        let (remap_start_select, remap_b8_b9) = self.effectors.to_bytes();

        Ok(ConfigurationRecord {
            label,
            flags,
            turntable_sensitivity_primary: self.sensitivity.raw(),
            turntable_sensitivity_secondary: 0,
            debounce_ticks: sanitize_debounce(self.debounce_ticks),
            keycodes: self.keys.0,
            keycodes_reserved: [0; 3],
            remap_start_select,
            remap_b8_b9,
            rgb: self.rgb.to_record()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::RgbColor;
    use crate::keycodes::KeyPreset;
    use crate::translate::Effector;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.label, "");
        assert_eq!(settings.poll_rate, PollRate::Hz1000);
        assert_eq!(settings.turntable_mode, TurntableMode::AnalogOnly);
        assert_eq!(settings.sensitivity.ratio(), "1:1");
        assert_eq!(settings.debounce_ticks, 2);
        assert_eq!(settings.rgb.num_leds, 12);
        assert_eq!(settings.rgb.brightness, 255);
        assert_eq!(settings.to_record().unwrap(), ConfigurationRecord::default());
    }

    #[test]
    fn test_record_roundtrip() {
        let mut settings = Settings::default();
        settings.label = "arcin".into();
        settings.poll_rate = PollRate::Hz250;
        settings.turntable_mode = TurntableMode::Both;
        settings.input_mode = InputMode::KeyboardOnly;
        settings.led_mode = LedMode::Reactive;
        settings.invert_qe1 = true;
        settings.debounce = true;
        settings.debounce_ticks = 6;
        settings.ws2812b = true;
        settings.sensitivity = "1:8".parse().unwrap();
        settings.effectors.start = Effector::E3;
        settings.keys = KeyPreset::Letters.bindings();
        settings.rgb.colors[0] = RgbColor::new(1, 2, 3);

        let record = settings.to_record().unwrap();
        assert_eq!(record.turntable_sensitivity_primary, -8);
        assert_eq!(record.remap_start_select, 0x32);
        assert_eq!(
            record.flags,
            cfg::POLL_250HZ
                | cfg::DIGITAL_TT_ENABLE
                | cfg::ANALOG_TT_FORCE_ENABLE
                | cfg::KEYBOARD_ENABLE
                | cfg::JOYINPUT_DISABLE
                | cfg::TT_LED_REACTIVE
                | cfg::INVERT_QE1
                | cfg::DEBOUNCE
                | cfg::WS2812B
        );
        assert_eq!(Settings::from_record(&record), settings);
    }

    #[test]
    fn test_retired_bit_cleared() {
        let mut record = ConfigurationRecord::default();
        record.flags = cfg::RETIRED_SWAP_8_9 | cfg::INVERT_QE1 | (1 << 30);
        let rebuilt = Settings::from_record(&record).to_record().unwrap();
        assert_eq!(rebuilt.flags, cfg::INVERT_QE1);
    }

    #[test]
    fn test_label_too_long() {
        let mut settings = Settings::default();
        settings.label = "thirteen char".into();
        assert!(settings.to_record().unwrap_err().is_format());
    }

    #[test]
    fn test_debounce_out_of_range() {
        let mut record = ConfigurationRecord::default();
        record.debounce_ticks = 0;
        assert_eq!(Settings::from_record(&record).debounce_ticks, 2);

        let mut settings = Settings::default();
        settings.debounce_ticks = 50;
        assert_eq!(settings.to_record().unwrap().debounce_ticks, 2);
    }

    #[test]
    fn test_merge_keeps_uncovered_fields() {
        let mut base = ConfigurationRecord::default();
        base.turntable_sensitivity_secondary = 3;
        base.keycodes_reserved = [9, 8, 7];
        let merged = Settings::from_record(&base).merge_into(&base).unwrap();
        assert_eq!(merged, base);
    }

    #[test]
    fn test_merge_keeps_split_label_bytes() {
        let mut base = ConfigurationRecord::default();
        base.label = "aビートマニ".as_bytes()[..LABEL_MAX].to_vec();

        let mut settings = Settings::from_record(&base);
        assert_eq!(settings.label, "aビート");
        settings.invert_qe1 = true;
        let merged = settings.merge_into(&base).unwrap();
        assert_eq!(merged.label, base.label);
        assert_eq!(merged.flags, cfg::INVERT_QE1);

        // An edited label replaces the raw bytes
        settings.label = "P1".into();
        assert_eq!(settings.merge_into(&base).unwrap().label, b"P1");

        // A fresh record uses the valid text
        assert_eq!(
            Settings::from_record(&base).to_record().unwrap().label,
            "aビート".as_bytes()
        );
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut settings = Settings::default();
        settings.label = "TEST".into();
        settings.keys = KeyPreset::Djmax1p.bindings();
        settings.sensitivity = "2:1".parse().unwrap();

        let text = toml::to_string(&settings).unwrap();
        assert!(text.contains("label = \"TEST\""));
        assert!(text.contains("poll-rate = \"1000hz\""));
        assert!(text.contains("sensitivity = \"2:1\""));
        assert!(text.contains("tt-ccw = \"UP\""));

        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, settings);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: Settings = toml::from_str(
            r#"
            label = "mini"
            turntable-mode = "digital-only"

            [keys]
            b1 = "a"

            [rgb]
            mode = 6
            "#,
        )
        .unwrap();
        assert_eq!(parsed.label, "mini");
        assert_eq!(parsed.turntable_mode, TurntableMode::DigitalOnly);
        assert_eq!(parsed.keys.0[0], 0x04);
        assert_eq!(parsed.keys.0[1], 0);
        assert_eq!(parsed.rgb.mode, 6);
        assert_eq!(parsed.rgb.num_leds, 12);
        assert_eq!(parsed.debounce_ticks, 2);
    }
}
