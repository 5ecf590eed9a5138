//! Mapping between human-level settings and raw flag bits / bytes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::flags::config as cfg;

/// Default effector ids for start, select, B8, B9
pub const DEFAULT_EFFECTOR_MAPPING: [u8; 4] = [1, 2, 3, 4];

/// Valid debounce window range in ticks
pub const DEBOUNCE_RANGE: std::ops::RangeInclusive<u8> = 2..=10;

/// Implements `name()`, `ALL`, `Display` and `FromStr` for a settings enum
/// whose variants map to fixed CLI names.
macro_rules! named_enum {
    ($ty:ident { $($variant:ident => $name:literal, $label:literal;)+ }) => {
        impl $ty {
            /// All variants, in display order
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Short machine name
            pub fn name(self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }

            /// Human-readable description
            pub fn label(self) -> &'static str {
                match self {
                    $($ty::$variant => $label,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    _ => {
                        let names: Vec<_> = Self::ALL.iter().map(|v| v.name()).collect();
                        Err(format!("unknown value '{s}', expected one of: {}", names.join(", ")))
                    }
                }
            }
        }
    };
}

/// USB poll rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollRate {
    #[default]
    #[serde(rename = "1000hz")]
    Hz1000,
    #[serde(rename = "250hz")]
    Hz250,
}

named_enum!(PollRate {
    Hz1000 => "1000hz", "1000 Hz";
    Hz250 => "250hz", "250 Hz";
});

impl PollRate {
    pub fn from_flags(flags: u32) -> Self {
        if flags & cfg::POLL_250HZ != 0 {
            Self::Hz250
        } else {
            Self::Hz1000
        }
    }

    /// Replace the poll rate bit in `flags`
    pub fn apply(self, flags: u32) -> u32 {
        match self {
            Self::Hz1000 => flags & !cfg::POLL_250HZ,
            Self::Hz250 => flags | cfg::POLL_250HZ,
        }
    }
}

/// Turntable reporting mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TurntableMode {
    #[default]
    AnalogOnly,
    DigitalOnly,
    Both,
}

named_enum!(TurntableMode {
    AnalogOnly => "analog-only", "Analog only (Infinitas)";
    DigitalOnly => "digital-only", "Digital only (LR2)";
    Both => "both", "Both analog and digital";
});

impl TurntableMode {
    const BITS: u32 = cfg::DIGITAL_TT_ENABLE | cfg::ANALOG_TT_FORCE_ENABLE;

    pub fn from_flags(flags: u32) -> Self {
        let digital = flags & cfg::DIGITAL_TT_ENABLE != 0;
        let analog_force = flags & cfg::ANALOG_TT_FORCE_ENABLE != 0;
        match (digital, analog_force) {
            (true, true) => Self::Both,
            (true, false) => Self::DigitalOnly,
            _ => Self::AnalogOnly,
        }
    }

    /// Replace the turntable bits in `flags`
    pub fn apply(self, flags: u32) -> u32 {
        let bits = match self {
            Self::AnalogOnly => 0,
            Self::DigitalOnly => cfg::DIGITAL_TT_ENABLE,
            Self::Both => cfg::DIGITAL_TT_ENABLE | cfg::ANALOG_TT_FORCE_ENABLE,
        };
        (flags & !Self::BITS) | bits
    }
}

/// Which USB interfaces report button input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputMode {
    #[default]
    ControllerOnly,
    KeyboardOnly,
    Both,
}

named_enum!(InputMode {
    ControllerOnly => "controller-only", "Controller only";
    KeyboardOnly => "keyboard-only", "Keyboard only";
    Both => "both", "Both";
});

impl InputMode {
    const BITS: u32 = cfg::KEYBOARD_ENABLE | cfg::JOYINPUT_DISABLE;

    pub fn from_flags(flags: u32) -> Self {
        let keyboard = flags & cfg::KEYBOARD_ENABLE != 0;
        let joy_disable = flags & cfg::JOYINPUT_DISABLE != 0;
        match (keyboard, joy_disable) {
            (true, true) => Self::KeyboardOnly,
            (true, false) => Self::Both,
            _ => Self::ControllerOnly,
        }
    }

    /// Replace the input mode bits in `flags`
    pub fn apply(self, flags: u32) -> u32 {
        let bits = match self {
            Self::ControllerOnly => 0,
            Self::KeyboardOnly => cfg::KEYBOARD_ENABLE | cfg::JOYINPUT_DISABLE,
            Self::Both => cfg::KEYBOARD_ENABLE,
        };
        (flags & !Self::BITS) | bits
    }
}

/// Turntable LED behavior
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LedMode {
    #[default]
    Default,
    Reactive,
    Hid,
}

named_enum!(LedMode {
    Default => "default", "Default";
    Reactive => "reactive", "React to QE1 turntable";
    Hid => "hid", "HID-controlled";
});

impl LedMode {
    const BITS: u32 = cfg::TT_LED_REACTIVE | cfg::TT_LED_HID;

    pub fn from_flags(flags: u32) -> Self {
        if flags & cfg::TT_LED_REACTIVE != 0 {
            Self::Reactive
        } else if flags & cfg::TT_LED_HID != 0 {
            Self::Hid
        } else {
            Self::Default
        }
    }

    /// Replace the LED mode bits in `flags`
    pub fn apply(self, flags: u32) -> u32 {
        let bits = match self {
            Self::Default => 0,
            Self::Reactive => cfg::TT_LED_REACTIVE,
            Self::Hid => cfg::TT_LED_HID,
        };
        (flags & !Self::BITS) | bits
    }
}

/// Turntable sensitivity ratios and their wire values, in display order
pub const SENSITIVITY_TABLE: &[(&str, i8)] = &[
    ("1:1", 0),
    ("1:2", -2),
    ("1:3", -3),
    ("1:4", -4),
    ("1:6", -6),
    ("1:8", -8),
    ("1:11", -11),
    ("1:16", -16),
    ("2:1", 2),
    ("3:1", 3),
    ("4:1", 4),
    ("6:1", 6),
    ("8:1", 8),
    ("11:1", 11),
    ("16:1", 16),
];

/// Entry used for unknown ratios and raw values
const SENSITIVITY_FALLBACK: usize = 3;

/// Turntable sensitivity, always one of `SENSITIVITY_TABLE`. Defaults to 1:1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Sensitivity(usize);

impl Sensitivity {
    /// Decode a wire value; unknown values fall back to 1:4
    pub fn from_raw(raw: i8) -> Self {
        match SENSITIVITY_TABLE.iter().position(|&(_, v)| v == raw) {
            Some(index) => Self(index),
            None => {
                warn!("Unknown turntable sensitivity {raw}, using 1:4");
                Self(SENSITIVITY_FALLBACK)
            }
        }
    }

    /// Look up a ratio name such as "1:4"
    pub fn from_ratio(ratio: &str) -> Option<Self> {
        SENSITIVITY_TABLE
            .iter()
            .position(|&(name, _)| name == ratio.trim())
            .map(Self)
    }

    /// Look up a ratio name, falling back to 1:4 when unknown
    pub fn from_ratio_or_fallback(ratio: &str) -> Self {
        Self::from_ratio(ratio).unwrap_or_else(|| {
            warn!("Unknown turntable sensitivity '{ratio}', using 1:4");
            Self(SENSITIVITY_FALLBACK)
        })
    }

    pub fn ratio(self) -> &'static str {
        SENSITIVITY_TABLE[self.0].0
    }

    pub fn raw(self) -> i8 {
        SENSITIVITY_TABLE[self.0].1
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ratio())
    }
}

impl FromStr for Sensitivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_ratio(s).ok_or_else(|| {
            let names: Vec<_> = SENSITIVITY_TABLE.iter().map(|(n, _)| *n).collect();
            format!("unknown ratio '{s}', expected one of: {}", names.join(", "))
        })
    }
}

impl From<Sensitivity> for String {
    fn from(s: Sensitivity) -> Self {
        s.ratio().to_string()
    }
}

impl From<String> for Sensitivity {
    fn from(s: String) -> Self {
        Self::from_ratio_or_fallback(&s)
    }
}

/// Pack two effector ids into one byte, high nibble first
pub fn pack_remap(high: u8, low: u8) -> Result<u8, ConfigError> {
    for id in [high, low] {
        if !(1..=4).contains(&id) {
            return Err(ConfigError::Format(format!(
                "effector id {id} out of range 1-4"
            )));
        }
    }
    Ok((high << 4) | low)
}

/// Unpack a remap byte; unset or invalid nibbles take the given defaults
pub fn unpack_remap(packed: u8, defaults: [u8; 2]) -> (u8, u8) {
    let resolve = |nibble: u8, default: u8| match nibble {
        1..=4 => nibble,
        0 => default,
        _ => {
            warn!("Invalid effector id {nibble} in remap byte 0x{packed:02x}");
            default
        }
    };
    (
        resolve(packed >> 4, defaults[0]),
        resolve(packed & 0x0F, defaults[1]),
    )
}

/// Logical auxiliary button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Effector {
    E1 = 1,
    E2 = 2,
    E3 = 3,
    E4 = 4,
}

named_enum!(Effector {
    E1 => "e1", "E1 (JOY 9)";
    E2 => "e2", "E2 (JOY 10)";
    E3 => "e3", "E3 (JOY 11)";
    E4 => "e4", "E4 (JOY 12)";
});

impl Effector {
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::E1),
            2 => Some(Self::E2),
            3 => Some(Self::E3),
            4 => Some(Self::E4),
            _ => None,
        }
    }

    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Which effector each of start, select, B8 and B9 sends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectorMapping {
    pub start: Effector,
    pub select: Effector,
    pub b8: Effector,
    pub b9: Effector,
}

impl Default for EffectorMapping {
    fn default() -> Self {
        Self::from_bytes(0x00, 0x00)
    }
}

impl EffectorMapping {
    /// Decode the two remap bytes of a record
    pub fn from_bytes(start_select: u8, b8_b9: u8) -> Self {
        let [d_start, d_select, d_b8, d_b9] = DEFAULT_EFFECTOR_MAPPING;
        let (start, select) = unpack_remap(start_select, [d_start, d_select]);
        let (b8, b9) = unpack_remap(b8_b9, [d_b8, d_b9]);
        // unpack_remap only yields 1-4
        let effector = |id| Effector::from_id(id).unwrap_or(Effector::E1);
        Self {
            start: effector(start),
            select: effector(select),
            b8: effector(b8),
            b9: effector(b9),
        }
    }

    /// Encode as (start/select, b8/b9) bytes
    pub fn to_bytes(self) -> (u8, u8) {
        (
            (self.start.id() << 4) | self.select.id(),
            (self.b8.id() << 4) | self.b9.id(),
        )
    }
}

/// Clamp a debounce value into range, falling back to the default
pub fn sanitize_debounce(ticks: u8) -> u8 {
    if DEBOUNCE_RANGE.contains(&ticks) {
        ticks
    } else {
        warn!("Debounce of {ticks} ticks out of range, using 2");
        *DEBOUNCE_RANGE.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turntable_precedence() {
        assert_eq!(TurntableMode::from_flags(0), TurntableMode::AnalogOnly);
        assert_eq!(
            TurntableMode::from_flags(cfg::DIGITAL_TT_ENABLE),
            TurntableMode::DigitalOnly
        );
        assert_eq!(
            TurntableMode::from_flags(cfg::DIGITAL_TT_ENABLE | cfg::ANALOG_TT_FORCE_ENABLE),
            TurntableMode::Both
        );
        // Analog force alone is the same as the default
        assert_eq!(
            TurntableMode::from_flags(cfg::ANALOG_TT_FORCE_ENABLE),
            TurntableMode::AnalogOnly
        );
    }

    #[test]
    fn test_input_precedence() {
        assert_eq!(InputMode::from_flags(0), InputMode::ControllerOnly);
        assert_eq!(InputMode::from_flags(cfg::KEYBOARD_ENABLE), InputMode::Both);
        assert_eq!(
            InputMode::from_flags(cfg::KEYBOARD_ENABLE | cfg::JOYINPUT_DISABLE),
            InputMode::KeyboardOnly
        );
        assert_eq!(
            InputMode::from_flags(cfg::JOYINPUT_DISABLE),
            InputMode::ControllerOnly
        );
    }

    #[test]
    fn test_led_precedence() {
        assert_eq!(LedMode::from_flags(0), LedMode::Default);
        assert_eq!(LedMode::from_flags(cfg::TT_LED_HID), LedMode::Hid);
        assert_eq!(
            LedMode::from_flags(cfg::TT_LED_REACTIVE | cfg::TT_LED_HID),
            LedMode::Reactive
        );
    }

    #[test]
    fn test_apply_preserves_unrelated_bits() {
        let flags = cfg::WS2812B | cfg::INVERT_QE1 | cfg::KEYBOARD_ENABLE;
        let flags = TurntableMode::Both.apply(flags);
        let flags = LedMode::Hid.apply(flags);
        let flags = PollRate::Hz250.apply(flags);
        assert_eq!(
            flags,
            cfg::WS2812B
                | cfg::INVERT_QE1
                | cfg::KEYBOARD_ENABLE
                | cfg::DIGITAL_TT_ENABLE
                | cfg::ANALOG_TT_FORCE_ENABLE
                | cfg::TT_LED_HID
                | cfg::POLL_250HZ
        );

        let flags = InputMode::ControllerOnly.apply(flags);
        assert_eq!(flags & InputMode::BITS, 0);
        let flags = TurntableMode::AnalogOnly.apply(PollRate::Hz1000.apply(flags));
        assert_eq!(flags, cfg::WS2812B | cfg::INVERT_QE1 | cfg::TT_LED_HID);
    }

    #[test]
    fn test_poll_rate() {
        assert_eq!(PollRate::from_flags(0), PollRate::Hz1000);
        assert_eq!(PollRate::from_flags(cfg::POLL_250HZ), PollRate::Hz250);
        assert_eq!("250HZ".parse::<PollRate>(), Ok(PollRate::Hz250));
        assert!("500hz".parse::<PollRate>().is_err());
    }

    #[test]
    fn test_sensitivity_lookup() {
        assert_eq!(Sensitivity::from_ratio("1:4").map(Sensitivity::raw), Some(-4));
        assert_eq!(Sensitivity::from_raw(-5).ratio(), "1:4");
        assert_eq!(Sensitivity::from_raw(16).ratio(), "16:1");
        assert_eq!(Sensitivity::from_ratio_or_fallback("9:9").raw(), -4);
        assert_eq!(Sensitivity::default().ratio(), "1:1");
        assert!("5:1".parse::<Sensitivity>().is_err());
    }

    #[test]
    fn test_sensitivity_table_unique() {
        for (i, (name, raw)) in SENSITIVITY_TABLE.iter().enumerate() {
            for (other_name, other_raw) in &SENSITIVITY_TABLE[i + 1..] {
                assert_ne!(name, other_name);
                assert_ne!(raw, other_raw);
            }
        }
    }

    #[test]
    fn test_remap_packing() {
        assert_eq!(pack_remap(1, 2).unwrap(), 0x12);
        assert_eq!(unpack_remap(0x12, [1, 2]), (1, 2));
        assert_eq!(unpack_remap(0x00, [1, 2]), (1, 2));
        assert_eq!(unpack_remap(0x00, [3, 4]), (3, 4));
        assert_eq!(unpack_remap(0x40, [3, 4]), (4, 4));
        assert_eq!(unpack_remap(0xF1, [3, 4]), (3, 1));
        assert!(pack_remap(0, 1).is_err());
        assert!(pack_remap(1, 5).unwrap_err().is_format());
    }

    #[test]
    fn test_effector_mapping() {
        let mapping = EffectorMapping::default();
        assert_eq!(mapping.start, Effector::E1);
        assert_eq!(mapping.b9, Effector::E4);
        assert_eq!(mapping.to_bytes(), (0x12, 0x34));

        let swapped = EffectorMapping::from_bytes(0x21, 0x43);
        assert_eq!(swapped.start, Effector::E2);
        assert_eq!(swapped.select, Effector::E1);
        assert_eq!(swapped.to_bytes(), (0x21, 0x43));
        assert_eq!(Effector::E3.label(), "E3 (JOY 11)");
    }

    #[test]
    fn test_debounce_fallback() {
        assert_eq!(sanitize_debounce(2), 2);
        assert_eq!(sanitize_debounce(10), 10);
        assert_eq!(sanitize_debounce(0), 2);
        assert_eq!(sanitize_debounce(11), 2);
    }
}
