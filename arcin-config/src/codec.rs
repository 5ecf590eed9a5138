//! Fixed-layout binary codec for the 60-byte configuration payload
//!
//! Layout (little-endian, no implicit padding):
//!
//! | Offset | Size | Field                                  |
//! |--------|------|----------------------------------------|
//! | 0      | 12   | label (NUL padded)                     |
//! | 12     | 4    | flags                                  |
//! | 16     | 1    | turntable sensitivity, primary         |
//! | 17     | 1    | turntable sensitivity, secondary       |
//! | 18     | 1    | reserved                               |
//! | 19     | 1    | debounce ticks                         |
//! | 20     | 16   | keycodes (13 used, 3 reserved)         |
//! | 36     | 1    | remap start/select                     |
//! | 37     | 1    | remap B8/B9                            |
//! | 38     | 2    | reserved                               |
//! | 40     | 17   | RGB block                              |
//! | 57     | 3    | reserved                               |

use serde::{Deserialize, Serialize};
use zerocopy::byteorder::little_endian::U32;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::ConfigError;
use crate::translate::DEFAULT_EFFECTOR_MAPPING;

/// Size of the encoded configuration payload
pub const CONFIG_SIZE: usize = 60;

/// Maximum label length in bytes
pub const LABEL_MAX: usize = 12;

/// Number of bindable keycodes
pub const KEYCODE_COUNT: usize = 13;

/// Keycode slots on the wire, including the trailing reserved ones
pub const KEYCODE_SLOTS: usize = 16;

/// Default debounce window in ticks
pub const DEFAULT_DEBOUNCE_TICKS: u8 = 2;

/// Default number of LEDs on the strip
pub const DEFAULT_NUM_LEDS: u8 = 12;

/// RGB color value, serialized as `#rrggbb`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    /// Create a new RGB color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn from_wire(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    fn to_wire(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Format as `#rrggbb`
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rrggbb` or `rrggbb`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Black (all LEDs off)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Red
    pub const RED: Self = Self::new(255, 0, 0);
    /// Green
    pub const GREEN: Self = Self::new(0, 255, 0);
    /// Blue
    pub const BLUE: Self = Self::new(0, 0, 255);
}

impl From<RgbColor> for String {
    fn from(color: RgbColor) -> Self {
        color.to_hex()
    }
}

impl std::str::FromStr for RgbColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| format!("invalid color '{s}', expected #rrggbb"))
    }
}

impl TryFrom<String> for RgbColor {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Lighting portion of the configuration, as stored on the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbRecord {
    /// See `flags::rgb`
    pub flags: u8,
    pub primary: RgbColor,
    /// Inverse of brightness: 0 is full brightness
    pub darkness: u8,
    pub secondary: RgbColor,
    pub tertiary: RgbColor,
    /// Index into `rgb::RGB_MODES`
    pub mode: u8,
    /// 0 means "as many as supported"
    pub num_leds: u8,
    pub idle_speed: u8,
    pub idle_brightness: u8,
    pub tt_speed: i8,
    /// Palette in bits 0-4, multiplicity in bits 5-7
    pub mode_options: u8,
}

impl Default for RgbRecord {
    fn default() -> Self {
        Self {
            flags: 0,
            primary: RgbColor::RED,
            darkness: 0,
            secondary: RgbColor::GREEN,
            tertiary: RgbColor::BLUE,
            mode: 0,
            num_leds: DEFAULT_NUM_LEDS,
            idle_speed: 0,
            idle_brightness: 0,
            tt_speed: 0,
            mode_options: 0,
        }
    }
}

/// Decoded configuration payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationRecord {
    /// Up to 12 bytes. The wire pads with NULs, so `decode` strips trailing
    /// NULs and `encode` rejects a label that ends in one.
    pub label: Vec<u8>,
    /// See `flags::config`
    pub flags: u32,
    pub turntable_sensitivity_primary: i8,
    pub turntable_sensitivity_secondary: i8,
    pub debounce_ticks: u8,
    /// B1-B7, E1-E4, TT cw, TT ccw
    pub keycodes: [u8; KEYCODE_COUNT],
    /// Wire slots after the 13 keycodes, carried through unchanged
    pub keycodes_reserved: [u8; KEYCODE_SLOTS - KEYCODE_COUNT],
    /// Effector ids for start (high nibble) and select (low nibble)
    pub remap_start_select: u8,
    /// Effector ids for B8 (high nibble) and B9 (low nibble)
    pub remap_b8_b9: u8,
    pub rgb: RgbRecord,
}

impl Default for ConfigurationRecord {
    fn default() -> Self {
        let [start, select, b8, b9] = DEFAULT_EFFECTOR_MAPPING;
        Self {
            label: Vec::new(),
            flags: 0,
            turntable_sensitivity_primary: 0,
            turntable_sensitivity_secondary: 0,
            debounce_ticks: DEFAULT_DEBOUNCE_TICKS,
            keycodes: [0; KEYCODE_COUNT],
            keycodes_reserved: [0; KEYCODE_SLOTS - KEYCODE_COUNT],
            remap_start_select: (start << 4) | select,
            remap_b8_b9: (b8 << 4) | b9,
            rgb: RgbRecord::default(),
        }
    }
}

impl ConfigurationRecord {
    /// Label as text. Invalid UTF-8 sequences, such as a character cut
    /// at the 12-byte limit, are dropped, so the text never grows past the
    /// raw label.
    pub fn label_text(&self) -> String {
        self.label.utf8_chunks().map(|chunk| chunk.valid()).collect()
    }

    /// Whether the label bytes are valid UTF-8
    pub fn label_is_utf8(&self) -> bool {
        std::str::from_utf8(&self.label).is_ok()
    }
}

/// Wire image of the payload
#[derive(Debug, Clone, Copy, IntoBytes, FromBytes, KnownLayout, Immutable)]
#[repr(C)]
struct ConfigPayload {
    label: [u8; LABEL_MAX],
    flags: U32,
    tt_sens_primary: i8,
    tt_sens_secondary: i8,
    _reserved0: u8,
    debounce_ticks: u8,
    keycodes: [u8; KEYCODE_SLOTS],
    remap_start_select: u8,
    remap_b8_b9: u8,
    _reserved1: [u8; 2],
    rgb_flags: u8,
    rgb_primary: [u8; 3],
    rgb_darkness: u8,
    rgb_secondary: [u8; 3],
    rgb_tertiary: [u8; 3],
    rgb_mode: u8,
    rgb_num_leds: u8,
    rgb_idle_speed: u8,
    rgb_idle_brightness: u8,
    rgb_tt_speed: i8,
    rgb_mode_options: u8,
    _reserved2: [u8; 3],
}

const _: () = assert!(std::mem::size_of::<ConfigPayload>() == CONFIG_SIZE);

/// Decode the first 60 bytes of `bytes` into a record.
///
/// Extra bytes are ignored. Reserved bytes are dropped, except the three
/// keycode slots after the 13 bound keys.
pub fn decode(bytes: &[u8]) -> Result<ConfigurationRecord, ConfigError> {
    if bytes.len() < CONFIG_SIZE {
        return Err(ConfigError::Decode(format!(
            "payload too short: expected {CONFIG_SIZE} bytes, got {}",
            bytes.len()
        )));
    }
    let (payload, _) = ConfigPayload::read_from_prefix(bytes)
        .map_err(|_| ConfigError::Decode("payload does not fit the config layout".into()))?;

    let label_len = payload
        .label
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |i| i + 1);

    let mut keycodes = [0u8; KEYCODE_COUNT];
    keycodes.copy_from_slice(&payload.keycodes[..KEYCODE_COUNT]);
    let mut keycodes_reserved = [0u8; KEYCODE_SLOTS - KEYCODE_COUNT];
    keycodes_reserved.copy_from_slice(&payload.keycodes[KEYCODE_COUNT..]);

    Ok(ConfigurationRecord {
        label: payload.label[..label_len].to_vec(),
        flags: payload.flags.get(),
        turntable_sensitivity_primary: payload.tt_sens_primary,
        turntable_sensitivity_secondary: payload.tt_sens_secondary,
        debounce_ticks: payload.debounce_ticks,
        keycodes,
        keycodes_reserved,
        remap_start_select: payload.remap_start_select,
        remap_b8_b9: payload.remap_b8_b9,
        rgb: RgbRecord {
            flags: payload.rgb_flags,
            primary: RgbColor::from_wire(payload.rgb_primary),
            darkness: payload.rgb_darkness,
            secondary: RgbColor::from_wire(payload.rgb_secondary),
            tertiary: RgbColor::from_wire(payload.rgb_tertiary),
            mode: payload.rgb_mode,
            num_leds: payload.rgb_num_leds,
            idle_speed: payload.rgb_idle_speed,
            idle_brightness: payload.rgb_idle_brightness,
            tt_speed: payload.rgb_tt_speed,
            mode_options: payload.rgb_mode_options,
        },
    })
}

/// Encode a record into the 60-byte wire payload.
///
/// Reserved bytes are written as zero. A label longer than 12 bytes, or one
/// ending in NUL, is a format error.
pub fn encode(record: &ConfigurationRecord) -> Result<[u8; CONFIG_SIZE], ConfigError> {
    if record.label.len() > LABEL_MAX {
        return Err(ConfigError::Format(format!(
            "label is {} bytes, at most {LABEL_MAX} allowed",
            record.label.len()
        )));
    }
    if record.label.last() == Some(&0) {
        return Err(ConfigError::Format("label must not end in NUL".into()));
    }

    let mut label = [0u8; LABEL_MAX];
    label[..record.label.len()].copy_from_slice(&record.label);

    let mut keycodes = [0u8; KEYCODE_SLOTS];
    keycodes[..KEYCODE_COUNT].copy_from_slice(&record.keycodes);
    keycodes[KEYCODE_COUNT..].copy_from_slice(&record.keycodes_reserved);

    let rgb = &record.rgb;
    let payload = ConfigPayload {
        label,
        flags: U32::new(record.flags),
        tt_sens_primary: record.turntable_sensitivity_primary,
        tt_sens_secondary: record.turntable_sensitivity_secondary,
        _reserved0: 0,
        debounce_ticks: record.debounce_ticks,
        keycodes,
        remap_start_select: record.remap_start_select,
        remap_b8_b9: record.remap_b8_b9,
        _reserved1: [0; 2],
        rgb_flags: rgb.flags,
        rgb_primary: rgb.primary.to_wire(),
        rgb_darkness: rgb.darkness,
        rgb_secondary: rgb.secondary.to_wire(),
        rgb_tertiary: rgb.tertiary.to_wire(),
        rgb_mode: rgb.mode,
        rgb_num_leds: rgb.num_leds,
        rgb_idle_speed: rgb.idle_speed,
        rgb_idle_brightness: rgb.idle_brightness,
        rgb_tt_speed: rgb.tt_speed,
        rgb_mode_options: rgb.mode_options,
        _reserved2: [0; 3],
    };

    let mut out = [0u8; CONFIG_SIZE];
    out.copy_from_slice(payload.as_bytes());
    Ok(out)
}
