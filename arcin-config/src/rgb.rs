//! RGB strip encoding: mode table, palettes, speed units, option packing

use serde::{Deserialize, Serialize};

use crate::codec::{RgbColor, RgbRecord};
use crate::error::ConfigError;
use crate::flags::rgb as flag;

/// Maximum number of LEDs on the strip
pub const NUM_LEDS_MAX: u8 = 180;

/// Maximum idle animation speed offered by the UI
pub const IDLE_SPEED_MAX: u8 = 240;

/// Turntable speed range (tenths of the base speed)
pub const TT_SPEED_RANGE: std::ops::RangeInclusive<i8> = -100..=100;

/// Largest palette index that fits in `mode_options`
pub const PALETTE_MAX: u8 = 0x1F;

/// Largest multiplicity that fits in `mode_options`
pub const MULTIPLICITY_MAX: u8 = 0x07;

/// Palette names, in index order
pub const PALETTES: &[&str] = &[
    "Rainbow",
    "Dream",
    "Happy Sky",
    "DJ TROOPERS",
    "Empress",
    "Tricoro",
    "CANNON BALLERS",
    "Rootage",
    "HeroicVerse",
    "Bistrover",
];

/// Palette index by name (case-insensitive) or by number
pub fn palette_index(name: &str) -> Option<u8> {
    let name = name.trim();
    if let Ok(index) = name.parse::<u8>() {
        return (index <= PALETTE_MAX).then_some(index);
    }
    PALETTES
        .iter()
        .position(|p| p.eq_ignore_ascii_case(name))
        .and_then(|i| u8::try_from(i).ok())
}

/// Unit the idle animation speed is shown in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleUnit {
    /// Beats per minute, `raw² / 255`
    Bpm,
    /// Rotations per minute, `raw / 2`
    Rpm,
}

impl IdleUnit {
    pub fn convert(self, raw: u8) -> f64 {
        let raw = f64::from(raw);
        match self {
            Self::Bpm => raw * raw / 255.0,
            Self::Rpm => raw / 2.0,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::Bpm => "BPM",
            Self::Rpm => "RPM",
        }
    }

    /// Display value with two decimals, e.g. "50.00 RPM"
    pub fn format(self, raw: u8) -> String {
        format!("{:.2} {}", self.convert(raw), self.suffix())
    }
}

/// Range and meaning of the multiplicity field for a mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplicity {
    pub label: &'static str,
    pub tooltip: &'static str,
    pub min: u8,
    pub max: u8,
}

/// What each field of the RGB block means in a given mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbModeDescriptor {
    pub name: &'static str,
    /// How many of primary/secondary/tertiary are used
    pub num_colors: u8,
    pub has_idle_animation: bool,
    pub idle_unit: Option<IdleUnit>,
    pub has_tt_speed: bool,
    /// Idle animation keeps running while the strip reacts to the turntable
    pub idle_with_tt_react: bool,
    pub uses_palettes: bool,
    pub multiplicity: Option<Multiplicity>,
}

impl RgbModeDescriptor {
    /// Whether `idle_speed` has any effect
    pub fn idle_speed_meaningful(&self, react_to_tt: bool) -> bool {
        self.has_idle_animation && (self.idle_with_tt_react || !react_to_tt)
    }

    /// Whether `tt_speed` has any effect
    pub fn tt_speed_meaningful(&self, react_to_tt: bool) -> bool {
        self.has_tt_speed && react_to_tt
    }
}

const fn mode(
    name: &'static str,
    num_colors: u8,
    idle_unit: Option<IdleUnit>,
    has_tt_speed: bool,
    idle_with_tt_react: bool,
    uses_palettes: bool,
    multiplicity: Option<Multiplicity>,
) -> RgbModeDescriptor {
    RgbModeDescriptor {
        name,
        num_colors,
        has_idle_animation: idle_unit.is_some(),
        idle_unit,
        has_tt_speed,
        idle_with_tt_react,
        uses_palettes,
        multiplicity,
    }
}

/// Mode descriptors, indexed by `RgbRecord::mode`
pub const RGB_MODES: &[RgbModeDescriptor] = &[
    mode("Single-color / breathe", 1, Some(IdleUnit::Bpm), true, false, false, None),
    mode("Flash (two colors)", 2, Some(IdleUnit::Bpm), true, false, false, None),
    mode("Flash (random color)", 0, Some(IdleUnit::Bpm), false, true, true, None),
    mode("Tricolor", 3, Some(IdleUnit::Rpm), true, true, false, None),
    mode(
        "Color dots",
        3,
        Some(IdleUnit::Rpm),
        true,
        true,
        false,
        Some(Multiplicity {
            label: "Number of dots",
            tooltip: "Specifies number of dots shown",
            min: 1,
            max: 3,
        }),
    ),
    mode(
        "Color divisions",
        3,
        Some(IdleUnit::Rpm),
        true,
        true,
        false,
        Some(Multiplicity {
            label: "Number of colors",
            tooltip: "Specifies number of colors used",
            min: 2,
            max: 3,
        }),
    ),
    mode("Rainbow glow", 0, Some(IdleUnit::Rpm), true, true, true, None),
    mode(
        "Rainbow spiral",
        0,
        Some(IdleUnit::Rpm),
        true,
        true,
        true,
        Some(Multiplicity {
            label: "Wave length",
            tooltip: "1 makes a full circle, 2+ makes the wave effect longer",
            min: 1,
            max: 6,
        }),
    ),
    mode("Pride (animation only)", 0, None, false, true, false, None),
    mode("Pacifica (animation only)", 0, None, false, true, false, None),
];

/// Look up a mode descriptor; unknown indices have none
pub fn mode_descriptor(index: u8) -> Option<&'static RgbModeDescriptor> {
    RGB_MODES.get(usize::from(index))
}

/// Pack palette (bits 0-4) and multiplicity (bits 5-7)
pub fn pack_mode_options(palette: u8, multiplicity: u8) -> Result<u8, ConfigError> {
    if palette > PALETTE_MAX {
        return Err(ConfigError::Format(format!(
            "palette {palette} out of range 0-{PALETTE_MAX}"
        )));
    }
    if multiplicity > MULTIPLICITY_MAX {
        return Err(ConfigError::Format(format!(
            "multiplicity {multiplicity} out of range 0-{MULTIPLICITY_MAX}"
        )));
    }
    Ok(palette | (multiplicity << 5))
}

/// Unpack `mode_options` into (palette, multiplicity)
pub fn unpack_mode_options(options: u8) -> (u8, u8) {
    (options & PALETTE_MAX, options >> 5)
}

pub fn brightness_from_darkness(darkness: u8) -> u8 {
    u8::MAX - darkness
}

pub fn darkness_from_brightness(brightness: u8) -> u8 {
    u8::MAX - brightness
}

/// Turntable speed multiplier shown to the user, e.g. "1.5"
pub fn format_tt_speed(raw: i8) -> String {
    format!("{:.1}", f64::from(raw) / 10.0)
}

/// How long the reactive glow takes to fade out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FadeOut {
    #[default]
    VeryQuick,
    Quick,
    Slow,
    ReallySlow,
}

impl FadeOut {
    pub const ALL: &'static [FadeOut] = &[
        FadeOut::VeryQuick,
        FadeOut::Quick,
        FadeOut::Slow,
        FadeOut::ReallySlow,
    ];

    const BITS: u8 = flag::FADE_OUT_FAST | flag::FADE_OUT_SLOW;

    pub fn from_flags(flags: u8) -> Self {
        let fast = flags & flag::FADE_OUT_FAST != 0;
        let slow = flags & flag::FADE_OUT_SLOW != 0;
        match (slow, fast) {
            (false, false) => Self::VeryQuick,
            (false, true) => Self::Quick,
            (true, false) => Self::Slow,
            (true, true) => Self::ReallySlow,
        }
    }

    /// Replace the fade-out bits in `flags`
    pub fn apply(self, flags: u8) -> u8 {
        let bits = match self {
            Self::VeryQuick => 0,
            Self::Quick => flag::FADE_OUT_FAST,
            Self::Slow => flag::FADE_OUT_SLOW,
            Self::ReallySlow => flag::FADE_OUT_FAST | flag::FADE_OUT_SLOW,
        };
        (flags & !Self::BITS) | bits
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::VeryQuick => "very-quick",
            Self::Quick => "quick",
            Self::Slow => "slow",
            Self::ReallySlow => "really-slow",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryQuick => "Very quick",
            Self::Quick => "Quick",
            Self::Slow => "Slow",
            Self::ReallySlow => "Really slow",
        }
    }
}

impl std::str::FromStr for FadeOut {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown fade-out '{s}', expected very-quick, quick, slow or really-slow")
            })
    }
}

/// Human-facing RGB settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RgbSettings {
    pub hid_control: bool,
    pub react_to_tt: bool,
    pub flip_direction: bool,
    pub fade_out: FadeOut,
    pub brightness: u8,
    pub idle_brightness: u8,
    pub colors: [RgbColor; 3],
    /// Index into `RGB_MODES`
    pub mode: u8,
    pub num_leds: u8,
    pub palette: u8,
    pub multiplicity: u8,
    pub idle_speed: u8,
    pub tt_speed: i8,
}

impl Default for RgbSettings {
    fn default() -> Self {
        Self::from_record(&RgbRecord::default())
    }
}

impl RgbSettings {
    /// Colors restored by "reset"
    pub const RESET_COLORS: [RgbColor; 3] = [RgbColor::RED, RgbColor::GREEN, RgbColor::BLUE];

    pub fn from_record(rgb: &RgbRecord) -> Self {
        let (palette, multiplicity) = unpack_mode_options(rgb.mode_options);
        Self {
            hid_control: rgb.flags & flag::ENABLE_HID != 0,
            react_to_tt: rgb.flags & flag::REACT_TO_TT != 0,
            flip_direction: rgb.flags & flag::FLIP_DIRECTION != 0,
            fade_out: FadeOut::from_flags(rgb.flags),
            brightness: brightness_from_darkness(rgb.darkness),
            idle_brightness: rgb.idle_brightness,
            colors: [rgb.primary, rgb.secondary, rgb.tertiary],
            mode: rgb.mode,
            num_leds: if rgb.num_leds == 0 {
                NUM_LEDS_MAX
            } else {
                rgb.num_leds
            },
            palette,
            multiplicity,
            idle_speed: rgb.idle_speed,
            tt_speed: rgb.tt_speed,
        }
    }

    /// Translate back to the wire record.
    ///
    /// Out-of-range palette or multiplicity are format errors; the LED count
    /// and turntable speed are clamped into range.
    pub fn to_record(&self) -> Result<RgbRecord, ConfigError> {
        let mut flags = 0;
        if self.hid_control {
            flags |= flag::ENABLE_HID;
        }
        if self.react_to_tt {
            flags |= flag::REACT_TO_TT;
        }
        if self.flip_direction {
            flags |= flag::FLIP_DIRECTION;
        }
        let flags = self.fade_out.apply(flags);
        let [primary, secondary, tertiary] = self.colors;

        Ok(RgbRecord {
            flags,
            primary,
            darkness: darkness_from_brightness(self.brightness),
            secondary,
            tertiary,
            mode: self.mode,
            num_leds: self.num_leds.min(NUM_LEDS_MAX),
            idle_speed: self.idle_speed,
            idle_brightness: self.idle_brightness,
            tt_speed: self
                .tt_speed
                .clamp(*TT_SPEED_RANGE.start(), *TT_SPEED_RANGE.end()),
            mode_options: pack_mode_options(self.palette, self.multiplicity)?,
        })
    }

    /// Descriptor for the selected mode
    pub fn descriptor(&self) -> Option<&'static RgbModeDescriptor> {
        mode_descriptor(self.mode)
    }

    pub fn palette_name(&self) -> Option<&'static str> {
        PALETTES.get(usize::from(self.palette)).copied()
    }

    pub fn reset_colors(&mut self) {
        self.colors = Self::RESET_COLORS;
    }
}
