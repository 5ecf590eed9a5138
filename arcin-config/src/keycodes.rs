//! HID keyboard usage names, button bindings and presets

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::codec::KEYCODE_COUNT;

/// Keyboard usage names and codes, in menu order. Index 0 is "no key".
pub const KEYCODES: &[(&str, u8)] = &[
    ("NONE", 0x00),
    ("A", 0x04),
    ("B", 0x05),
    ("C", 0x06),
    ("D", 0x07),
    ("E", 0x08),
    ("F", 0x09),
    ("G", 0x0A),
    ("H", 0x0B),
    ("I", 0x0C),
    ("J", 0x0D),
    ("K", 0x0E),
    ("L", 0x0F),
    ("M", 0x10),
    ("N", 0x11),
    ("O", 0x12),
    ("P", 0x13),
    ("Q", 0x14),
    ("R", 0x15),
    ("S", 0x16),
    ("T", 0x17),
    ("U", 0x18),
    ("V", 0x19),
    ("W", 0x1A),
    ("X", 0x1B),
    ("Y", 0x1C),
    ("Z", 0x1D),
    ("1", 0x1E),
    ("2", 0x1F),
    ("3", 0x20),
    ("4", 0x21),
    ("5", 0x22),
    ("6", 0x23),
    ("7", 0x24),
    ("8", 0x25),
    ("9", 0x26),
    ("0", 0x27),
    ("ENTER", 0x28),
    ("ESC", 0x29),
    ("BACKSPACE", 0x2A),
    ("TAB", 0x2B),
    ("SPACE", 0x2C),
    ("MINUS", 0x2D),
    ("EQUAL", 0x2E),
    ("LEFTBRACE", 0x2F),
    ("RIGHTBRACE", 0x30),
    ("BACKSLASH", 0x31),
    ("HASHTILDE", 0x32),
    ("SEMICOLON", 0x33),
    ("APOSTROPHE", 0x34),
    ("GRAVE", 0x35),
    ("COMMA", 0x36),
    ("DOT", 0x37),
    ("SLASH", 0x38),
    ("CAPSLOCK", 0x39),
    ("F1", 0x3A),
    ("F2", 0x3B),
    ("F3", 0x3C),
    ("F4", 0x3D),
    ("F5", 0x3E),
    ("F6", 0x3F),
    ("F7", 0x40),
    ("F8", 0x41),
    ("F9", 0x42),
    ("F10", 0x43),
    ("F11", 0x44),
    ("F12", 0x45),
    ("SYSRQ", 0x46),
    ("SCROLLLOCK", 0x47),
    ("PAUSE", 0x48),
    ("INSERT", 0x49),
    ("HOME", 0x4A),
    ("PAGEUP", 0x4B),
    ("DELETE", 0x4C),
    ("END", 0x4D),
    ("PAGEDOWN", 0x4E),
    ("RIGHT", 0x4F),
    ("LEFT", 0x50),
    ("DOWN", 0x51),
    ("UP", 0x52),
    ("NUMLOCK", 0x53),
    ("KPSLASH", 0x54),
    ("KPASTERISK", 0x55),
    ("KPMINUS", 0x56),
    ("KPPLUS", 0x57),
    ("KPENTER", 0x58),
    ("KP1", 0x59),
    ("KP2", 0x5A),
    ("KP3", 0x5B),
    ("KP4", 0x5C),
    ("KP5", 0x5D),
    ("KP6", 0x5E),
    ("KP7", 0x5F),
    ("KP8", 0x60),
    ("KP9", 0x61),
    ("KP0", 0x62),
    ("KPDOT", 0x63),
    ("102ND", 0x64),
    ("COMPOSE", 0x65),
    ("POWER", 0x66),
    ("KPEQUAL", 0x67),
    ("F13", 0x68),
    ("F14", 0x69),
    ("F15", 0x6A),
    ("F16", 0x6B),
    ("F17", 0x6C),
    ("F18", 0x6D),
    ("F19", 0x6E),
    ("F20", 0x6F),
    ("F21", 0x70),
    ("F22", 0x71),
    ("F23", 0x72),
    ("F24", 0x73),
    ("LEFTCTRL", 0xE0),
    ("LEFTSHIFT", 0xE1),
    ("LEFTALT", 0xE2),
    ("LEFTMETA", 0xE3),
    ("RIGHTCTRL", 0xE4),
    ("RIGHTSHIFT", 0xE5),
    ("RIGHTALT", 0xE6),
    ("RIGHTMETA", 0xE7),
];

struct Lookup {
    by_name: HashMap<&'static str, usize>,
    by_code: HashMap<u8, usize>,
}

fn lookup() -> &'static Lookup {
    static LOOKUP: OnceLock<Lookup> = OnceLock::new();
    LOOKUP.get_or_init(|| {
        let mut by_name = HashMap::with_capacity(KEYCODES.len());
        let mut by_code = HashMap::with_capacity(KEYCODES.len());
        for (index, &(name, code)) in KEYCODES.iter().enumerate() {
            by_name.entry(name).or_insert(index);
            by_code.entry(code).or_insert(index);
        }
        Lookup { by_name, by_code }
    })
}

/// Code for a usage name (case-insensitive)
pub fn code_for_name(name: &str) -> Option<u8> {
    let upper = name.trim().to_ascii_uppercase();
    lookup()
        .by_name
        .get(upper.as_str())
        .map(|&index| KEYCODES[index].1)
}

/// Usage name for a code, if it is in the table
pub fn name_for_code(code: u8) -> Option<&'static str> {
    lookup().by_code.get(&code).map(|&index| KEYCODES[index].0)
}

/// Table index of a code; unknown codes map to 0 ("NONE")
pub fn index_of_code(code: u8) -> usize {
    lookup().by_code.get(&code).copied().unwrap_or(0)
}

/// Usage name for a code, "NONE" when unknown
pub fn display_name(code: u8) -> &'static str {
    KEYCODES[index_of_code(code)].0
}

/// Button ids in keycode slot order
pub const BUTTONS: [&str; KEYCODE_COUNT] = [
    "b1", "b2", "b3", "b4", "b5", "b6", "b7", "e1", "e2", "e3", "e4", "tt-cw", "tt-ccw",
];

/// Button labels in keycode slot order
pub const BUTTON_LABELS: [&str; KEYCODE_COUNT] = [
    "B1", "B2", "B3", "B4", "B5", "B6", "B7", "E1", "E2", "E3", "E4", "TT CW", "TT CCW",
];

/// Keycode slot for a button id such as "b3" or "tt-cw"
pub fn button_index(button: &str) -> Option<usize> {
    let button = button.trim().to_ascii_lowercase();
    BUTTONS.iter().position(|&b| b == button)
}

/// A single keyboard binding.
///
/// Shown as its usage name, or as `0xNN` when the code is not in the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Key(pub u8);

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match name_for_code(self.0) {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02X}", self.0),
        }
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(code) = code_for_name(s) {
            return Ok(Key(code));
        }
        let hex = s
            .trim()
            .strip_prefix("0x")
            .or_else(|| s.trim().strip_prefix("0X"));
        hex.and_then(|h| u8::from_str_radix(h, 16).ok())
            .map(Key)
            .ok_or_else(|| format!("unknown key '{s}'"))
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Keyboard bindings for all 13 buttons, in keycode slot order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, Key>")]
pub struct KeyBindings(pub [u8; KEYCODE_COUNT]);

impl KeyBindings {
    /// Bind one button, by id
    pub fn bind(&mut self, button: &str, key: Key) -> Result<(), String> {
        let index = button_index(button).ok_or_else(|| {
            format!("unknown button '{button}', expected one of: {}", BUTTONS.join(", "))
        })?;
        self.0[index] = key.0;
        Ok(())
    }

    /// (button label, key) pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Key)> + '_ {
        BUTTON_LABELS.iter().copied().zip(self.0.iter().map(|&c| Key(c)))
    }
}

impl Serialize for KeyBindings {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(KEYCODE_COUNT))?;
        for (button, &code) in BUTTONS.iter().zip(self.0.iter()) {
            map.serialize_entry(button, &Key(code))?;
        }
        map.end()
    }
}

impl TryFrom<BTreeMap<String, Key>> for KeyBindings {
    type Error = String;

    fn try_from(map: BTreeMap<String, Key>) -> Result<Self, Self::Error> {
        let mut bindings = KeyBindings::default();
        for (button, key) in map {
            bindings.bind(&button, key)?;
        }
        Ok(bindings)
    }
}

/// Built-in binding layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPreset {
    Clear,
    Letters,
    Djmax1p,
    Djmax2p,
}

impl KeyPreset {
    pub const ALL: &'static [KeyPreset] = &[
        KeyPreset::Clear,
        KeyPreset::Letters,
        KeyPreset::Djmax1p,
        KeyPreset::Djmax2p,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Letters => "letters",
            Self::Djmax1p => "djmax-1p",
            Self::Djmax2p => "djmax-2p",
        }
    }

    fn key_names(self) -> [&'static str; KEYCODE_COUNT] {
        match self {
            Self::Clear => ["NONE"; KEYCODE_COUNT],
            Self::Letters => [
                "Z", "S", "X", "D", "C", "F", "V", "Q", "W", "E", "R", "J", "K",
            ],
            Self::Djmax1p => [
                "Z", "S", "X", "D", "C", "F", "V", "ENTER", "TAB", "SPACE", "ESC", "DOWN", "UP",
            ],
            Self::Djmax2p => [
                "H",
                "U",
                "J",
                "I",
                "K",
                "O",
                "L",
                "ENTER",
                "TAB",
                "LEFTSHIFT",
                "RIGHTSHIFT",
                "RIGHT",
                "LEFT",
            ],
        }
    }

    /// Bindings for this preset
    pub fn bindings(self) -> KeyBindings {
        KeyBindings(self.key_names().map(|name| code_for_name(name).unwrap_or(0)))
    }
}

impl FromStr for KeyPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!("unknown preset '{s}', expected clear, letters, djmax-1p or djmax-2p")
            })
    }
}
