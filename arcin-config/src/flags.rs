//! Bit assignments for the config and RGB flag fields

/// Bits of `ConfigurationRecord::flags`
pub mod config {
    pub const SEL_MULTI_TAP: u32 = 1 << 0;
    pub const INVERT_QE1: u32 = 1 << 1;
    // Bit 2 (swap B8/B9) was retired when full effector remapping landed.
    // Firmware still reads it, so it must never be set.
    pub const RETIRED_SWAP_8_9: u32 = 1 << 2;
    pub const DIGITAL_TT_ENABLE: u32 = 1 << 3;
    pub const DEBOUNCE: u32 = 1 << 4;
    pub const POLL_250HZ: u32 = 1 << 5;
    pub const ANALOG_TT_FORCE_ENABLE: u32 = 1 << 6;
    pub const KEYBOARD_ENABLE: u32 = 1 << 7;
    pub const JOYINPUT_DISABLE: u32 = 1 << 8;
    pub const MODE_SWITCHING_ENABLE: u32 = 1 << 9;
    pub const LED_OFF: u32 = 1 << 10;
    pub const TT_LED_REACTIVE: u32 = 1 << 11;
    pub const TT_LED_HID: u32 = 1 << 12;
    pub const WS2812B: u32 = 1 << 13;

    /// Every bit the current firmware understands
    pub const KNOWN: u32 = SEL_MULTI_TAP
        | INVERT_QE1
        | DIGITAL_TT_ENABLE
        | DEBOUNCE
        | POLL_250HZ
        | ANALOG_TT_FORCE_ENABLE
        | KEYBOARD_ENABLE
        | JOYINPUT_DISABLE
        | MODE_SWITCHING_ENABLE
        | LED_OFF
        | TT_LED_REACTIVE
        | TT_LED_HID
        | WS2812B;

    /// Get human-readable name for a single flag bit
    pub fn name(flag: u32) -> &'static str {
        match flag {
            SEL_MULTI_TAP => "SEL_MULTI_TAP",
            INVERT_QE1 => "INVERT_QE1",
            RETIRED_SWAP_8_9 => "RETIRED_SWAP_8_9",
            DIGITAL_TT_ENABLE => "DIGITAL_TT_ENABLE",
            DEBOUNCE => "DEBOUNCE",
            POLL_250HZ => "POLL_250HZ",
            ANALOG_TT_FORCE_ENABLE => "ANALOG_TT_FORCE_ENABLE",
            KEYBOARD_ENABLE => "KEYBOARD_ENABLE",
            JOYINPUT_DISABLE => "JOYINPUT_DISABLE",
            MODE_SWITCHING_ENABLE => "MODE_SWITCHING_ENABLE",
            LED_OFF => "LED_OFF",
            TT_LED_REACTIVE => "TT_LED_REACTIVE",
            TT_LED_HID => "TT_LED_HID",
            WS2812B => "WS2812B",
            _ => "UNKNOWN",
        }
    }
}

/// Bits of `RgbRecord::flags`
pub mod rgb {
    pub const ENABLE_HID: u8 = 1 << 0;
    pub const REACT_TO_TT: u8 = 1 << 1;
    pub const FLIP_DIRECTION: u8 = 1 << 2;
    // 00 = instant, 01 = 200ms, 10 = 400ms, 11 = 600ms
    pub const FADE_OUT_FAST: u8 = 1 << 3;
    pub const FADE_OUT_SLOW: u8 = 1 << 4;

    /// Get human-readable name for a single flag bit
    pub fn name(flag: u8) -> &'static str {
        match flag {
            ENABLE_HID => "ENABLE_HID",
            REACT_TO_TT => "REACT_TO_TT",
            FLIP_DIRECTION => "FLIP_DIRECTION",
            FADE_OUT_FAST => "FADE_OUT_FAST",
            FADE_OUT_SLOW => "FADE_OUT_SLOW",
            _ => "UNKNOWN",
        }
    }
}

/// Names of all set bits in a config flag field, low bit first
pub fn config_flag_names(flags: u32) -> Vec<&'static str> {
    (0..32)
        .map(|bit| 1u32 << bit)
        .filter(|flag| flags & flag != 0)
        .map(config::name)
        .collect()
}
