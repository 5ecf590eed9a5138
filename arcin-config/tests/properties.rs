//! Property-based tests for the config codec and flag translation.

use arcin_config::flags::config as cfg;
use arcin_config::rgb::{pack_mode_options, unpack_mode_options};
use arcin_config::translate::{pack_remap, unpack_remap};
use arcin_config::{
    decode, encode, ConfigurationRecord, InputMode, LedMode, RgbColor, RgbRecord, Settings,
    TurntableMode, CONFIG_SIZE,
};
use proptest::prelude::*;

fn arb_color() -> impl Strategy<Value = RgbColor> {
    any::<[u8; 3]>().prop_map(|[r, g, b]| RgbColor::new(r, g, b))
}

fn arb_rgb() -> impl Strategy<Value = RgbRecord> {
    (
        (any::<u8>(), arb_color(), any::<u8>(), arb_color(), arb_color()),
        (any::<u8>(), any::<u8>(), any::<u8>(), any::<u8>(), any::<i8>(), any::<u8>()),
    )
        .prop_map(
            |(
                (flags, primary, darkness, secondary, tertiary),
                (mode, num_leds, idle_speed, idle_brightness, tt_speed, mode_options),
            )| RgbRecord {
                flags,
                primary,
                darkness,
                secondary,
                tertiary,
                mode,
                num_leds,
                idle_speed,
                idle_brightness,
                tt_speed,
                mode_options,
            },
        )
}

/// Encodable labels: at most 12 bytes, not ending in NUL
fn arb_label() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..=12)
        .prop_filter("label must not end in NUL", |l| l.last() != Some(&0))
}

fn arb_record() -> impl Strategy<Value = ConfigurationRecord> {
    (
        (arb_label(), any::<u32>(), any::<i8>(), any::<i8>(), any::<u8>()),
        (any::<[u8; 13]>(), any::<[u8; 3]>(), any::<u8>(), any::<u8>()),
        arb_rgb(),
    )
        .prop_map(
            |(
                (label, flags, sens_primary, sens_secondary, debounce_ticks),
                (keycodes, keycodes_reserved, remap_start_select, remap_b8_b9),
                rgb,
            )| ConfigurationRecord {
                label,
                flags,
                turntable_sensitivity_primary: sens_primary,
                turntable_sensitivity_secondary: sens_secondary,
                debounce_ticks,
                keycodes,
                keycodes_reserved,
                remap_start_select,
                remap_b8_b9,
                rgb,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_codec_roundtrip(record in arb_record()) {
        let bytes = encode(&record).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(bytes.len(), CONFIG_SIZE);
        let decoded = decode(&bytes).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(decoded, record);
    }

    #[test]
    fn prop_decode_encode_stable(bytes in proptest::collection::vec(any::<u8>(), CONFIG_SIZE)) {
        // Re-encoding a decoded payload only clears reserved bytes
        let record = decode(&bytes).map_err(|e| TestCaseError::fail(e.to_string()))?;
        let reencoded = encode(&record).map_err(|e| TestCaseError::fail(e.to_string()))?;
        for (i, (a, b)) in bytes.iter().zip(reencoded.iter()).enumerate() {
            if matches!(i, 18 | 38 | 39 | 57..=59) {
                prop_assert_eq!(*b, 0);
            } else {
                prop_assert_eq!(a, b, "byte {} changed", i);
            }
        }
    }

    #[test]
    fn prop_decode_rejects_short(len in 0usize..CONFIG_SIZE) {
        prop_assert!(decode(&vec![0u8; len]).is_err());
    }

    #[test]
    fn prop_turntable_precedence(flags in any::<u32>()) {
        let expected = match (flags & cfg::DIGITAL_TT_ENABLE != 0, flags & cfg::ANALOG_TT_FORCE_ENABLE != 0) {
            (true, true) => TurntableMode::Both,
            (true, false) => TurntableMode::DigitalOnly,
            _ => TurntableMode::AnalogOnly,
        };
        prop_assert_eq!(TurntableMode::from_flags(flags), expected);
    }

    #[test]
    fn prop_input_precedence(flags in any::<u32>()) {
        let expected = match (flags & cfg::KEYBOARD_ENABLE != 0, flags & cfg::JOYINPUT_DISABLE != 0) {
            (true, true) => InputMode::KeyboardOnly,
            (true, false) => InputMode::Both,
            _ => InputMode::ControllerOnly,
        };
        prop_assert_eq!(InputMode::from_flags(flags), expected);
    }

    #[test]
    fn prop_led_precedence(flags in any::<u32>()) {
        let expected = if flags & cfg::TT_LED_REACTIVE != 0 {
            LedMode::Reactive
        } else if flags & cfg::TT_LED_HID != 0 {
            LedMode::Hid
        } else {
            LedMode::Default
        };
        prop_assert_eq!(LedMode::from_flags(flags), expected);
    }

    #[test]
    fn prop_apply_then_decode(flags in any::<u32>(), tt in 0usize..3, input in 0usize..3, led in 0usize..3) {
        let tt = TurntableMode::ALL[tt];
        let input = InputMode::ALL[input];
        let led = LedMode::ALL[led];
        let applied = led.apply(input.apply(tt.apply(flags)));
        prop_assert_eq!(TurntableMode::from_flags(applied), tt);
        prop_assert_eq!(InputMode::from_flags(applied), input);
        prop_assert_eq!(LedMode::from_flags(applied), led);

        let touched = cfg::DIGITAL_TT_ENABLE
            | cfg::ANALOG_TT_FORCE_ENABLE
            | cfg::KEYBOARD_ENABLE
            | cfg::JOYINPUT_DISABLE
            | cfg::TT_LED_REACTIVE
            | cfg::TT_LED_HID;
        prop_assert_eq!(applied & !touched, flags & !touched);
    }

    #[test]
    fn prop_mode_options_independent(palette in 0u8..=31, multiplicity in 0u8..=7) {
        let packed = pack_mode_options(palette, multiplicity)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(unpack_mode_options(packed), (palette, multiplicity));

        // Changing one half never disturbs the other
        let other = pack_mode_options((palette + 1) % 32, multiplicity)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(unpack_mode_options(other).1, multiplicity);
    }

    #[test]
    fn prop_remap_roundtrip(high in 1u8..=4, low in 1u8..=4, defaults in any::<[u8; 2]>()) {
        let packed = pack_remap(high, low).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(unpack_remap(packed, defaults), (high, low));
    }

    #[test]
    fn prop_settings_translation_settles(record in arb_record()) {
        let mut record = record;
        record.label.retain(u8::is_ascii);
        let rebuilt = Settings::from_record(&record)
            .to_record()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(rebuilt.flags & cfg::RETIRED_SWAP_8_9, 0);
        prop_assert_eq!(rebuilt.flags & !cfg::KNOWN, 0);
        prop_assert!((2..=10).contains(&rebuilt.debounce_ticks));
        prop_assert!(rebuilt.rgb.num_leds <= 180);

        // A second pass changes nothing
        let again = Settings::from_record(&rebuilt)
            .to_record()
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(again, rebuilt);
    }
}
