//! Setting command handlers.
//!
//! Everything except `apply` is read-modify-write: the current configuration
//! is read, the requested fields are changed and the result written back.

use std::path::Path;

use anyhow::{bail, Context};
use arcin_conf::settings_file;
use arcin_config::rgb::palette_index;
use arcin_config::{ConfigError, Key, RgbSettings, Settings};
use tracing::warn;

use super::{CommandResult, Target};
use crate::cli::{KeysArgs, RgbArgs, SetArgs};

/// Write a settings file to the controller
pub fn apply(target: &Target, file: &Path) -> CommandResult {
    let settings = settings_file::load(file)?;
    // Validate before touching the device
    settings.to_record()?;
    target
        .open()?
        .write_settings(&settings)
        .context("Failed to write to device")?;
    println!("Applied {} ('{}')", file.display(), settings.label);
    Ok(())
}

/// Change individual settings
pub fn set(target: &Target, args: &SetArgs) -> CommandResult {
    run_update(target, |settings| {
        apply_set_args(settings, args);
        Ok(())
    })
}

/// Change keyboard bindings
pub fn keys(target: &Target, args: &KeysArgs) -> CommandResult {
    if args.preset.is_none() && args.bindings.is_empty() {
        bail!("Nothing to change: give a preset or at least one --bind");
    }
    // Parse everything before opening the device
    let bindings = parse_bindings(&args.bindings)?;
    run_update(target, |settings| {
        if let Some(preset) = args.preset {
            settings.keys = preset.bindings();
        }
        for (button, key) in &bindings {
            settings
                .keys
                .bind(button, *key)
                .map_err(ConfigError::Format)?;
        }
        Ok(())
    })
}

/// Change RGB strip settings
pub fn rgb(target: &Target, args: &RgbArgs) -> CommandResult {
    let palette = args
        .palette
        .as_deref()
        .map(|name| palette_index(name).with_context(|| format!("Unknown palette '{name}'")))
        .transpose()?;
    run_update(target, |settings| {
        apply_rgb_args(&mut settings.rgb, args, palette);
        if !settings.ws2812b {
            warn!("WS2812B output is disabled; enable it with `set --ws2812b true`");
        }
        Ok(())
    })
}

fn run_update<F>(target: &Target, edit: F) -> CommandResult
where
    F: FnOnce(&mut Settings) -> Result<(), ConfigError>,
{
    let mut controller = target.open()?;
    let settings = controller
        .update(edit)
        .context("Failed to update configuration")?;
    println!("Wrote configuration '{}'", settings.label);
    Ok(())
}

/// Parse `BUTTON=KEY` pairs
fn parse_bindings(pairs: &[String]) -> anyhow::Result<Vec<(String, Key)>> {
    pairs
        .iter()
        .map(|pair| {
            let (button, key) = pair
                .split_once('=')
                .with_context(|| format!("Expected BUTTON=KEY, got '{pair}'"))?;
            let key: Key = key.parse().map_err(anyhow::Error::msg)?;
            if arcin_config::keycodes::button_index(button).is_none() {
                bail!("Unknown button '{button}'");
            }
            Ok((button.to_string(), key))
        })
        .collect()
}

fn apply_set_args(settings: &mut Settings, args: &SetArgs) {
    if let Some(label) = &args.label {
        settings.label = label.clone();
    }
    if let Some(v) = args.poll_rate {
        settings.poll_rate = v;
    }
    if let Some(v) = args.turntable_mode {
        settings.turntable_mode = v;
    }
    if let Some(v) = args.input_mode {
        settings.input_mode = v;
    }
    if let Some(v) = args.led_mode {
        settings.led_mode = v;
    }
    if let Some(v) = args.sensitivity {
        settings.sensitivity = v;
    }
    if let Some(v) = args.multi_tap {
        settings.select_multi_tap = v;
    }
    if let Some(v) = args.invert_qe1 {
        settings.invert_qe1 = v;
    }
    if let Some(v) = args.debounce {
        settings.debounce = v;
    }
    if let Some(v) = args.debounce_ticks {
        settings.debounce_ticks = v;
    }
    if let Some(v) = args.mode_switching {
        settings.mode_switching = v;
    }
    if let Some(v) = args.led_off {
        settings.led_off = v;
    }
    if let Some(v) = args.ws2812b {
        settings.ws2812b = v;
    }
    if let Some(v) = args.start {
        settings.effectors.start = v;
    }
    if let Some(v) = args.select {
        settings.effectors.select = v;
    }
    if let Some(v) = args.b8 {
        settings.effectors.b8 = v;
    }
    if let Some(v) = args.b9 {
        settings.effectors.b9 = v;
    }
}

fn apply_rgb_args(rgb: &mut RgbSettings, args: &RgbArgs, palette: Option<u8>) {
    if let Some(v) = args.mode {
        rgb.mode = v;
    }
    if args.reset_colors {
        rgb.reset_colors();
    }
    for (slot, color) in [args.color1, args.color2, args.color3].into_iter().enumerate() {
        if let Some(color) = color {
            rgb.colors[slot] = color;
        }
    }
    if let Some(v) = args.num_leds {
        rgb.num_leds = v;
    }
    if let Some(v) = args.brightness {
        rgb.brightness = v;
    }
    if let Some(v) = palette {
        rgb.palette = v;
    }
    if let Some(v) = args.multiplicity {
        rgb.multiplicity = v;
    }
    if let Some(v) = args.idle_speed {
        rgb.idle_speed = v;
    }
    if let Some(v) = args.hid_control {
        rgb.hid_control = v;
    }
    if let Some(v) = args.react_to_tt {
        rgb.react_to_tt = v;
    }
    if let Some(v) = args.flip_direction {
        rgb.flip_direction = v;
    }
    if let Some(v) = args.tt_speed {
        rgb.tt_speed = v;
    }
    if let Some(v) = args.fade_out {
        rgb.fade_out = v;
    }
    if let Some(v) = args.idle_brightness {
        rgb.idle_brightness = v;
    }

    warn_unused_rgb_fields(rgb, args);
}

/// Warn about requested fields the selected mode ignores
fn warn_unused_rgb_fields(rgb: &RgbSettings, args: &RgbArgs) {
    let Some(mode) = rgb.descriptor() else {
        warn!("RGB mode {} is not known to this tool", rgb.mode);
        return;
    };
    if args.idle_speed.is_some() && !mode.idle_speed_meaningful(rgb.react_to_tt) {
        warn!("Idle speed has no effect in mode '{}'", mode.name);
    }
    if args.tt_speed.is_some() && !mode.tt_speed_meaningful(rgb.react_to_tt) {
        warn!("Turntable speed has no effect in mode '{}'", mode.name);
    }
    if args.palette.is_some() && !mode.uses_palettes {
        warn!("Mode '{}' does not use palettes", mode.name);
    }
    match (args.multiplicity, mode.multiplicity) {
        (Some(_), None) => warn!("Mode '{}' has no multiplicity setting", mode.name),
        (Some(v), Some(range)) if !(range.min..=range.max).contains(&v) => warn!(
            "{} for '{}' should be between {} and {}",
            range.label, mode.name, range.min, range.max
        ),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcin_config::{Effector, KeyPreset, PollRate, RgbColor, TurntableMode};

    #[test]
    fn test_set_args_only_touch_given_fields() {
        let mut settings = Settings::default();
        settings.label = "keep".into();
        settings.invert_qe1 = true;

        let args = SetArgs {
            poll_rate: Some(PollRate::Hz250),
            turntable_mode: Some(TurntableMode::Both),
            b9: Some(Effector::E1),
            ..Default::default()
        };
        apply_set_args(&mut settings, &args);

        assert_eq!(settings.label, "keep");
        assert!(settings.invert_qe1);
        assert_eq!(settings.poll_rate, PollRate::Hz250);
        assert_eq!(settings.turntable_mode, TurntableMode::Both);
        assert_eq!(settings.effectors.b9, Effector::E1);
        assert_eq!(settings.effectors.b8, Effector::E3);
    }

    #[test]
    fn test_rgb_args() {
        let mut rgb = RgbSettings::default();
        let args = RgbArgs {
            mode: Some(4),
            color2: Some(RgbColor::new(1, 2, 3)),
            multiplicity: Some(2),
            tt_speed: Some(-40),
            ..Default::default()
        };
        apply_rgb_args(&mut rgb, &args, Some(5));
        assert_eq!(rgb.mode, 4);
        assert_eq!(rgb.colors[0], RgbColor::RED);
        assert_eq!(rgb.colors[1], RgbColor::new(1, 2, 3));
        assert_eq!(rgb.palette, 5);
        assert_eq!(rgb.multiplicity, 2);
        assert_eq!(rgb.tt_speed, -40);

        let reset = RgbArgs {
            reset_colors: true,
            ..Default::default()
        };
        apply_rgb_args(&mut rgb, &reset, None);
        assert_eq!(rgb.colors, RgbSettings::RESET_COLORS);
        assert_eq!(rgb.palette, 5);
    }

    #[test]
    fn test_parse_bindings() {
        let pairs = vec!["b1=z".to_string(), "tt-cw=0x52".to_string()];
        let parsed = parse_bindings(&pairs).unwrap();
        assert_eq!(parsed[0], ("b1".to_string(), Key(0x1D)));
        assert_eq!(parsed[1], ("tt-cw".to_string(), Key(0x52)));

        assert!(parse_bindings(&["b1".to_string()]).is_err());
        assert!(parse_bindings(&["b8=A".to_string()]).is_err());
        assert!(parse_bindings(&["b1=NOPE".to_string()]).is_err());
    }

    #[test]
    fn test_preset_then_bind() {
        let mut settings = Settings::default();
        settings.keys = KeyPreset::Letters.bindings();
        for (button, key) in parse_bindings(&["e1=ENTER".to_string()]).unwrap() {
            settings.keys.bind(&button, key).unwrap();
        }
        assert_eq!(settings.keys.0[0], 0x1D);
        assert_eq!(settings.keys.0[7], 0x28);
    }
}
