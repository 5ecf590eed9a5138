//! Human-readable rendering of controller settings

use std::fmt::Write;

use arcin_config::keycodes::display_name;
use arcin_config::rgb::{format_tt_speed, mode_descriptor};
use arcin_config::{RgbSettings, Settings};
use arcin_transport::DiscoveredDevice;

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// One line per attached controller
pub fn describe_device(device: &DiscoveredDevice) -> String {
    let info = &device.info;
    format!(
        "{}  serial={}  VID={:04X} PID={:04X}  {}",
        info.product_name.as_deref().unwrap_or("arcin"),
        info.serial.as_deref().unwrap_or("-"),
        info.vid,
        info.pid,
        info.device_path
    )
}

/// Full settings report, grouped by section
pub fn describe_settings(settings: &Settings) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_settings(&mut out, settings);
    out
}

fn write_settings(out: &mut String, s: &Settings) -> std::fmt::Result {
    writeln!(out, "General:")?;
    writeln!(out, "  Label:          {}", s.label)?;
    writeln!(out, "  Poll rate:      {}", s.poll_rate.label())?;
    writeln!(out, "  Input mode:     {}", s.input_mode.label())?;
    writeln!(out, "  E2 multi-tap:   {}", on_off(s.select_multi_tap))?;
    writeln!(out, "  Mode switching: {}", on_off(s.mode_switching))?;
    if s.debounce {
        writeln!(out, "  Debounce:       {} ticks", s.debounce_ticks)?;
    } else {
        writeln!(out, "  Debounce:       off")?;
    }

    writeln!(out, "Turntable:")?;
    writeln!(out, "  Mode:           {}", s.turntable_mode.label())?;
    writeln!(out, "  Invert QE1:     {}", on_off(s.invert_qe1))?;
    writeln!(out, "  Sensitivity:    {}", s.sensitivity)?;

    writeln!(out, "Lights:")?;
    writeln!(out, "  LED mode:       {}", s.led_mode.label())?;
    writeln!(out, "  LED off:        {}", on_off(s.led_off))?;

    writeln!(out, "Effectors:")?;
    writeln!(out, "  Start:          {}", s.effectors.start.label())?;
    writeln!(out, "  Select:         {}", s.effectors.select.label())?;
    writeln!(out, "  B8:             {}", s.effectors.b8.label())?;
    writeln!(out, "  B9:             {}", s.effectors.b9.label())?;

    writeln!(out, "Keyboard:")?;
    for (button, key) in s.keys.iter() {
        writeln!(out, "  {:<15} {}", format!("{button}:"), display_name(key.0))?;
    }

    if s.ws2812b {
        writeln!(out, "RGB (WS2812B on B9):")?;
        write_rgb(out, &s.rgb)?;
    } else {
        writeln!(out, "RGB:            disabled")?;
    }
    Ok(())
}

fn write_rgb(out: &mut String, rgb: &RgbSettings) -> std::fmt::Result {
    let Some(mode) = mode_descriptor(rgb.mode) else {
        writeln!(out, "  Mode:           {} (unknown)", rgb.mode)?;
        return Ok(());
    };

    writeln!(out, "  Mode:           {} ({})", rgb.mode, mode.name)?;
    writeln!(out, "  LEDs:           {}", rgb.num_leds)?;
    writeln!(out, "  Brightness:     {}", rgb.brightness)?;
    writeln!(out, "  HID control:    {}", on_off(rgb.hid_control))?;
    writeln!(out, "  Flip direction: {}", on_off(rgb.flip_direction))?;

    let names = ["Primary", "Secondary", "Tertiary"];
    for (name, color) in names
        .iter()
        .zip(rgb.colors.iter())
        .take(usize::from(mode.num_colors))
    {
        writeln!(out, "  {:<15} {}", format!("{name}:"), color.to_hex())?;
    }
    if mode.uses_palettes {
        let palette = rgb.palette_name().unwrap_or("unknown");
        writeln!(out, "  Palette:        {} ({palette})", rgb.palette)?;
    }
    if let Some(multiplicity) = mode.multiplicity {
        writeln!(
            out,
            "  {:<15} {}",
            format!("{}:", multiplicity.label),
            rgb.multiplicity
        )?;
    }
    if mode.idle_speed_meaningful(rgb.react_to_tt) {
        if let Some(unit) = mode.idle_unit {
            writeln!(out, "  Idle speed:     {}", unit.format(rgb.idle_speed))?;
        }
    }

    writeln!(out, "  React to TT:    {}", on_off(rgb.react_to_tt))?;
    if rgb.react_to_tt {
        if mode.tt_speed_meaningful(true) {
            writeln!(out, "  TT speed:       {}x", format_tt_speed(rgb.tt_speed))?;
        }
        writeln!(out, "  Fade out:       {}", rgb.fade_out.label())?;
        writeln!(out, "  Idle brightness: {}", rgb.idle_brightness)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcin_config::KeyPreset;

    #[test]
    fn test_describe_defaults() {
        let text = describe_settings(&Settings::default());
        assert!(text.contains("Poll rate:      1000 Hz"));
        assert!(text.contains("Sensitivity:    1:1"));
        assert!(text.contains("Debounce:       off"));
        assert!(text.contains("Start:          E1 (JOY 9)"));
        assert!(text.contains("RGB:            disabled"));
    }

    #[test]
    fn test_describe_keys() {
        let mut settings = Settings::default();
        settings.keys = KeyPreset::Djmax1p.bindings();
        let text = describe_settings(&settings);
        assert!(text.contains("B1:             Z"));
        assert!(text.contains("TT CCW:         UP"));
    }

    #[test]
    fn test_rgb_fields_follow_mode() {
        let mut settings = Settings::default();
        settings.ws2812b = true;
        settings.rgb.mode = 0;
        settings.rgb.idle_speed = 100;
        let text = describe_settings(&settings);
        assert!(text.contains("Single-color / breathe"));
        assert!(text.contains("Primary:        #ff0000"));
        assert!(!text.contains("Secondary:"));
        assert!(text.contains("Idle speed:     39.22 BPM"));
        assert!(!text.contains("TT speed"));

        // Breathe has no idle animation while reacting to the turntable
        settings.rgb.react_to_tt = true;
        settings.rgb.tt_speed = 15;
        let text = describe_settings(&settings);
        assert!(!text.contains("Idle speed"));
        assert!(text.contains("TT speed:       1.5x"));

        settings.rgb.mode = 7;
        settings.rgb.palette = 3;
        settings.rgb.multiplicity = 2;
        let text = describe_settings(&settings);
        assert!(text.contains("Palette:        3 (DJ TROOPERS)"));
        assert!(text.contains("Wave length:    2"));
        assert!(text.contains("Idle speed:     50.00 RPM"));
        assert!(!text.contains("Primary:"));
    }
}
