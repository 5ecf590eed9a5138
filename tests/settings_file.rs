//! Settings file load/save against a real filesystem

use arcin_conf::{settings_file, SettingsFileError};
use arcin_config::{Effector, KeyPreset, PollRate, RgbColor, Settings, TurntableMode};

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arcin.toml");

    let mut settings = Settings::default();
    settings.label = "DJ ROOM".into();
    settings.poll_rate = PollRate::Hz250;
    settings.turntable_mode = TurntableMode::DigitalOnly;
    settings.effectors.b8 = Effector::E4;
    settings.keys = KeyPreset::Djmax2p.bindings();
    settings.ws2812b = true;
    settings.rgb.mode = 3;
    settings.rgb.colors[2] = RgbColor::new(0x12, 0x34, 0x56);

    settings_file::save(&path, &settings).unwrap();
    let loaded = settings_file::load(&path).unwrap();
    assert_eq!(loaded, settings);

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("poll-rate = \"250hz\""));
    assert!(text.contains("\"#123456\""));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.toml");
    let err = settings_file::load(&path).unwrap_err();
    assert!(matches!(err, SettingsFileError::Read { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(
        &path,
        "label = \"P1\"\ninvert-qe1 = true\n\n[keys]\nb1 = \"Z\"\ntt-cw = \"0x52\"\n\n[rgb]\nnum-leds = 24\n",
    )
    .unwrap();

    let settings = settings_file::load(&path).unwrap();
    let defaults = Settings::default();
    assert_eq!(settings.label, "P1");
    assert!(settings.invert_qe1);
    assert_eq!(settings.keys.0[0], 0x1D);
    assert_eq!(settings.keys.0[11], 0x52);
    assert_eq!(settings.keys.0[1], 0);
    assert_eq!(settings.rgb.num_leds, 24);
    assert_eq!(settings.rgb.colors, defaults.rgb.colors);
    assert_eq!(settings.poll_rate, defaults.poll_rate);
    assert_eq!(settings.effectors, defaults.effectors);
}

#[test]
fn test_bad_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "turntable-mode = \"sideways\"\n").unwrap();
    assert!(matches!(
        settings_file::load(&path),
        Err(SettingsFileError::Parse(_))
    ));
}
