//! Query (read-only) command handlers.

use std::path::Path;

use anyhow::Context;
use arcin_conf::{display, settings_file};
use arcin_config::flags::config_flag_names;
use arcin_config::{encode, Settings};
use crossterm::style::Stylize;

use super::{CommandResult, Target};

/// List attached controllers
pub fn list(json: bool) -> CommandResult {
    let devices = arcin_config::list_controllers()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&devices)?);
        return Ok(());
    }
    if devices.is_empty() {
        println!("No controllers found");
        return Ok(());
    }
    for device in &devices {
        println!("{}", display::describe_device(device));
    }
    Ok(())
}

/// Read and print the current configuration
pub fn show(target: &Target, json: bool, raw: bool) -> CommandResult {
    let mut controller = target.open()?;
    let record = controller
        .read_record()
        .context("Failed to read configuration")?;
    let settings = Settings::from_record(&record);

    if json {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Controller:".bold(),
        controller.device_info().display_name()
    );
    print!("{}", display::describe_settings(&settings));

    if raw {
        let payload = encode(&record)?;
        println!("{}", "Raw payload:".bold());
        for chunk in payload.chunks(16) {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
            println!("  {}", hex.join(" "));
        }
        println!(
            "  flags=0x{:08x} [{}]",
            record.flags,
            config_flag_names(record.flags).join(" ")
        );
        println!(
            "  rgb.flags=0x{:02x} mode_options=0x{:02x}",
            record.rgb.flags, record.rgb.mode_options
        );
    }
    Ok(())
}

/// Read the configuration and save it as TOML
pub fn export(target: &Target, file: &Path) -> CommandResult {
    let settings = target
        .open()?
        .read_settings()
        .context("Failed to read configuration")?;
    settings_file::save(file, &settings)?;
    println!("Saved '{}' to {}", settings.label, file.display());
    Ok(())
}
