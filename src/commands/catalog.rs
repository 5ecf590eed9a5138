//! Static tables that need no device.

use arcin_config::keycodes::KEYCODES;
use arcin_config::rgb::RgbModeDescriptor;
use arcin_config::{PALETTES, RGB_MODES};
use crossterm::style::Stylize;

use super::CommandResult;

/// List RGB modes and the fields each one uses
pub fn modes() -> CommandResult {
    println!("{}", "RGB modes:".bold());
    for (index, mode) in RGB_MODES.iter().enumerate() {
        println!("  {index:>2}  {}", mode.name.cyan());
        for line in mode_details(mode) {
            println!("        {line}");
        }
    }
    Ok(())
}

/// List RGB palettes
pub fn palettes() -> CommandResult {
    println!("{}", "Palettes:".bold());
    for (index, name) in PALETTES.iter().enumerate() {
        println!("  {index:>2}  {name}");
    }
    Ok(())
}

/// List key names and their HID usage codes
pub fn keycodes() -> CommandResult {
    println!("{}", "Key names:".bold());
    for (name, code) in KEYCODES {
        println!("  {:<12} 0x{code:02X}", name);
    }
    println!("Unlisted codes can be given as 0xNN.");
    Ok(())
}

fn mode_details(mode: &RgbModeDescriptor) -> Vec<String> {
    let mut lines = Vec::new();
    if mode.num_colors > 0 {
        lines.push(format!("colors: {}", mode.num_colors));
    }
    if mode.uses_palettes {
        lines.push("palette".to_string());
    }
    if let Some(m) = mode.multiplicity {
        lines.push(format!("{}: {}-{} ({})", m.label.to_lowercase(), m.min, m.max, m.tooltip));
    }
    match mode.idle_unit {
        Some(unit) if mode.idle_with_tt_react => {
            lines.push(format!("idle speed in {}", unit.suffix()))
        }
        Some(unit) => lines.push(format!(
            "idle speed in {} (not while reacting to the turntable)",
            unit.suffix()
        )),
        None => {}
    }
    if mode.has_tt_speed {
        lines.push("turntable speed".to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcin_config::rgb::mode_descriptor;

    #[test]
    fn test_mode_details() {
        let breathe = mode_details(mode_descriptor(0).unwrap());
        assert_eq!(breathe[0], "colors: 1");
        assert!(breathe.iter().any(|l| l.contains("not while reacting")));

        let spiral = mode_details(mode_descriptor(7).unwrap());
        assert!(spiral.contains(&"palette".to_string()));
        assert!(spiral.iter().any(|l| l.starts_with("wave length: 1-6")));

        let pride = mode_details(mode_descriptor(8).unwrap());
        assert!(pride.is_empty());
    }
}
