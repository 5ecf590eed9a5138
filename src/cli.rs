// CLI definitions using clap

use std::path::PathBuf;

use arcin_config::rgb::{IDLE_SPEED_MAX, MULTIPLICITY_MAX, NUM_LEDS_MAX};
use arcin_config::{
    Effector, FadeOut, InputMode, KeyPreset, LedMode, PollRate, RgbColor, Sensitivity,
    TurntableMode,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "arcin-conf")]
#[command(author, version, about = "Configuration tool for arcin-infinitas controllers")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Select a controller by serial number (default: first one found)
    #[arg(long, global = true)]
    pub serial: Option<String>,

    /// Enable transport monitoring (prints all feature reports)
    #[arg(long, global = true)]
    pub monitor: bool,

    /// Show raw hex dump alongside monitored reports
    #[arg(long, global = true)]
    pub hex: bool,

    /// Log level filter (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    // === Query Commands ===
    /// List attached controllers
    #[command(visible_aliases = ["ls", "devices"])]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Read and show the current configuration
    #[command(visible_aliases = ["get", "info"])]
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Also dump the raw 60-byte payload and flag bits
        #[arg(long)]
        raw: bool,
    },

    /// Save the current configuration to a TOML file
    #[command(visible_alias = "save")]
    Export {
        /// Output file
        file: PathBuf,
    },

    // === Write Commands ===
    /// Write a TOML settings file to the controller
    #[command(visible_alias = "load")]
    Apply {
        /// Settings file (keys missing from the file take their defaults)
        file: PathBuf,
    },

    /// Change individual settings, keeping everything else
    Set(SetArgs),

    /// Change keyboard bindings
    #[command(visible_alias = "keymap")]
    Keys(KeysArgs),

    /// Change RGB strip settings
    #[command(visible_alias = "led")]
    Rgb(RgbArgs),

    // === Catalogues ===
    /// List RGB modes and which fields they use
    Modes,

    /// List RGB palettes
    Palettes,

    /// List key names accepted by `keys --bind`
    #[command(visible_alias = "keynames")]
    Keycodes,
}

#[derive(Args, Default)]
pub struct SetArgs {
    /// Controller label (up to 12 bytes)
    #[arg(long)]
    pub label: Option<String>,

    /// USB poll rate (1000hz, 250hz)
    #[arg(long)]
    pub poll_rate: Option<PollRate>,

    /// Turntable mode (analog-only, digital-only, both)
    #[arg(long, visible_alias = "tt")]
    pub turntable_mode: Option<TurntableMode>,

    /// Input mode (controller-only, keyboard-only, both)
    #[arg(long)]
    pub input_mode: Option<InputMode>,

    /// Turntable LED mode (default, reactive, hid)
    #[arg(long)]
    pub led_mode: Option<LedMode>,

    /// Digital turntable sensitivity ratio (e.g. 1:4, 2:1)
    #[arg(long)]
    pub sensitivity: Option<Sensitivity>,

    /// E2 multi-function: press E2 once for E2, twice for E3, three times for E2+E3, four times for E4
    #[arg(long)]
    pub multi_tap: Option<bool>,

    /// Invert the direction of the turntable
    #[arg(long)]
    pub invert_qe1: Option<bool>,

    /// Enable debounce logic to compensate for switch chatter
    #[arg(long)]
    pub debounce: Option<bool>,

    /// Debounce window in ticks
    #[arg(long, value_parser = clap::value_parser!(u8).range(2..=10))]
    pub debounce_ticks: Option<u8>,

    /// Allow switching modes with Start + Sel + 1/3/5 held for 3 seconds
    #[arg(long)]
    pub mode_switching: Option<bool>,

    /// Keep the lights out
    #[arg(long)]
    pub led_off: Option<bool>,

    /// Use button 9 pins as WS2812B output
    #[arg(long)]
    pub ws2812b: Option<bool>,

    /// Effector sent by Start (e1-e4)
    #[arg(long)]
    pub start: Option<Effector>,

    /// Effector sent by Select (e1-e4)
    #[arg(long)]
    pub select: Option<Effector>,

    /// Effector sent by B8 (e1-e4)
    #[arg(long)]
    pub b8: Option<Effector>,

    /// Effector sent by B9 (e1-e4)
    #[arg(long)]
    pub b9: Option<Effector>,
}

#[derive(Args, Default)]
pub struct KeysArgs {
    /// Start from a preset (clear, letters, djmax-1p, djmax-2p)
    pub preset: Option<KeyPreset>,

    /// Bind one button, e.g. --bind b1=Z --bind tt-cw=UP
    #[arg(long = "bind", value_name = "BUTTON=KEY")]
    pub bindings: Vec<String>,
}

#[derive(Args, Default)]
pub struct RgbArgs {
    /// Color mode index (see `modes`)
    #[arg(long)]
    pub mode: Option<u8>,

    /// Number of LEDs on the strip
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=NUM_LEDS_MAX as i64))]
    pub num_leds: Option<u8>,

    /// Overall brightness (0-255)
    #[arg(long)]
    pub brightness: Option<u8>,

    /// Primary color (#rrggbb)
    #[arg(long)]
    pub color1: Option<RgbColor>,

    /// Secondary color (#rrggbb)
    #[arg(long)]
    pub color2: Option<RgbColor>,

    /// Tertiary color (#rrggbb)
    #[arg(long)]
    pub color3: Option<RgbColor>,

    /// Reset the three colors to red, green and blue
    #[arg(long)]
    pub reset_colors: bool,

    /// Palette name or index (see `palettes`)
    #[arg(long)]
    pub palette: Option<String>,

    /// Mode-specific count (dots, colors or wave length)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=MULTIPLICITY_MAX as i64))]
    pub multiplicity: Option<u8>,

    /// Idle animation speed (raw 0-240)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=IDLE_SPEED_MAX as i64))]
    pub idle_speed: Option<u8>,

    /// Allow HID to directly control RGB values
    #[arg(long)]
    pub hid_control: Option<bool>,

    /// React to turntable movement (behavior depends on the mode)
    #[arg(long)]
    pub react_to_tt: Option<bool>,

    /// Reverse the order of LEDs on the strip
    #[arg(long)]
    pub flip_direction: Option<bool>,

    /// Turntable animation speed in tenths (-100 to 100)
    #[arg(long, allow_hyphen_values = true, value_parser = clap::value_parser!(i8).range(-100..=100))]
    pub tt_speed: Option<i8>,

    /// Fade out duration (very-quick, quick, slow, really-slow)
    #[arg(long)]
    pub fade_out: Option<FadeOut>,

    /// Brightness while idle, when reacting to the turntable (0-255)
    #[arg(long)]
    pub idle_brightness: Option<u8>,
}
