//! TOML settings files

use std::path::{Path, PathBuf};

use arcin_config::Settings;
use thiserror::Error;

/// Errors from loading or saving a settings file
#[derive(Error, Debug)]
pub enum SettingsFileError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Load settings from a TOML file. Missing keys take their defaults.
pub fn load(path: &Path) -> Result<Settings, SettingsFileError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_toml(&content)
}

/// Parse settings from a TOML string
pub fn from_toml(content: &str) -> Result<Settings, SettingsFileError> {
    Ok(toml::from_str(content)?)
}

/// Render settings as TOML
pub fn to_toml(settings: &Settings) -> Result<String, SettingsFileError> {
    Ok(toml::to_string_pretty(settings)?)
}

/// Save settings to a TOML file, replacing it if it exists
pub fn save(path: &Path, settings: &Settings) -> Result<(), SettingsFileError> {
    let content = to_toml(settings)?;
    std::fs::write(path, content).map_err(|source| SettingsFileError::Write {
        path: path.to_path_buf(),
        source,
    })
}
