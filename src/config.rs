//! Per-user settings file
//!
//! A small TOML file holding the user's display name and the default
//! country code applied to phone numbers typed without one. Its absence
//! means the program has never been set up.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid setting: {0}")]
    Invalid(String),
    #[error("Could not find config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub user: UserSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub name: String,
    /// Digits only, without the leading `+`
    pub country_code: String,
}

impl Config {
    /// Build a config, normalising the country code (`+91` and `91` are
    /// the same) and rejecting anything that is not 1-3 digits.
    pub fn new(name: impl Into<String>, country_code: &str) -> Result<Self, ConfigError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::Invalid("name must not be empty".into()));
        }

        Ok(Self {
            user: UserSettings {
                name,
                country_code: normalize_country_code(country_code)?,
            },
        })
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("cbook").join("config.toml"))
    }

    /// Load settings. `Ok(None)` when the file does not exist yet.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Re-validate: the file is user-editable
        Self::new(config.user.name, &config.user.country_code).map(Some)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string(self)?;
        fs::write(path, text).map_err(io_err)
    }

    /// Country code with its `+`, ready to prefix a number
    pub fn country_prefix(&self) -> String {
        format!("+{}", self.user.country_code)
    }
}

fn normalize_country_code(code: &str) -> Result<String, ConfigError> {
    let digits = code.trim().trim_start_matches('+');
    let valid = (1..=3).contains(&digits.len()) && digits.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(ConfigError::Invalid(format!(
            "country code must be 1-3 digits, got '{}'",
            code
        )));
    }
    Ok(digits.to_string())
}
