//! First-run setup and the startup greeting

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::path::Path;
use tracing::info;

use super::ui::ask_text;
use crate::config::{Config, ConfigError};

const BANNER: &str = r#"
  ___ ___  ___   ___  _  __
 / __| _ )/ _ \ / _ \| |/ /
| (__| _ \ (_) | (_) | ' <
 \___|___/\___/ \___/|_|\_\
"#;

/// Ask for the user's name and default country code, then save them to
/// `path`. Re-prompts until both are valid.
pub fn run_setup(path: &Path) -> Result<Config> {
    println!("Welcome! Let's set things up.");

    let config = loop {
        let name = ask_text("Your full name", None)?;
        let code = ask_text("Default country code (e.g. +91)", None)?;

        match Config::new(name, &code) {
            Ok(config) => break config,
            Err(ConfigError::Invalid(msg)) => println!("{}", msg),
            Err(e) => return Err(e.into()),
        }
    };

    config
        .save(path)
        .with_context(|| format!("Failed to save settings to {}", path.display()))?;
    info!(path = %path.display(), "saved settings");

    Ok(config)
}

pub fn greeting(config: &Config) -> String {
    format!("Welcome, {}!", config.user.name)
}

pub fn greet(config: &Config) {
    println!("{}", BANNER.bold());
    println!("{}", greeting(config));
}
