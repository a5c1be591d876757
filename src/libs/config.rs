//! Configuration management for tabmon.
//!
//! The configuration is a small JSON document stored in the platform data
//! directory. The only tunable is the idle threshold of the activity monitor;
//! a missing file means defaults.
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use tabmon::libs::config::Config;
//!
//! let config = Config::read()?;
//! let monitor = config.monitor.unwrap_or_default();
//! println!("Idle after {}s", monitor.idle_threshold);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Idle threshold used when nothing is configured, in seconds.
pub const DEFAULT_IDLE_THRESHOLD: u64 = 60;

/// Activity monitor settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MonitorConfig {
    /// Seconds without a qualifying interaction before the user is considered idle.
    pub idle_threshold: u64,
}

impl MonitorConfig {
    pub fn idle_period(&self) -> Duration {
        Duration::from_secs(self.idle_threshold)
    }

    /// Rejects a zero threshold, which would flip to idle on every tick.
    pub fn validate(&self) -> Result<()> {
        if self.idle_threshold == 0 {
            msg_bail_anyhow!(Message::InvalidIdleThreshold(self.idle_threshold));
        }
        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            idle_threshold: DEFAULT_IDLE_THRESHOLD,
        }
    }
}

/// Root configuration document.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    /// Activity monitor settings; `None` falls back to [`MonitorConfig::default`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor: Option<MonitorConfig>,
}

impl Config {
    /// Path of the configuration file, creating the data directory if needed.
    pub fn path() -> Result<PathBuf> {
        DataStorage::new().get_path(CONFIG_FILE_NAME)
    }

    /// Reads configuration from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or if
    /// the stored monitor settings are invalid.
    pub fn read() -> Result<Config> {
        let config_file_path = Self::path()?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        if let Some(monitor) = &config.monitor {
            monitor.validate()?;
        }
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = Self::path()?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. Returns `false` when there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = Self::path()?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Runs the interactive setup, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.monitor.clone().unwrap_or_default();

        msg_print!(Message::ConfigModuleMonitor);
        let monitor = MonitorConfig {
            idle_threshold: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptIdleThreshold.to_string())
                .default(default.idle_threshold)
                .validate_with(|value: &u64| -> Result<(), String> {
                    if *value == 0 {
                        Err(Message::InvalidIdleThreshold(*value).to_string())
                    } else {
                        Ok(())
                    }
                })
                .interact_text()?,
        };
        config.monitor = Some(monitor);

        Ok(config)
    }
}
