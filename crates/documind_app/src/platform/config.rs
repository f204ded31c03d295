use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use documind_core::Settings;
use documind_logging::dm_info;
use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "documind.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("unknown log level '{0}'")]
    LogLevel(String),
}

/// On-disk form of the app configuration. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub action_delay_ms: u64,
    pub contract_delay_ms: u64,
    pub chat_reply_delay_ms: u64,
    pub notification_timeout_ms: u64,
    pub accepted_extensions: Vec<String>,
    pub enforce_accepted_extensions: bool,
    pub log_destination: LogDestination,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = Settings::default();
        Self {
            action_delay_ms: millis(settings.action_delay),
            contract_delay_ms: millis(settings.contract_delay),
            chat_reply_delay_ms: millis(settings.chat_reply_delay),
            notification_timeout_ms: millis(settings.notification_timeout),
            accepted_extensions: settings.accepted_extensions,
            enforce_accepted_extensions: settings.enforce_accepted_extensions,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn settings(&self) -> Settings {
        Settings {
            action_delay: Duration::from_millis(self.action_delay_ms),
            contract_delay: Duration::from_millis(self.contract_delay_ms),
            chat_reply_delay: Duration::from_millis(self.chat_reply_delay_ms),
            notification_timeout: Duration::from_millis(self.notification_timeout_ms),
            accepted_extensions: self
                .accepted_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            enforce_accepted_extensions: self.enforce_accepted_extensions,
        }
    }

    pub fn level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

pub fn parse_config(path: &Path, text: &str) -> Result<AppConfig, ConfigError> {
    ron::from_str(text).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    let config = parse_config(path, &text)?;
    dm_info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Config path from the first command-line argument, else `documind.ron`.
pub fn config_path(mut args: impl Iterator<Item = String>) -> PathBuf {
    args.nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}
