use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::clients::schedule_client::DEFAULT_BASE_URL;
use crate::storage::get_data_location;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config line {line}: {content}")]
    Syntax { line: usize, content: String },
    #[error("invalid value for {key}: {value:?}")]
    Value { key: &'static str, value: String },
}

/// Raw `KEY=VALUE` pairs read from `CONFIG_FILE`.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(ConfigError::Syntax {
                    line: idx + 1,
                    content: line.to_string(),
                });
            };
            values.insert(key.trim().to_string(), unquote(value.trim()).to_string());
        }
        Ok(Self { values })
    }

    /// File value first, then the process environment.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
    }
}

fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted { &value[1..value.len() - 1] } else { value }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    pub data_location: PathBuf,
    pub schedule_base_url: String,
    pub request_timeout: Duration,
    pub log_level: String,
}

impl AppSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let request_timeout = match config.get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Value {
                    key: "REQUEST_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            data_location: get_data_location(config.get("DATA_LOCATION").as_deref()),
            schedule_base_url: config
                .get("SCHEDULE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            request_timeout,
            log_level: config
                .get("LOG_LEVEL")
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
