use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tablemaker.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("reading {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub database_url: Option<String>,
    pub schema: String,
    pub indent: String,
    /// Directory receiving one `.sql` file per table. Unset prints to stdout.
    pub out_dir: Option<PathBuf>,
    /// Introspection timeout in seconds; 0 disables it.
    pub timeout_secs: u64,
    pub max_concurrency: usize,
    pub manifest: bool,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: None,
            schema: "public".to_string(),
            indent: tablemaker_core::render::DEFAULT_INDENT.to_string(),
            out_dir: None,
            timeout_secs: 30,
            max_concurrency: tablemaker_output::DEFAULT_MAX_CONCURRENCY,
            manifest: false,
            max_connections: 5,
            acquire_timeout_secs: 10,
            log: LogSettings::default(),
        }
    }
}

/// Load settings from `path`, or from `tablemaker.toml` in the working
/// directory when present, falling back to defaults.
pub fn load_settings(path: Option<&Path>) -> SettingsResult<Settings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !candidate.is_file() {
                return Ok(Settings::default());
            }
            candidate
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| SettingsError::Read {
        path: path.clone(),
        source,
    })?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> SettingsResult<Settings> {
    Ok(toml::from_str(content)?)
}
