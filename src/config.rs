//! `shiai.toml` configuration.
//!
//! Every section and field is optional:
//!
//! ```toml
//! [store]
//! path = ".shiai"
//! key = "friday-league"     # defaults to the format's storage key
//!
//! [session]
//! format = "three-man"
//! positions = ["Senpo", "Chuken", "Taisho"]
//! red_team = "Osaka"
//! white_team = "Kyoto"
//!
//! [clock]
//! minutes = 4
//! seconds = 0
//!
//! [logging]
//! level = "shiai=debug"
//! format = "json"
//! output = "stderr"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::bout::{ClockReading, Competitor, DEFAULT_MINUTES};
use crate::scoreboard::Scoreboard;
use crate::session::{Format, Session};
use crate::store::KvStore;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "shiai.toml";

/// Default store directory.
pub const DEFAULT_STORE_PATH: &str = ".shiai";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub store: StoreConfig,
    pub session: SessionConfig,
    pub clock: ClockConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub path: PathBuf,
    /// Record key; `None` uses the format's storage key.
    pub key: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            key: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub format: Format,
    /// Custom position labels; empty keeps the format's own.
    pub positions: Vec<String>,
    pub red_team: String,
    pub white_team: String,
}

/// Bout duration. Values are clamped like a clock edit.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockConfig {
    pub minutes: i64,
    pub seconds: i64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            minutes: DEFAULT_MINUTES.into(),
            seconds: 0,
        }
    }
}

impl ClockConfig {
    pub fn duration(&self) -> ClockReading {
        ClockReading::clamped(self.minutes, self.seconds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Subscriber settings for the binary.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `shiai=debug`.
    pub level: String,
    pub format: LogFormat,
    /// `stdout`, `stderr` or a file path to append to.
    pub output: String,
    pub color: bool,
    pub timestamps: bool,
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            color: true,
            timestamps: true,
            target: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(path.as_ref().display().to_string(), e))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Load `path` if given, else `shiai.toml` when present, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(CONFIG_FILE).exists() => Self::from_file(CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Key the session record is stored under.
    pub fn record_key(&self) -> &str {
        self.store
            .key
            .as_deref()
            .unwrap_or_else(|| self.session.format.storage_key())
    }

    /// A fresh session shaped by this configuration.
    pub fn new_session(&self) -> Session {
        let mut session = Session::with_positions(
            self.session.format,
            self.session.positions.clone(),
            self.clock.duration(),
        );
        session.set_team_name(Competitor::Red, self.session.red_team.clone());
        session.set_team_name(Competitor::White, self.session.white_team.clone());
        session
    }

    /// Open (or create) the configured store and restore the session from it.
    pub fn open_scoreboard(&self) -> crate::Result<Scoreboard<KvStore>> {
        let store = KvStore::open_or_init(&self.store.path)?;
        Ok(Scoreboard::open(self.new_session(), store, self.record_key()))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, #[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}
