use crate::game::Board;
use crate::leaderboard::LeaderboardStore;
use crate::util::Globals;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Geometry of the playing field
    #[serde(default)]
    pub(crate) board: Board,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Settings about the log file
    #[serde(default)]
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("neonsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the leaderboard store at the path given in the configuration
    /// or, if that is not set, at the default path
    pub(crate) fn leaderboard_store(&self) -> LeaderboardStore {
        LeaderboardStore::new(
            self.files
                .leaderboard_file
                .clone()
                .or_else(LeaderboardStore::default_path),
        )
    }

    pub(crate) fn globals(&self) -> Globals {
        Globals {
            board: self.board,
            store: self.leaderboard_store(),
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawFileConfig")]
pub(crate) struct FileConfig {
    /// Path at which the leaderboard should be stored
    leaderboard_file: Option<PathBuf>,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawFileConfig {
    leaderboard_file: Option<String>,
}

impl TryFrom<RawFileConfig> for FileConfig {
    type Error = ConfigError;

    fn try_from(value: RawFileConfig) -> Result<FileConfig, ConfigError> {
        Ok(FileConfig {
            leaderboard_file: value.leaderboard_file.map(expand_tilde).transpose()?,
        })
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawLoggingConfig")]
pub(crate) struct LoggingConfig {
    /// Whether to write a log file at all
    pub(crate) enabled: bool,

    /// Path to the log file; `None` means the default path
    file: Option<PathBuf>,

    /// Minimum level of events to log when `RUST_LOG` is not set
    pub(crate) level: LevelFilter,
}

impl LoggingConfig {
    /// Return the log file given in the configuration or, if that is not set,
    /// the default log file path.  Returns `None` if no path is configured
    /// and the default could not be computed.
    pub(crate) fn file(&self) -> Option<PathBuf> {
        self.file.clone().or_else(|| {
            dirs::data_local_dir().map(|p| p.join("neonsnake").join("neonsnake.log"))
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            enabled: true,
            file: None,
            level: LevelFilter::INFO,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawLoggingConfig {
    enabled: bool,
    file: Option<String>,
    level: String,
}

impl Default for RawLoggingConfig {
    fn default() -> RawLoggingConfig {
        RawLoggingConfig {
            enabled: true,
            file: None,
            level: String::from("info"),
        }
    }
}

impl TryFrom<RawLoggingConfig> for LoggingConfig {
    type Error = ConfigError;

    fn try_from(value: RawLoggingConfig) -> Result<LoggingConfig, ConfigError> {
        Ok(LoggingConfig {
            enabled: value.enabled,
            file: value.file.map(expand_tilde).transpose()?,
            level: LevelFilter::from_str(&value.level)
                .map_err(|_| ConfigError::Level(value.level))?,
        })
    }
}

/// Replace a leading `~/` in `path` with the user's home directory
fn expand_tilde(path: String) -> Result<PathBuf, ConfigError> {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or(ConfigError::NoHome),
        None => Ok(PathBuf::from(path)),
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to determine home directory")]
    NoHome,
    #[error("invalid log level: {0:?}")]
    Level(String),
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
