//! Configuration for the folio terminal portfolio.
//!
//! Settings live in `config.toml` under the platform config directory.
//! Every field is optional in the file; missing fields take their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use folio_core::{AccentTheme, CellSize, Page};
use serde::{Deserialize, Serialize};

/// File name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

/// Lowest accepted frame rate.
pub const MIN_FRAME_RATE: u16 = 1;

/// Highest accepted frame rate.
pub const MAX_FRAME_RATE: u16 = 120;

/// Errors raised while reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("no home directory found for the config file")]
    NoConfigDir,
}

/// User configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Page shown on startup.
    pub start_page: Page,
    /// Accent color for the UI and the particle background.
    pub accent: AccentTheme,
    /// Whether the animated background is shown.
    pub background: bool,
    /// Target frames per second of the main loop.
    pub frame_rate: u16,
    /// Assumed pixel width of a terminal cell.
    pub cell_width: u16,
    /// Assumed pixel height of a terminal cell.
    pub cell_height: u16,
    /// Where tracing output goes; no logging when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let cell = CellSize::default();
        Self {
            start_page: Page::Home,
            accent: AccentTheme::Purple,
            background: true,
            frame_rate: 30,
            cell_width: cell.width,
            cell_height: cell.height,
            log_file: None,
        }
    }
}

impl Config {
    /// Default location of the configuration file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        ProjectDirs::from("", "", "folio")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, text).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Clamp numeric fields into their accepted ranges.
    pub fn normalized(mut self) -> Self {
        self.frame_rate = self.frame_rate.clamp(MIN_FRAME_RATE, MAX_FRAME_RATE);
        self.cell_width = self.cell_width.max(1);
        self.cell_height = self.cell_height.max(1);
        self
    }

    /// Cell size in pixels.
    pub fn cell_size(&self) -> CellSize {
        CellSize::new(self.cell_width, self.cell_height)
    }

    /// Time budget of one frame in milliseconds.
    pub fn frame_interval_ms(&self) -> u64 {
        1000 / u64::from(self.frame_rate.max(MIN_FRAME_RATE))
    }
}
