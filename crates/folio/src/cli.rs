//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use folio_config::{Config, ConfigError};
use folio_core::Page;

#[derive(Debug, Parser)]
#[command(
    name = "folio",
    version,
    about = "A terminal portfolio with an animated particle background"
)]
pub struct Cli {
    /// Page shown on startup (home, about, projects, skill, contact).
    #[arg(long, value_name = "PAGE")]
    pub page: Option<Page>,

    /// Disable the animated background.
    #[arg(long)]
    pub no_background: bool,

    /// Target frames per second.
    #[arg(long, value_name = "N")]
    pub fps: Option<u16>,

    /// Configuration file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Append tracing output to this file.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    pub write_config: bool,
}

impl Cli {
    /// Path of the configuration file in use.
    pub fn config_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Config::default_path(),
        }
    }

    /// Apply command line overrides on top of `config`.
    pub fn apply(&self, mut config: Config) -> Config {
        if let Some(page) = self.page {
            config.start_page = page;
        }
        if self.no_background {
            config.background = false;
        }
        if let Some(fps) = self.fps {
            config.frame_rate = fps;
        }
        if let Some(path) = &self.log_file {
            config.log_file = Some(path.clone());
        }
        config.normalized()
    }
}
