mod app;
mod background;
mod cli;
mod logging;
mod nav;
mod pages;

use std::io::stdout;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use folio_background::{BackgroundOptions, PointsMaterial, TerminalFetch};
use folio_config::Config;
use tracing::{info, warn};

use crate::app::App;
use crate::background::BackgroundHost;
use crate::cli::Cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let loaded = cli.config_path().and_then(|path| Config::load_from(&path));
    let (config, load_error) = match loaded {
        Ok(config) => (cli.apply(config), None),
        Err(e) => (cli.apply(Config::default()), Some(e)),
    };

    if cli.write_config {
        if let Some(e) = load_error {
            return Err(e.into());
        }
        let path = cli.config_path()?;
        config.save_to(&path)?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    logging::init(config.log_file.as_deref())?;
    if let Some(e) = load_error {
        warn!(error = %e, "using default configuration");
    }
    info!(
        page = %config.start_page,
        background = config.background,
        fps = config.frame_rate,
        "starting folio"
    );

    let background = if config.background {
        let options = BackgroundOptions {
            material: PointsMaterial::with_color(config.accent.rgb()),
            cell: config.cell_size(),
            ..Default::default()
        };
        BackgroundHost::new(TerminalFetch::from_env(), options)
    } else {
        BackgroundHost::disabled(config.cell_size())
    };

    let terminal = ratatui::init();
    if let Err(e) = execute!(stdout(), EnableMouseCapture) {
        warn!(error = %e, "mouse capture unavailable");
    }
    let result = App::new(&config, background).run(terminal);
    let _ = execute!(stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}
