mod keymap;
mod overlay;
mod shell;

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use stronghold_game::{GameConfig, Scenario, classify, panic_report};
use tracing_subscriber::EnvFilter;
use winit::event_loop::{ControlFlow, EventLoop};

#[derive(Parser)]
#[command(name = "stronghold-royale", about = "Stronghold Royale 3D demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON file overriding the default settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Asset root directory
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Scene to build: showcase, landscape or empty
    #[arg(long)]
    scenario: Option<Scenario>,
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(assets) = &cli.assets {
        config.assets_root = assets.clone();
    }
    if let Some(scenario) = cli.scenario {
        config.scenario = scenario;
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    tracing::info!(scenario = %config.scenario, assets = %config.assets_root.display(), "stronghold-royale starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = shell::App::new(config);
    event_loop.run_app(&mut app)?;

    match app.take_failure() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

/// Every failure is reported, and the process still exits with status 0.
fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
    panic::set_hook(Box::new(|info| tracing::error!("panic: {info}")));

    match panic::catch_unwind(AssertUnwindSafe(|| run(&cli))) {
        Ok(Ok(())) => tracing::info!("bye"),
        Ok(Err(error)) => {
            tracing::debug!("{error:?}");
            classify(error.as_ref()).emit();
        }
        Err(_) => panic_report().emit(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_the_config() {
        let cli = Cli::parse_from(["stronghold-royale", "--assets", "/tmp/a", "--scenario", "landscape"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.assets_root, PathBuf::from("/tmp/a"));
        assert_eq!(config.scenario, Scenario::Landscape);
        assert_eq!(config.window_width, 2000);
    }

    #[test]
    fn unknown_scenario_is_rejected() {
        assert!(Cli::try_parse_from(["stronghold-royale", "--scenario", "arena"]).is_err());
    }

    #[test]
    fn missing_config_file_is_a_game_error() {
        let cli = Cli::parse_from(["stronghold-royale", "--config", "/definitely/not/here.json"]);
        let error = load_config(&cli).unwrap_err();
        assert_eq!(classify(error.as_ref()).tier, stronghold_game::FatalTier::Runtime);
    }
}
