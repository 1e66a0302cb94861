use anyhow::Context;
use is_terminal::IsTerminal;
use log::{info, LevelFilter};
use std::{io, process};
use weathervane::{
    config::Config,
    display::terminal::TerminalDisplay,
    geocode::GeocodingClient,
    search::App,
    storage::FileStorage,
    weather::WeatherClient,
};

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_module("weathervane", LevelFilter::Warn)
        .parse_default_env()
        .init();

    ctrlc::set_handler(|| {
        info!("Received termination signal, exiting");
        process::exit(0);
    })
    .context("Error installing signal handler")?;

    let config = Config::load()?;
    let storage = FileStorage::new(&config.settings_path);
    info!("Using settings file {}", storage.path().display());
    let mut app = App::new(
        GeocodingClient::new(&config),
        WeatherClient::new(&config),
        storage,
    );

    let stdout = io::stdout();
    // No color escapes when piped into a file or another program
    let color = stdout.is_terminal();
    let mut display = TerminalDisplay::new(
        io::stdin().lock(),
        stdout,
        config.palettes,
        color,
    );
    app.run(&mut display)
}
