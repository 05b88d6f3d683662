use clap::Parser;
use color_eyre::Result;
use iced::{Application, Settings};
use log::info;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

use car_finder::{catalog::CatalogClient, config::Config, CarFinder};
use gui::{CarFinderApp, Flags};

mod gui;

fn main() -> Result<()> {
    color_eyre::install()?;
    let config = Config::parse();

    // The renderer is chatty at info level, only our own crate is logged.
    let log_config = ConfigBuilder::new()
        .add_filter_allow_str("car_finder")
        .build();
    TermLogger::init(
        config.log_level(),
        log_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    let storage = config.storage()?;
    info!("Keeping the wishlist in {}", storage.root().display());
    let mut finder = CarFinder::new(storage)?;
    finder.set_dark_mode(config.dark);

    let catalog = CatalogClient::new(&config.api_url)?;
    info!("Using the catalog at {}", catalog.endpoint());

    CarFinderApp::run(Settings::with_flags(Flags { finder, catalog }))?;
    Ok(())
}
