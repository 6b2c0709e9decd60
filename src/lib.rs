pub mod cli;
pub mod core;

use crate::core::FareCatalog;
use crate::core::config::AppConfig;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Show,
    Quote { fare: String, category: String },
    Categories,
    Export,
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Fares starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let catalog = FareCatalog::from_config(&config)?;

    match command {
        AppCommand::Show => cli::show::run(&catalog),
        AppCommand::Quote { fare, category } => cli::quote::run(&catalog, &fare, &category),
        AppCommand::Categories => cli::categories::run(catalog.registry()),
        AppCommand::Export => cli::export::run(&catalog),
    }
}
