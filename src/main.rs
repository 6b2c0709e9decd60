use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fares::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for fares::AppCommand {
    fn from(cmd: Commands) -> fares::AppCommand {
        match cmd {
            Commands::Show => fares::AppCommand::Show,
            Commands::Quote { fare, category } => fares::AppCommand::Quote { fare, category },
            Commands::Categories => fares::AppCommand::Categories,
            Commands::Export => fares::AppCommand::Export,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display every configured fare table
    Show,
    /// Price a trip for one rider category, including surcharges
    Quote {
        /// Fare id from the configuration
        #[arg(short, long)]
        fare: String,
        /// Rider category, e.g. regular, student, senior
        #[arg(short = 't', long, default_value = "regular")]
        category: String,
    },
    /// List rider categories and their fallbacks
    Categories,
    /// Print all fare tables as JSON
    Export,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fares::cli::setup::setup(),
        Some(cmd) => fares::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
