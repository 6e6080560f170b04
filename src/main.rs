//! DNI lookup: concurrent public-record scraping behind one endpoint

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dni_lookup::config::{Config, LogFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dni-lookup")]
#[command(about = "Look up a DNI across public-record websites")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "dni-lookup.toml")]
    config: PathBuf,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Listen address, overrides the config file
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Run a single lookup and print the JSON envelope
    Lookup {
        /// DNI to look up (digits only)
        dni: String,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Write a default configuration file
    Init {
        /// Output directory
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Init { path } = &cli.command {
        init_logging(&Config::default(), cli.verbose);
        return commands::init::init_config(path.clone()).await;
    }

    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        Config::default()
    };

    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Serve { listen } => commands::serve::serve(config, listen).await,
        Commands::Lookup { dni, pretty } => commands::lookup::run_lookup(config, dni, pretty).await,
        Commands::Init { .. } => Ok(()),
    }
}

fn init_logging(config: &Config, verbose: u8) {
    let level = config.logging.level.raised(verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dni_lookup={level},tower_http={level},warn")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match config.logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
