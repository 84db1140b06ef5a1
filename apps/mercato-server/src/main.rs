mod config;
mod server;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Mercato Server - marketplace backend
#[derive(Parser)]
#[command(name = "mercato-server")]
#[command(about = "Mercato Server - marketplace backend")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory sqlite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Apply database migrations and exit
    Migrate,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = config::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.mock {
        // Shared-cache keeps one in-memory database across the pool
        config.database.url = "sqlite:file:mercato_mock?mode=memory&cache=shared".to_owned();
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Check => {
            println!("configuration OK");
            Ok(())
        }
        Commands::Migrate => {
            let db = server::connect(&config).await?;
            server::migrate(&db).await?;
            println!("migrations applied");
            Ok(())
        }
        Commands::Run => server::run(config).await,
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
