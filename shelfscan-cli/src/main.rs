//! Shelfscan CLI - Command-line interface for the book acquisition pipeline

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Resolve the metadata service URL: flag, then environment, then default
fn resolve_server(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("SHELFSCAN_API_URL").ok())
        .unwrap_or_else(|| "http://localhost:3000".to_string())
}

#[derive(Parser)]
#[command(name = "shelfscan")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an ISBN and print its canonical and display forms
    Validate {
        /// Raw ISBN (hyphens and whitespace allowed)
        input: String,
    },

    /// Look up book metadata for an ISBN
    Lookup {
        /// Raw ISBN (hyphens and whitespace allowed)
        isbn: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Metadata service URL (default: $SHELFSCAN_API_URL)
        #[arg(long)]
        server: Option<String>,
    },

    /// Read scan events from stdin and run the acquisition pipeline
    Scan {
        /// Metadata service URL (default: $SHELFSCAN_API_URL)
        #[arg(long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "shelfscan_core=debug,shelfscan_cli=debug"
    } else {
        "shelfscan_core=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Validate { input } => commands::validate(&input),
        Commands::Lookup { isbn, json, server } => {
            commands::lookup(&isbn, &resolve_server(server), json).await
        }
        Commands::Scan { server } => commands::scan(&resolve_server(server)).await,
    }
}
