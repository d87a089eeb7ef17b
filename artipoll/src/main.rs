mod commands;
mod formatting;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "artipoll")]
#[command(about = "Inspect poll state and resolve artifacts across repository endpoints")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "./artipoll.toml")]
    config: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List versions of an artifact across every configured search
    Versions {
        artifact_type: String,
        name: String,
        #[arg(long, action)]
        json: bool,
    },
    /// Resolve one artifact version
    Artifact {
        artifact_type: String,
        name: String,
        version: String,
        #[arg(long, action)]
        json: bool,
    },
    /// Show the last completed poll cycle per search
    LastPoll {
        search: Option<String>,
        #[arg(long, action)]
        json: bool,
    },
    /// Record a completed poll cycle for a search
    RecordPoll {
        search: String,
        /// Unix timestamp in milliseconds (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        Level::ERROR
    } else {
        match cli.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Versions {
            artifact_type,
            name,
            json,
        } => commands::cmd_versions(&cli.config, &artifact_type, &name, json).await?,
        Commands::Artifact {
            artifact_type,
            name,
            version,
            json,
        } => commands::cmd_artifact(&cli.config, &artifact_type, &name, &version, json).await?,
        Commands::LastPoll { search, json } => {
            commands::cmd_last_poll(&cli.config, search.as_deref(), json).await?
        }
        Commands::RecordPoll { search, timestamp } => {
            commands::cmd_record_poll(&cli.config, &search, timestamp).await?
        }
    }

    Ok(())
}
