//! ifchart — per-interface throughput publisher and rolling-window viewer.
//!
//! Run with:  `RUST_LOG=info ifchart serve` and `ifchart watch`

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ifchart", version)]
#[command(about = "Publish interface throughput and watch it as a rolling window", long_about = None)]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/ifchart/ifchart.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "info")]
    log: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Sample local interfaces and publish snapshots", alias = "s")]
    Serve {
        /// Listen address, overrides `server.bind`.
        #[arg(long)]
        bind: Option<String>,
    },
    #[command(about = "Subscribe to a publisher and render the rolling window", alias = "w")]
    Watch {
        /// Publisher address, overrides `link.address`.
        #[arg(long)]
        address: Option<String>,
        /// Print one JSON line per tick instead of text.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Structured logging — RUST_LOG controls verbosity (default: --log).
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log)),
        )
        .init();

    tracing::info!("ifchart v{} starting", env!("CARGO_PKG_VERSION"));

    let path = cli.config.unwrap_or_else(ifchart_config::default_path);
    let mut config = ifchart_config::load(&path)?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(bind) = bind {
                config.server.bind = bind;
            }
            ifchart_console::serve(config).await?;
        }
        Commands::Watch { address, json } => {
            if let Some(address) = address {
                config.link.address = address;
            }
            if json {
                config.display.format = ifchart_config::OutputFormat::Json;
            }
            ifchart_console::watch(config).await?;
        }
    }

    Ok(())
}
