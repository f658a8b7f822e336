use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use af_cli::commands::{classify, feed, merge, util, weekly};
use af_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    // The clock is read once; every command works from this instant
    let clock = Utc::now();
    let now = match cli.now.as_deref() {
        Some(s) => util::parse_datetime(s, clock).context("invalid --now value")?,
        None => clock,
    };

    let load_config = || -> Result<Config> {
        let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
        tracing::debug!(?config, "loaded configuration");
        Ok(config)
    };

    match &cli.command {
        Some(Commands::Feed { json }) => {
            let config = load_config()?;
            feed::run(&config, now, *json)?;
        }
        Some(Commands::Weekly { json, fill_gaps }) => {
            let config = load_config()?;
            weekly::run(&config, now, *json, *fill_gaps)?;
        }
        Some(Commands::Classify { kind }) => {
            // Classify doesn't need config
            classify::run(kind)?;
        }
        Some(Commands::Merge {
            incoming,
            retention_days,
        }) => {
            let config = load_config()?;
            merge::run(&config, incoming, *retention_days, now)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
