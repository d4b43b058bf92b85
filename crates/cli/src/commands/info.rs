//! `info` command implementation.

use anyhow::{Context, Result};
use tracing::info;

use contracts::SourceConfig;

use crate::cli::InfoArgs;

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    info!(config = %args.config.display(), "Reading configuration");

    let config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if args.json {
        let json = config_loader::ConfigLoader::to_json(&config)
            .context("Failed to serialize configuration")?;
        println!("{}", json);
        return Ok(());
    }

    println!("\n=== Feed Configuration ===\n");
    println!("Feed:");
    println!("  Id: {}", config.feed.id);
    println!("  Name: {}", config.feed.name);
    println!("  Tags: {}", config.feed.tags.join(", "));

    println!("\nSource:");
    match &config.source {
        SourceConfig::Stream(stream) => {
            println!("  Mode: stream ({})", stream.endpoint());
            match &stream.command {
                Some(command) => println!("  Generator: {}", command),
                None => println!("  Generator: (externally managed)"),
            }
        }
        SourceConfig::Poll(poll) => {
            println!("  Mode: poll ({} every {}s)", poll.url, poll.interval_secs);
        }
    }

    println!("\nSinks:");
    if config.sinks.count() == 0 {
        println!("  (none - events will be dropped)");
    }
    if let Some(ref udp) = config.sinks.udp {
        println!("  - udp -> {}", udp.address());
    }
    if config.sinks.feed.is_some() {
        println!("  - feed -> {}", config.feed.id);
    }
    println!();

    Ok(())
}
