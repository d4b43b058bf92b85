//! `run` command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use contracts::{FeedConfig, SourceConfig};
use feed_worker::FeedWorker;

use crate::cli::RunArgs;
use crate::feed_ingest::LogFeedIngest;

/// Execute the `run` command
pub async fn run_feed(args: &RunArgs) -> Result<()> {
    info!(config = %args.config.display(), "Loading configuration");

    // Validate config path
    if !args.config.exists() {
        anyhow::bail!("Configuration file not found: {}", args.config.display());
    }

    // Load and parse configuration
    let mut config = config_loader::ConfigLoader::load_from_path(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    apply_overrides(&mut config, args);

    info!(
        feed_id = %config.feed.id,
        source = config.source.mode(),
        sinks = config.sinks.count(),
        "Configuration loaded"
    );

    // Dry run - just validate and exit
    if args.dry_run {
        info!("Dry run mode - configuration is valid, exiting");
        print_config_summary(&config);
        return Ok(());
    }

    // Optional Prometheus endpoint
    if args.metrics_port != 0 {
        observability::init_metrics_only(args.metrics_port)?;
    }

    // Standalone runs deliver feed-sink events to the log placeholder; a
    // hosting system would inject its own FeedIngest here.
    let mut worker = FeedWorker::new(config, Arc::new(LogFeedIngest))
        .with_channel_capacity(args.buffer_size);

    worker.start().await.context("Failed to start feed worker")?;
    info!("Feed worker started");

    // Run until a shutdown signal arrives or the worker stops on its own
    tokio::select! {
        _ = setup_shutdown_signal() => {
            warn!("Received shutdown signal, stopping feed worker...");
        }
        _ = worker.finished() => {
            warn!("Feed worker stopped on its own");
        }
    }

    let result = worker.stop().await;
    info!("ADS-B Feeder finished");
    result.map_err(|e| anyhow::anyhow!(e)).context("Feed worker failed")
}

/// Apply CLI overrides to the loaded configuration
fn apply_overrides(config: &mut FeedConfig, args: &RunArgs) {
    if args.host.is_none() && args.port.is_none() {
        return;
    }
    match &mut config.source {
        SourceConfig::Stream(stream) => {
            if let Some(ref host) = args.host {
                info!(host = %host, "Overriding stream host from CLI");
                stream.host = host.clone();
            }
            if let Some(port) = args.port {
                info!(port = %port, "Overriding stream port from CLI");
                stream.port = port;
            }
        }
        SourceConfig::Poll(_) => {
            warn!("--host/--port overrides apply to stream mode only, ignoring");
        }
    }
}

/// Setup Ctrl+C and SIGTERM signal handlers
async fn setup_shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Print configuration summary for dry-run mode
fn print_config_summary(config: &FeedConfig) {
    println!("\n=== Configuration Summary ===\n");
    println!("Feed:");
    println!("  Id: {}", config.feed.id);
    println!("  Name: {}", config.feed.name);
    println!("  Tags: {:?}", config.feed.tags);

    println!("\nSource:");
    match &config.source {
        SourceConfig::Stream(stream) => {
            println!("  Mode: stream");
            println!("  Endpoint: {}", stream.endpoint());
            if let Some(ref command) = stream.command {
                println!("  Generator: {}", command);
            }
        }
        SourceConfig::Poll(poll) => {
            println!("  Mode: poll");
            println!("  Url: {}", poll.url);
            println!("  Interval: {}s", poll.interval_secs);
        }
    }

    println!("\nSinks ({}):", config.sinks.count());
    if let Some(ref udp) = config.sinks.udp {
        println!("  - udp -> {}", udp.address());
    }
    if config.sinks.feed.is_some() {
        println!("  - feed -> {}", config.feed.id);
    }

    println!();
}
