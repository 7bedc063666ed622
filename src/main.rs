//! BirdAlert - ADS-B aircraft watch
//!
//! Watches a readsb `aircraft.json` feed and sends a notification when an
//! interesting aircraft comes within range of the station.
//!
//! # Usage
//!
//! ```bash
//! # Run the daemon with ./bird_alert.toml
//! bird-alert
//!
//! # One poll cycle against a captured feed, JSON logs
//! bird-alert --config station.toml --feed ./aircraft.json --once --json
//!
//! # Check a config file and exit
//! bird-alert --config station.toml check-config
//!
//! # Send a synthetic alert through every configured channel
//! bird-alert test-notify
//! ```
//!
//! # Environment Variables
//!
//! - `BIRD_ALERT_CONFIG`: Config file path when `--config` is not given
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use bird_alert::config::{AlertConfig, CONFIG_ENV_VAR};
use bird_alert::geometry::CompassOctant;
use bird_alert::notify::{AlertMessage, Dispatcher};
use bird_alert::pipeline::{AlertEngine, PollingLoop, ReadsbFileSource};
use bird_alert::registry::{self, RegistryRefresher};
use bird_alert::types::{AircraftReport, AlertReason, Fix};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "bird-alert")]
#[command(about = "ADS-B aircraft watch with multi-channel notifications")]
#[command(version)]
struct CliArgs {
    /// Path to bird_alert.toml (falls back to $BIRD_ALERT_CONFIG, then ./bird_alert.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Override the readsb aircraft.json path from the config
    #[arg(long, value_name = "PATH")]
    feed: Option<PathBuf>,

    /// Run a single poll cycle and exit
    #[arg(long)]
    once: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Load and validate the configuration, then exit
    CheckConfig,

    /// Send a synthetic alert through the configured channels
    TestNotify,
}

// ============================================================================
// Subcommands
// ============================================================================

fn run_check_config(config: &AlertConfig) -> Result<()> {
    let rules = bird_alert::RuleSet::from_config(config)?;
    println!("Configuration OK");
    println!(
        "  Station:       {} ({:.4}, {:.4})",
        config.station.name, config.station.latitude, config.station.longitude
    );
    println!("  Range:         {:.1} mi", config.alerting.range_miles);
    println!("  Cooldown:      {} s", config.alerting.cooldown_seconds);
    println!(
        "  Rules:         {}",
        rules
            .chain()
            .iter()
            .map(|r| format!("{r:?}"))
            .collect::<Vec<_>>()
            .join(" -> ")
    );
    println!("  Feed:          {}", config.feed.aircraft_json_path.display());
    let channels: Vec<String> = config
        .notifications
        .order
        .iter()
        .map(|kind| {
            if config.notifications.has_credentials(*kind) {
                kind.to_string()
            } else {
                format!("{kind} (unconfigured)")
            }
        })
        .collect();
    println!("  Channels:      {}", channels.join(", "));
    Ok(())
}

async fn run_test_notify(config: &AlertConfig) -> Result<()> {
    let dispatcher = Dispatcher::from_config(&config.notifications)
        .context("Failed to build notification channels")?;

    let report = AircraftReport::new("000000")
        .with_flight("TEST")
        .with_transponder_type("adsb_icao");
    let message = AlertMessage::new(
        &report,
        Fix {
            distance_miles: 0.0,
            bearing: CompassOctant::North,
        },
        AlertReason::WatchlistedIdentifier {
            label: "Bird Alert test notification".to_string(),
        },
    );

    let outcome = dispatcher.dispatch(&message).await;
    for result in &outcome.results {
        match &result.reason {
            None => println!("  {:<10} delivered", result.channel),
            Some(reason) => println!("  {:<10} failed: {}", result.channel, reason),
        }
    }

    match outcome.delivered_by() {
        Some(channel) => {
            println!("Test alert delivered via {channel}");
            Ok(())
        }
        None => Err(anyhow::anyhow!("No notification channel delivered the test alert")),
    }
}

// ============================================================================
// Daemon
// ============================================================================

async fn run_daemon(config: AlertConfig, once: bool) -> Result<()> {
    if !config.station.is_set() {
        anyhow::bail!(
            "Station location is unset; set station.latitude and station.longitude before starting"
        );
    }

    let dispatcher = Dispatcher::from_config(&config.notifications)
        .context("Failed to build notification channels")?;
    info!(channels = ?dispatcher.channel_names(), "Notification channels ready");

    let mut engine = AlertEngine::from_config(&config, dispatcher)?;

    let refresher = if config.registry.enabled {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.notifications.timeout_secs.max(60)))
            .build()
            .context("Failed to build registry HTTP client")?;
        let refresher = RegistryRefresher::new(&config.registry, http)?;
        engine = engine.with_registry(Box::new(registry::load_or_empty(refresher.path())));
        if refresher.downloads_disabled() {
            info!("Aircraft registry downloads disabled, using local copy only");
            None
        } else {
            Some(refresher)
        }
    } else {
        info!("Aircraft registry disabled");
        None
    };

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received Ctrl+C, shutting down...");
        shutdown_token.cancel();
    });

    let mut polling = PollingLoop::new(
        engine,
        Duration::from_secs(config.feed.poll_interval_secs),
        cancel_token,
    );
    if let Some(refresher) = refresher {
        polling = polling.with_refresher(refresher);
    }
    if once {
        polling = polling.with_max_cycles(1);
    }

    let mut source = ReadsbFileSource::new(config.feed.aircraft_json_path.clone());
    let stats = polling.run(&mut source).await;
    if once && stats.feed_errors > 0 {
        warn!("Single cycle could not read the feed");
    }
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if args.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }

    let mut config = AlertConfig::load(args.config.as_deref()).with_context(|| {
        format!(
            "Failed to load configuration (--config, ${CONFIG_ENV_VAR}, ./bird_alert.toml)"
        )
    })?;
    if let Some(feed) = args.feed {
        config.feed.aircraft_json_path = feed;
    }

    match args.command {
        Some(SubCommand::CheckConfig) => return run_check_config(&config),
        Some(SubCommand::TestNotify) => return run_test_notify(&config).await,
        None => {}
    }

    info!(
        station = %config.station.name,
        lat = config.station.latitude,
        lon = config.station.longitude,
        range_mi = config.alerting.range_miles,
        "BirdAlert starting"
    );

    run_daemon(config, args.once).await?;

    info!("BirdAlert shutdown complete");
    Ok(())
}
