//! Kiosk CLI for the subway arrivals board.
//!
//! `watch` is what runs on the Pi: it polls the feeds on the configured
//! interval and prints the board. `once` and `check` are setup helpers for
//! verifying the pipeline and the feed endpoints before mounting the screen.

use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use subway_board::board::Arrival;
use subway_board::config::BoardConfig;
use subway_board::decode::MIN_FEED_BYTES;
use subway_board::fetch::auth::ApiKey;
use subway_board::fetch::{self, BasicClient, HttpClient};
use subway_board::pipeline::{BoardCache, refresh_board};
use subway_board::stations::StationRouteMap;

#[derive(Parser)]
#[command(name = "subway-board")]
#[command(about = "Real-time MTA arrivals board for a Raspberry Pi kiosk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the feeds at the configured interval and print the board
    Watch,
    /// Run a single refresh and print the result
    Once {
        /// Print arrivals as JSON instead of board text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Probe one feed endpoint and report whether it serves real data
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/subway_board.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("subway_board.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = BoardConfig::from_env();

    match config.api_key.clone() {
        Some(key) => {
            info!("using configured MTA API key");
            dispatch(ApiKey::new(BasicClient::new(), key), &config, cli.command).await
        }
        None => {
            info!("no MTA API key configured, using free public feeds");
            dispatch(BasicClient::new(), &config, cli.command).await
        }
    }
}

async fn dispatch<C: HttpClient>(client: C, config: &BoardConfig, command: Commands) -> Result<()> {
    let map = StationRouteMap::nyct();
    match command {
        Commands::Watch => watch(&client, config, &map).await,
        Commands::Once { json } => once(&client, config, &map, json).await,
        Commands::Check => check(&client, config).await,
    }
}

/// Refresh loop. The cache holds the previous board between refreshes, so a
/// failed cycle leaves the last good data on screen until the next attempt.
async fn watch<C: HttpClient>(
    client: &C,
    config: &BoardConfig,
    map: &StationRouteMap,
) -> Result<()> {
    info!(
        station = %config.station_name,
        interval_secs = config.refresh_interval.as_secs(),
        "starting arrivals board"
    );

    let mut cache = BoardCache::default();
    loop {
        if cache.is_due(config.refresh_interval) {
            let arrivals = refresh_board(client, config, map).await;
            cache.store(arrivals);
            print_board(&config.station_name, cache.arrivals());
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
}

async fn once<C: HttpClient>(
    client: &C,
    config: &BoardConfig,
    map: &StationRouteMap,
    json: bool,
) -> Result<()> {
    let arrivals = refresh_board(client, config, map).await;
    if json {
        println!("{}", serde_json::to_string_pretty(&arrivals)?);
    } else {
        print_board(&config.station_name, &arrivals);
    }
    Ok(())
}

/// Connectivity probe: fetches the first configured feed and reports whether
/// the payload looks like real feed data or an error page.
async fn check<C: HttpClient>(client: &C, config: &BoardConfig) -> Result<()> {
    let sources = config.feed_sources();
    let source = &sources[0];
    info!(group = source.group, url = %source.url, "probing feed");

    match fetch::fetch_bytes(client, &source.url).await {
        Ok(bytes) => {
            let plausible = bytes.len() >= MIN_FEED_BYTES;
            info!(bytes = bytes.len(), plausible, "feed reachable");
            if plausible {
                info!("feed is serving real-time data");
            } else {
                warn!("payload too small, likely an error page");
            }
        }
        Err(e) => {
            error!(error = %e, "feed unreachable");
        }
    }
    Ok(())
}

fn print_board(station_name: &str, arrivals: &[Arrival]) {
    let now = Utc::now();
    println!();
    println!("{station_name}  {}", Local::now().format("%I:%M:%S %p"));
    if arrivals.is_empty() {
        println!("  no data");
        return;
    }
    for arrival in arrivals {
        println!(
            "  ({:>2}) {:<28} {:<10} {:>4}  {}",
            arrival.route_id,
            arrival.destination,
            arrival.detail.as_deref().unwrap_or(""),
            arrival.countdown(now),
            arrival.status
        );
    }
}
