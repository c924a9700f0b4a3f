//! Museum visitor-flow simulator
//!
//! N standard and M premium visitors tour a fixed museum topology
//! concurrently: three sequential checkpoint stations, a bounded gallery,
//! a bounded corridor and a single photo booth with strict premium
//! priority. Event lines go to stdout; diagnostics go to stderr.
//!
//! Module structure:
//! - `domain/` - Visitor identity, timings, tour events
//! - `io/` - The event reporter
//! - `services/` - Checkpoint chain, capacity gates, photo booth, visitors
//! - `infra/` - Config, metrics, arrival jitter

use clap::error::ErrorKind;
use clap::Parser;
use museum_sim::infra::config::SimConfig;
use museum_sim::services::driver;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: museum-sim <N> <M> <w> <x> <y> <z>";

/// Museum visitor-flow simulator
#[derive(Parser, Debug)]
#[command(
    name = "museum-sim",
    version = concat!(env!("CARGO_PKG_VERSION"), "+", env!("GIT_HASH")),
    about
)]
struct Args {
    /// Standard visitor count N
    standard: u32,
    /// Premium visitor count M
    premium: u32,
    /// Walk delay w (milliseconds)
    walk_ms: u64,
    /// Gallery activity delay x (milliseconds)
    gallery_ms: u64,
    /// Booth wait offset y (milliseconds)
    booth_wait_ms: u64,
    /// Booth duration z (milliseconds)
    booth_ms: u64,
}

/// Terminal usage path: message plus usage line on stderr, exit code 1,
/// before any task is spawned.
fn usage_exit(reason: &str) -> ! {
    eprintln!("{}", reason);
    eprintln!("{}", USAGE);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for full event visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        // stdout carries the event stream, diagnostics stay on stderr
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return Ok(());
        }
        Err(_) => usage_exit("museum-sim: expected six integer arguments"),
    };

    let config = match SimConfig::new(
        args.standard,
        args.premium,
        args.walk_ms,
        args.gallery_ms,
        args.booth_wait_ms,
        args.booth_ms,
    ) {
        Ok(config) => config,
        Err(e) => usage_exit(&format!("museum-sim: {}", e)),
    };

    info!(
        version = %env!("GIT_HASH"),
        standard = %config.standard_count(),
        premium = %config.premium_count(),
        walk_ms = %config.walk_ms(),
        gallery_ms = %config.gallery_ms(),
        booth_wait_ms = %config.booth_wait_ms(),
        booth_ms = %config.booth_ms(),
        "museum-sim starting"
    );

    let summary = driver::run(&config).await?;

    info!(completed = %summary.completed_total(), "museum-sim shutdown complete");
    Ok(())
}
