//! Driver - spawns the visitor population and tears the run down
//!
//! Builds the shared museum and reporter once, samples one arrival delay
//! per visitor in spawn order (all standard ids first, then premium, so a
//! seeded run fixes the whole arrival schedule), spawns one task per
//! visitor, joins them all, then drains the reporter and assembles the run
//! summary.

use crate::domain::event::TourEvent;
use crate::domain::types::VisitorId;
use crate::infra::config::SimConfig;
use crate::infra::jitter::ArrivalJitter;
use crate::infra::metrics::{SimMetrics, TourSummary};
use crate::io::reporter::{create_reporter, Reporter};
use crate::services::museum::Museum;
use crate::services::visitor::Visitor;
use anyhow::Context;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::info;

/// Events buffered between visitor tasks and the drain before senders wait
const REPORT_BUFFER: usize = 256;

/// Run the simulation, streaming one event line per report to stdout.
/// Returns after every visitor finished and the stream is fully drained.
pub async fn run(config: &SimConfig) -> anyhow::Result<TourSummary> {
    let (reporter, stream) = create_reporter(REPORT_BUFFER);
    let drain = tokio::spawn(stream.write_to(std::io::stdout()));

    let (museum, metrics) = run_visitors(config, reporter).await?;

    let lines = drain
        .await
        .context("reporter drain panicked")?
        .context("writing event lines to stdout")?;

    Ok(finish(&museum, &metrics, lines))
}

/// Everything a finished run produced. The museum handle exposes the final
/// resource state (gate occupancy, booth emptiness) for assertions.
pub struct RunOutput {
    pub events: Vec<TourEvent>,
    pub summary: TourSummary,
    pub museum: Arc<Museum>,
}

/// Run the simulation, collecting events instead of printing them. Entry
/// point for scenario tests.
pub async fn run_collecting(config: &SimConfig) -> anyhow::Result<RunOutput> {
    let (reporter, stream) = create_reporter(REPORT_BUFFER);
    let drain = tokio::spawn(stream.collect());

    let (museum, metrics) = run_visitors(config, reporter).await?;

    let events = drain.await.context("reporter drain panicked")?;
    let summary = finish(&museum, &metrics, events.len() as u64);
    Ok(RunOutput { events, summary, museum })
}

async fn run_visitors(
    config: &SimConfig,
    reporter: Reporter,
) -> anyhow::Result<(Arc<Museum>, Arc<SimMetrics>)> {
    let museum = Arc::new(Museum::new());
    let metrics = Arc::new(SimMetrics::new());
    let jitter = match config.jitter_seed() {
        Some(seed) => ArrivalJitter::with_seed(seed),
        None => ArrivalJitter::new(),
    };

    info!(
        standard = %config.standard_count(),
        premium = %config.premium_count(),
        "visitors_spawning"
    );

    let ids = (0..config.standard_count())
        .map(VisitorId::standard)
        .chain((0..config.premium_count()).map(VisitorId::premium));

    let mut tours = JoinSet::new();
    for id in ids {
        let timings = config.timings(jitter.next_delay());
        let visitor =
            Visitor::new(id, timings, museum.clone(), reporter.clone(), metrics.clone());
        tours.spawn(visitor.tour());
    }
    // The drain stops once the last visitor's reporter clone is dropped.
    drop(reporter);

    while let Some(finished) = tours.join_next().await {
        finished.context("visitor task panicked")?;
    }
    info!("visitors_joined");

    Ok((museum, metrics))
}

fn finish(museum: &Museum, metrics: &SimMetrics, events_reported: u64) -> TourSummary {
    let summary = metrics.report(
        events_reported,
        museum.gallery.peak(),
        museum.corridor.peak(),
        museum.clock.elapsed_ms(),
    );
    summary.log();
    summary
}
