//! Event reporter - serializes status lines from concurrent actors
//!
//! Visitors send typed events into a bounded mpsc channel; a single drain
//! task renders and writes them. One consumer means one writer, so lines
//! never interleave regardless of how many actors report at once.

use crate::domain::event::TourEvent;
use std::io::Write;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Producer handle for tour events
///
/// Clone this to share across visitor tasks. Sends apply backpressure when
/// the channel is full; events are never dropped.
#[derive(Clone)]
pub struct Reporter {
    tx: mpsc::Sender<TourEvent>,
}

impl Reporter {
    /// Create a new reporter from an mpsc sender
    pub fn new(tx: mpsc::Sender<TourEvent>) -> Self {
        Self { tx }
    }

    /// Queue one event for output. The drain outlives every visitor in a
    /// normal run, so a closed channel only happens during early teardown.
    pub async fn report(&self, event: TourEvent) {
        if self.tx.send(event).await.is_err() {
            debug!(visitor = %event.visitor, "report_after_drain_closed");
        }
    }
}

/// Consumer side of the reporter channel
pub struct ReportStream {
    rx: mpsc::Receiver<TourEvent>,
}

impl ReportStream {
    /// Drain events into `sink`, one rendered line per event, until every
    /// producer handle has been dropped. Returns the number of lines written.
    /// Each line is flushed so the stream is observable while the run is
    /// still in flight.
    pub async fn write_to<W: Write>(mut self, mut sink: W) -> std::io::Result<u64> {
        info!("reporter_drain_started");

        let mut lines = 0u64;
        while let Some(event) = self.rx.recv().await {
            writeln!(sink, "{}", event)?;
            sink.flush()?;
            lines += 1;
        }

        info!(lines = %lines, "reporter_drain_stopped");
        Ok(lines)
    }

    /// Collect events in arrival order instead of rendering them. Used by
    /// tests and scenario assertions.
    pub async fn collect(mut self) -> Vec<TourEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.rx.recv().await {
            events.push(event);
        }
        events
    }
}

/// Create a reporter channel pair
///
/// Returns (producer, drain) where the producer can be cloned and shared.
/// Buffer size determines how many events can be queued before senders wait.
pub fn create_reporter(buffer_size: usize) -> (Reporter, ReportStream) {
    let (tx, rx) = mpsc::channel(buffer_size);
    (Reporter::new(tx), ReportStream { rx })
}
