//! Visitor actor - one visitor's traversal through the museum
//!
//! Orchestrates the full tour: arrival, the walk to the steps, the
//! checkpoint chain, the bounded gallery and corridor, and the photo
//! booth, reporting each stage against the shared run clock. Every
//! acquisition is paired with an RAII receipt, so a release can never be
//! forgotten or doubled.

use crate::domain::event::{TourEvent, TourStage};
use crate::domain::types::{TourTimings, VisitorId};
use crate::infra::metrics::SimMetrics;
use crate::io::reporter::Reporter;
use crate::services::museum::Museum;
use std::sync::Arc;
use tokio::time::sleep;
use tracing::debug;

pub struct Visitor {
    id: VisitorId,
    timings: TourTimings,
    museum: Arc<Museum>,
    reporter: Reporter,
    metrics: Arc<SimMetrics>,
}

impl Visitor {
    pub fn new(
        id: VisitorId,
        timings: TourTimings,
        museum: Arc<Museum>,
        reporter: Reporter,
        metrics: Arc<SimMetrics>,
    ) -> Self {
        Self { id, timings, museum, reporter, metrics }
    }

    async fn report(&self, stage: TourStage) {
        let event = TourEvent::new(self.id, stage, self.museum.clock.elapsed_ms());
        self.reporter.report(event).await;
    }

    /// Walk the whole museum once. Consumes the visitor; the task exits
    /// when the tour is done.
    pub async fn tour(self) {
        let tier = self.id.tier();
        debug!(visitor = %self.id, tier = %tier, "tour_started");

        sleep(self.timings.arrival_delay).await;
        self.report(TourStage::Arrived).await;

        sleep(self.timings.walk).await;
        self.report(TourStage::ReachedSteps).await;

        // Checkpoint chain: report and hold at each station. The pass for
        // the last station stays with us until the gallery lets us in, so
        // gallery admission is funneled through one candidate at a time.
        let mut pass = self.museum.checkpoints.enter().await;
        loop {
            self.report(TourStage::AtStep(pass.station() as u8)).await;
            sleep(TourTimings::STATION_HOLD).await;
            if self.museum.checkpoints.is_last(&pass) {
                break;
            }
            pass = self.museum.checkpoints.advance(pass).await;
        }

        let gallery_permit = self.museum.gallery.enter().await;
        drop(pass);
        self.report(TourStage::EnteredGallery).await;

        sleep(self.timings.gallery).await;
        self.report(TourStage::LeavingGallery).await;

        {
            let _corridor_permit = self.museum.corridor.enter().await;
            sleep(TourTimings::CORRIDOR_TRANSIT).await;
        }
        self.report(TourStage::EnteredSecondGallery).await;

        sleep(self.timings.booth_wait_offset).await;
        let ticket = self.museum.booth.register(tier);
        self.report(TourStage::BoothQueued).await;

        let queued_at = self.museum.clock.elapsed_ms();
        let stay = self.museum.booth.admit(ticket).await;
        self.metrics.record_booth_wait(tier, self.museum.clock.elapsed_ms() - queued_at);
        self.report(TourStage::BoothAdmitted).await;

        sleep(self.timings.booth).await;
        drop(stay);

        self.report(TourStage::Departed).await;
        drop(gallery_permit);

        self.metrics.record_completion(tier);
        debug!(visitor = %self.id, tier = %tier, "tour_finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Tier;
    use crate::io::reporter::create_reporter;
    use std::time::Duration;
    use tokio::time::timeout;

    fn quick_timings() -> TourTimings {
        TourTimings {
            arrival_delay: Duration::from_millis(1),
            walk: Duration::from_millis(1),
            gallery: Duration::from_millis(1),
            booth_wait_offset: Duration::from_millis(1),
            booth: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_single_visitor_reports_every_stage_in_order() {
        let museum = Arc::new(Museum::new());
        let metrics = Arc::new(SimMetrics::new());
        let (reporter, stream) = create_reporter(64);

        let visitor = Visitor::new(
            VisitorId::standard(0),
            quick_timings(),
            museum.clone(),
            reporter,
            metrics.clone(),
        );
        timeout(Duration::from_secs(5), visitor.tour()).await.expect("tour deadlocked");

        let events = stream.collect().await;
        let stages: Vec<TourStage> = events.iter().map(|e| e.stage).collect();
        assert_eq!(
            stages,
            vec![
                TourStage::Arrived,
                TourStage::ReachedSteps,
                TourStage::AtStep(1),
                TourStage::AtStep(2),
                TourStage::AtStep(3),
                TourStage::EnteredGallery,
                TourStage::LeavingGallery,
                TourStage::EnteredSecondGallery,
                TourStage::BoothQueued,
                TourStage::BoothAdmitted,
                TourStage::Departed,
            ]
        );
        assert!(events.windows(2).all(|w| w[0].at_ms <= w[1].at_ms));

        assert_eq!(metrics.completed(Tier::Standard), 1);
        assert_eq!(museum.gallery.occupancy(), 0);
        assert_eq!(museum.corridor.occupancy(), 0);
        assert!(!museum.booth.is_occupied());
    }

    #[tokio::test]
    async fn test_premium_visitor_counts_toward_its_tier() {
        let museum = Arc::new(Museum::new());
        let metrics = Arc::new(SimMetrics::new());
        let (reporter, stream) = create_reporter(64);

        let visitor = Visitor::new(
            VisitorId::premium(0),
            quick_timings(),
            museum.clone(),
            reporter,
            metrics.clone(),
        );
        timeout(Duration::from_secs(5), visitor.tour()).await.expect("tour deadlocked");

        let events = stream.collect().await;
        assert!(events.iter().all(|e| e.visitor == VisitorId(2001)));
        assert_eq!(metrics.completed(Tier::Premium), 1);
        assert_eq!(metrics.completed(Tier::Standard), 0);
        assert_eq!(museum.booth.served(Tier::Premium), 1);
        assert_eq!(museum.booth.premium_waiting(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_visitors_all_finish() {
        let museum = Arc::new(Museum::new());
        let metrics = Arc::new(SimMetrics::new());
        let (reporter, stream) = create_reporter(64);
        let collector = tokio::spawn(stream.collect());

        let mut tours = Vec::new();
        for i in 0..6u32 {
            let visitor = Visitor::new(
                VisitorId::standard(i),
                quick_timings(),
                museum.clone(),
                reporter.clone(),
                metrics.clone(),
            );
            tours.push(tokio::spawn(visitor.tour()));
        }
        drop(reporter);
        for t in tours {
            timeout(Duration::from_secs(10), t).await.expect("tour deadlocked").unwrap();
        }

        let events = collector.await.unwrap();
        assert_eq!(metrics.completed(Tier::Standard), 6);
        assert_eq!(events.iter().filter(|e| e.stage == TourStage::Departed).count(), 6);
        assert!(museum.gallery.peak() <= 5);
        assert!(museum.corridor.peak() <= 3);
    }
}
