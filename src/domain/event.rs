//! Tour events - the reportable statuses of a visitor's traversal
//!
//! Every stage renders to the exact status line the simulator prints:
//! `Visitor <id> <statusText> at timestamp <ms>`. Timestamps are elapsed
//! milliseconds from a single shared start instant.

use crate::domain::types::VisitorId;
use std::time::Instant;

/// One reportable stage of the tour, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourStage {
    /// Showed up at point A after the arrival jitter.
    Arrived,
    /// Finished the walk, standing at point B before the steps.
    ReachedSteps,
    /// Holding checkpoint station `k` (1, 2 or 3).
    AtStep(u8),
    /// Admitted through the gallery gate at point C.
    EnteredGallery,
    /// Done in Gallery 1, at point D about to take the corridor.
    LeavingGallery,
    /// Through the corridor, at point E inside Gallery 2.
    EnteredSecondGallery,
    /// Registered with the booth arbiter, waiting for admission.
    BoothQueued,
    /// Sole occupant of the photo booth.
    BoothAdmitted,
    /// Tour complete, about to hand the gallery permit back.
    Departed,
}

impl TourStage {
    /// Checkpoint step number for `AtStep` stages.
    pub fn step_index(&self) -> Option<u8> {
        match self {
            TourStage::AtStep(k) => Some(*k),
            _ => None,
        }
    }
}

impl std::fmt::Display for TourStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TourStage::Arrived => f.write_str("has arrived at A"),
            TourStage::ReachedSteps => f.write_str("has arrived at B"),
            TourStage::AtStep(k) => write!(f, "is at step {}", k),
            TourStage::EnteredGallery => f.write_str("is at C (entered Gallery 1)"),
            TourStage::LeavingGallery => f.write_str("is at D (exiting Gallery 1)"),
            TourStage::EnteredSecondGallery => f.write_str("is at E (entered Gallery 2)"),
            TourStage::BoothQueued => f.write_str("is about to enter the photo booth"),
            TourStage::BoothAdmitted => f.write_str("is inside the photo booth"),
            TourStage::Departed => f.write_str("is exiting Gallery 2"),
        }
    }
}

/// One reported event: who, what, when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourEvent {
    pub visitor: VisitorId,
    pub stage: TourStage,
    pub at_ms: u64,
}

impl TourEvent {
    #[inline]
    pub fn new(visitor: VisitorId, stage: TourStage, at_ms: u64) -> Self {
        Self { visitor, stage, at_ms }
    }
}

impl std::fmt::Display for TourEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Visitor {} {} at timestamp {}",
            self.visitor, self.stage, self.at_ms
        )
    }
}

/// Shared run clock. All visitors stamp their events against the same
/// start instant, so timestamps are comparable across actors.
#[derive(Debug, Clone, Copy)]
pub struct TourClock {
    start: Instant,
}

impl TourClock {
    /// Starts the clock now.
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    /// Milliseconds elapsed since the clock started. Monotonic.
    #[inline]
    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
