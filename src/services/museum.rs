//! Museum layout - the shared resources every visitor competes for
//!
//! One instance per run, shared via `Arc` and injected into every visitor
//! task: the checkpoint chain, the two capacity gates, the photo booth
//! arbiter and the run clock. All synchronization state lives here; there
//! are no globals.

use crate::domain::event::TourClock;
use crate::infra::config::{CORRIDOR_CAPACITY, GALLERY_CAPACITY};
use crate::services::capacity_gate::CapacityGate;
use crate::services::checkpoints::CheckpointChain;
use crate::services::photo_booth::PhotoBooth;

pub struct Museum {
    pub checkpoints: CheckpointChain,
    pub gallery: CapacityGate,
    pub corridor: CapacityGate,
    pub booth: PhotoBooth,
    pub clock: TourClock,
}

impl Museum {
    /// Fixed topology: three stations, gallery of 5, corridor of 3, one
    /// booth. The clock starts now.
    pub fn new() -> Self {
        Self {
            checkpoints: CheckpointChain::new(),
            gallery: CapacityGate::new("gallery1", GALLERY_CAPACITY),
            corridor: CapacityGate::new("corridor_de", CORRIDOR_CAPACITY),
            booth: PhotoBooth::new(),
            clock: TourClock::start(),
        }
    }
}

impl Default for Museum {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_topology() {
        let museum = Museum::new();
        assert_eq!(museum.checkpoints.station_count(), 3);
        assert_eq!(museum.gallery.capacity(), 5);
        assert_eq!(museum.corridor.capacity(), 3);
        assert!(!museum.booth.is_occupied());
    }
}
