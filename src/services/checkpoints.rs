//! Checkpoint chain - three sequential stations with chained hand-off
//!
//! Every visitor crosses stations 1, 2, 3 in order. Advancing locks the
//! next station *before* the held one is released, so there is never a gap
//! another visitor could slip into: traversal is strictly non-overtaking.
//! All visitors acquire in station order, which keeps the chain free of
//! lock cycles.
//!
//! The pass for the last station is deliberately retained while the visitor
//! waits for a gallery permit, funneling gallery admission through a single
//! candidate at a time. The bounded gallery therefore backpressures the
//! whole chain.

use crate::infra::config::STATION_COUNT;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

pub struct CheckpointChain {
    stations: Vec<Arc<Mutex<()>>>,
}

impl CheckpointChain {
    pub fn new() -> Self {
        Self { stations: (0..STATION_COUNT).map(|_| Arc::new(Mutex::new(()))).collect() }
    }

    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Wait for station 1 and occupy it.
    pub async fn enter(&self) -> StationPass {
        let guard = self.stations[0].clone().lock_owned().await;
        debug!(station = 1, "station_acquired");
        StationPass { _guard: guard, station: 1 }
    }

    /// Move one station forward. The next station is locked first and the
    /// held one released only afterwards (the hand-off), so the pair is
    /// held together for the duration of the exchange. Must not be called
    /// with the final station's pass.
    pub async fn advance(&self, pass: StationPass) -> StationPass {
        let next_station = pass.station + 1;
        let next = self.stations[next_station - 1].clone().lock_owned().await;
        drop(pass);
        debug!(station = %next_station, "station_acquired");
        StationPass { _guard: next, station: next_station }
    }

    /// Whether this pass is for the final station before the gallery.
    pub fn is_last(&self, pass: &StationPass) -> bool {
        pass.station == self.stations.len()
    }
}

impl Default for CheckpointChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Occupancy receipt for one station. Dropping it releases the station;
/// the visitor drops the final pass only after the gallery has admitted it.
pub struct StationPass {
    _guard: OwnedMutexGuard<()>,
    station: usize,
}

impl StationPass {
    /// 1-based station number, used for the "is at step k" report.
    pub fn station(&self) -> usize {
        self.station
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex as SyncMutex;
    use std::time::Duration;
    use tokio::time::timeout;

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[tokio::test]
    async fn test_single_visitor_walks_stations_in_order() {
        let chain = CheckpointChain::new();

        let pass = chain.enter().await;
        assert_eq!(pass.station(), 1);
        assert!(!chain.is_last(&pass));

        let pass = chain.advance(pass).await;
        assert_eq!(pass.station(), 2);

        let pass = chain.advance(pass).await;
        assert_eq!(pass.station(), 3);
        assert!(chain.is_last(&pass));
    }

    #[tokio::test]
    async fn test_station_is_exclusive() {
        let chain = Arc::new(CheckpointChain::new());
        let held = chain.enter().await;

        let contender = {
            let chain = chain.clone();
            tokio::spawn(async move {
                let _pass = chain.enter().await;
            })
        };

        tokio::time::sleep(millis(20)).await;
        assert!(!contender.is_finished());

        drop(held);
        timeout(millis(500), contender).await.expect("station 1 never freed").unwrap();
    }

    #[tokio::test]
    async fn test_handoff_blocks_follower_at_held_station() {
        let chain = Arc::new(CheckpointChain::new());

        // leader advances to station 2 and parks there
        let leader = chain.enter().await;
        let leader = chain.advance(leader).await;
        assert_eq!(leader.station(), 2);

        // follower takes the freed station 1, then gets stuck advancing
        let follower = chain.enter().await;
        let blocked = {
            let chain = chain.clone();
            tokio::spawn(async move {
                let pass = chain.advance(follower).await;
                pass.station()
            })
        };

        tokio::time::sleep(millis(20)).await;
        assert!(!blocked.is_finished());

        // leader moves on to station 3, freeing station 2 for the follower
        let _leader = chain.advance(leader).await;
        let station = timeout(millis(500), blocked).await.expect("handoff stuck").unwrap();
        assert_eq!(station, 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_overtaking() {
        let chain = Arc::new(CheckpointChain::new());
        let entered: Arc<SyncMutex<Vec<u32>>> = Arc::new(SyncMutex::new(Vec::new()));
        let finished: Arc<SyncMutex<Vec<u32>>> = Arc::new(SyncMutex::new(Vec::new()));

        let mut tasks = Vec::new();
        for visitor in 0..4u32 {
            let chain = chain.clone();
            let entered = entered.clone();
            let finished = finished.clone();
            tasks.push(tokio::spawn(async move {
                let mut pass = chain.enter().await;
                entered.lock().push(visitor);
                while !chain.is_last(&pass) {
                    tokio::time::sleep(millis(5)).await;
                    pass = chain.advance(pass).await;
                }
                finished.lock().push(visitor);
            }));
        }
        for t in tasks {
            timeout(millis(5000), t).await.expect("chain deadlocked").unwrap();
        }

        // whoever took station 1 first reaches station 3 first
        assert_eq!(*entered.lock(), *finished.lock());
        assert_eq!(finished.lock().len(), 4);
    }
}
