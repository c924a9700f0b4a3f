//! Capacity gate - bounded concurrent admission to a region
//!
//! A counting gate: at most `capacity` visitors are admitted at once.
//! `enter` waits for a free slot and returns an RAII permit; dropping the
//! permit frees the slot and wakes at most one waiter. The gate tracks its
//! current occupancy and the high-water mark so capacity invariants can be
//! checked from outside.

use crate::infra::metrics::update_atomic_max;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::debug;

pub struct CapacityGate {
    name: &'static str,
    sem: Semaphore,
    capacity: usize,
    /// Permits currently handed out. Statistical only; the semaphore is
    /// what actually bounds admission.
    occupancy: AtomicU64,
    peak: AtomicU64,
}

impl CapacityGate {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            sem: Semaphore::new(capacity),
            capacity,
            occupancy: AtomicU64::new(0),
            peak: AtomicU64::new(0),
        }
    }

    /// Wait for a free slot, then enter. The returned permit must be held
    /// for as long as the visitor occupies the region.
    pub async fn enter(&self) -> GatePermit<'_> {
        let permit = self.sem.acquire().await.expect("gate semaphore is never closed");

        let now = self.occupancy.fetch_add(1, Ordering::Relaxed) + 1;
        update_atomic_max(&self.peak, now);
        debug!(gate = %self.name, occupancy = %now, "gate_admitted");

        GatePermit { gate: self, _permit: permit }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of admitted visitors.
    pub fn occupancy(&self) -> u64 {
        self.occupancy.load(Ordering::Relaxed)
    }

    /// Highest concurrent occupancy seen so far.
    pub fn peak(&self) -> u64 {
        self.peak.load(Ordering::Relaxed)
    }
}

/// RAII admission receipt. Dropping it releases the slot.
pub struct GatePermit<'a> {
    gate: &'a CapacityGate,
    _permit: SemaphorePermit<'a>,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        // Runs before the inner semaphore permit is returned, so the gauge
        // never overshoots capacity while a waiter is being admitted.
        let now = self.gate.occupancy.fetch_sub(1, Ordering::Relaxed) - 1;
        debug!(gate = %self.gate.name, occupancy = %now, "gate_released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[tokio::test]
    async fn test_permit_accounting() {
        let gate = CapacityGate::new("g", 2);
        assert_eq!(gate.occupancy(), 0);

        let first = gate.enter().await;
        assert_eq!(gate.occupancy(), 1);

        let second = gate.enter().await;
        assert_eq!(gate.occupancy(), 2);
        assert_eq!(gate.peak(), 2);

        drop(first);
        assert_eq!(gate.occupancy(), 1);
        drop(second);
        assert_eq!(gate.occupancy(), 0);
        // peak is a high-water mark, it never goes back down
        assert_eq!(gate.peak(), 2);
    }

    #[tokio::test]
    async fn test_release_admits_waiter() {
        let gate = Arc::new(CapacityGate::new("g", 1));
        let held = gate.enter().await;

        let contender = {
            let gate = gate.clone();
            tokio::spawn(async move {
                let _permit = gate.enter().await;
            })
        };

        // the contender cannot get in while the slot is held
        tokio::time::sleep(millis(20)).await;
        assert!(!contender.is_finished());

        drop(held);
        timeout(millis(500), contender).await.expect("waiter not admitted").unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_occupancy_never_exceeds_capacity() {
        let gate = Arc::new(CapacityGate::new("g", 3));

        let mut tasks = Vec::new();
        for _ in 0..10 {
            let gate = gate.clone();
            tasks.push(tokio::spawn(async move {
                let _permit = gate.enter().await;
                assert!(gate.occupancy() <= 3);
                tokio::time::sleep(millis(20)).await;
                assert!(gate.occupancy() <= 3);
            }));
        }
        for t in tasks {
            timeout(millis(2000), t).await.expect("gate deadlocked").unwrap();
        }

        assert_eq!(gate.occupancy(), 0);
        assert_eq!(gate.peak(), 3);
    }
}
