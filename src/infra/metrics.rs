//! Lock-free run statistics
//!
//! Visitors record into atomics on their hot path; the driver assembles a
//! one-shot summary at teardown. No mutex contention between actors.
//!
//! NOTE: All atomics use Relaxed ordering intentionally—these are statistical
//! counters only. Do NOT use these atomics for coordination or logic decisions.

use crate::domain::types::Tier;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Exponential bucket boundaries for booth wait times (milliseconds)
/// Buckets: ≤1, ≤2, ≤4, ≤8, ≤16, ≤32, ≤64, ≤128, ≤256, ≤512, >512
const BUCKET_BOUNDS: [u64; 10] = [1, 2, 4, 8, 16, 32, 64, 128, 256, 512];
const NUM_BUCKETS: usize = 11;

/// Compute bucket index for a wait value using binary search
#[inline]
fn bucket_index(wait_ms: u64) -> usize {
    BUCKET_BOUNDS.partition_point(|&bound| bound < wait_ms)
}

/// Update an atomic max value using compare-and-swap loop
#[inline]
pub(crate) fn update_atomic_max(atomic_max: &AtomicU64, new_value: u64) {
    let mut current_max = atomic_max.load(Ordering::Relaxed);
    while new_value > current_max {
        match atomic_max.compare_exchange_weak(
            current_max,
            new_value,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => break,
            Err(actual) => current_max = actual,
        }
    }
}

/// Load all bucket values
#[inline]
fn load_buckets(buckets: &[AtomicU64; NUM_BUCKETS]) -> [u64; NUM_BUCKETS] {
    let mut result = [0u64; NUM_BUCKETS];
    for (i, bucket) in buckets.iter().enumerate() {
        result[i] = bucket.load(Ordering::Relaxed);
    }
    result
}

/// Per-tier booth wait accumulator
struct WaitStats {
    buckets: [AtomicU64; NUM_BUCKETS],
    sum_ms: AtomicU64,
    max_ms: AtomicU64,
}

impl WaitStats {
    fn new() -> Self {
        Self {
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
            sum_ms: AtomicU64::new(0),
            max_ms: AtomicU64::new(0),
        }
    }

    #[inline]
    fn record(&self, wait_ms: u64) {
        self.buckets[bucket_index(wait_ms)].fetch_add(1, Ordering::Relaxed);
        self.sum_ms.fetch_add(wait_ms, Ordering::Relaxed);
        update_atomic_max(&self.max_ms, wait_ms);
    }

    fn snapshot(&self) -> WaitSummary {
        let buckets = load_buckets(&self.buckets);
        let count: u64 = buckets.iter().sum();
        let sum = self.sum_ms.load(Ordering::Relaxed);
        WaitSummary {
            count,
            avg_ms: if count > 0 { sum / count } else { 0 },
            max_ms: self.max_ms.load(Ordering::Relaxed),
            buckets,
        }
    }
}

/// Lock-free statistics collector shared by all visitor tasks
pub struct SimMetrics {
    /// Standard visitors that finished the full tour (monotonic)
    standard_completed: AtomicU64,
    /// Premium visitors that finished the full tour (monotonic)
    premium_completed: AtomicU64,
    /// Booth wait time from registration to admission, standard tier
    standard_wait: WaitStats,
    /// Booth wait time from registration to admission, premium tier
    premium_wait: WaitStats,
}

impl SimMetrics {
    pub fn new() -> Self {
        Self {
            standard_completed: AtomicU64::new(0),
            premium_completed: AtomicU64::new(0),
            standard_wait: WaitStats::new(),
            premium_wait: WaitStats::new(),
        }
    }

    /// Record a finished tour (lock-free)
    #[inline]
    pub fn record_completion(&self, tier: Tier) {
        match tier {
            Tier::Standard => self.standard_completed.fetch_add(1, Ordering::Relaxed),
            Tier::Premium => self.premium_completed.fetch_add(1, Ordering::Relaxed),
        };
    }

    /// Record how long a visitor waited between booth registration and
    /// admission (lock-free)
    #[inline]
    pub fn record_booth_wait(&self, tier: Tier, wait_ms: u64) {
        match tier {
            Tier::Standard => self.standard_wait.record(wait_ms),
            Tier::Premium => self.premium_wait.record(wait_ms),
        }
    }

    /// Get completed count for one tier
    #[inline]
    pub fn completed(&self, tier: Tier) -> u64 {
        match tier {
            Tier::Standard => self.standard_completed.load(Ordering::Relaxed),
            Tier::Premium => self.premium_completed.load(Ordering::Relaxed),
        }
    }

    /// Assemble the end-of-run summary. Gate peaks and the event count are
    /// owned elsewhere and passed in by the driver.
    pub fn report(
        &self,
        events_reported: u64,
        gallery_peak: u64,
        corridor_peak: u64,
        elapsed_ms: u64,
    ) -> TourSummary {
        TourSummary {
            standard_completed: self.standard_completed.load(Ordering::Relaxed),
            premium_completed: self.premium_completed.load(Ordering::Relaxed),
            events_reported,
            gallery_peak,
            corridor_peak,
            standard_wait: self.standard_wait.snapshot(),
            premium_wait: self.premium_wait.snapshot(),
            elapsed_ms,
        }
    }
}

impl Default for SimMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Booth wait statistics for one tier
#[derive(Debug, Clone, Copy)]
pub struct WaitSummary {
    pub count: u64,
    pub avg_ms: u64,
    pub max_ms: u64,
    /// Bounds: ≤1, ≤2, ≤4, ≤8, ≤16, ≤32, ≤64, ≤128, ≤256, ≤512, >512 ms
    pub buckets: [u64; NUM_BUCKETS],
}

/// End-of-run snapshot logged at teardown and returned to callers
#[derive(Debug, Clone, Copy)]
pub struct TourSummary {
    pub standard_completed: u64,
    pub premium_completed: u64,
    pub events_reported: u64,
    /// High-water mark of concurrent Gallery 1 occupants
    pub gallery_peak: u64,
    /// High-water mark of concurrent corridor occupants
    pub corridor_peak: u64,
    pub standard_wait: WaitSummary,
    pub premium_wait: WaitSummary,
    pub elapsed_ms: u64,
}

impl TourSummary {
    pub fn completed_total(&self) -> u64 {
        self.standard_completed + self.premium_completed
    }

    pub fn log(&self) {
        info!(
            standard_completed = %self.standard_completed,
            premium_completed = %self.premium_completed,
            events = %self.events_reported,
            gallery_peak = %self.gallery_peak,
            corridor_peak = %self.corridor_peak,
            standard_wait_avg_ms = %self.standard_wait.avg_ms,
            standard_wait_max_ms = %self.standard_wait.max_ms,
            premium_wait_avg_ms = %self.premium_wait.avg_ms,
            premium_wait_max_ms = %self.premium_wait.max_ms,
            elapsed_ms = %self.elapsed_ms,
            "run_summary"
        );
    }
}
