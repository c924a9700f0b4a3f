//! Poisson arrival jitter
//!
//! Visitors do not all show up at once: each gets a small arrival delay
//! drawn from a Poisson distribution (mean λ=2.0 milliseconds). The source
//! is seedable so tests get a reproducible arrival schedule.

use crate::infra::config::ARRIVAL_LAMBDA;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Poisson};
use std::time::Duration;

/// Arrival-delay source shared by the driver at spawn time
pub struct ArrivalJitter {
    rng: Mutex<StdRng>,
    dist: Poisson<f64>,
}

impl ArrivalJitter {
    /// Entropy-seeded source for normal runs.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Deterministic source; the same seed yields the same delay sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        let dist = Poisson::new(ARRIVAL_LAMBDA).expect("arrival lambda is positive and finite");
        Self { rng: Mutex::new(rng), dist }
    }

    /// Sample the next arrival delay, in whole milliseconds.
    pub fn next_delay(&self) -> Duration {
        let ms = self.dist.sample(&mut *self.rng.lock());
        Duration::from_millis(ms as u64)
    }
}

impl Default for ArrivalJitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = ArrivalJitter::with_seed(7);
        let b = ArrivalJitter::with_seed(7);

        let seq_a: Vec<Duration> = (0..20).map(|_| a.next_delay()).collect();
        let seq_b: Vec<Duration> = (0..20).map(|_| b.next_delay()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = ArrivalJitter::with_seed(1);
        let b = ArrivalJitter::with_seed(2);

        let seq_a: Vec<Duration> = (0..20).map(|_| a.next_delay()).collect();
        let seq_b: Vec<Duration> = (0..20).map(|_| b.next_delay()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_mean_tracks_lambda() {
        let jitter = ArrivalJitter::with_seed(42);
        let total_ms: u64 = (0..1000).map(|_| jitter.next_delay().as_millis() as u64).sum();
        let mean = total_ms as f64 / 1000.0;

        // Poisson(2.0) sample mean over 1000 draws sits well inside (1.5, 2.5)
        assert!(mean > 1.5 && mean < 2.5, "mean was {}", mean);
    }
}
