//! Infrastructure - configuration, statistics, and randomness
//!
//! This module contains infrastructure concerns:
//! - `config` - Run parameters and topology constants
//! - `metrics` - Lock-free run statistics and the end-of-run summary
//! - `jitter` - Poisson arrival-delay source (seedable for tests)

pub mod config;
pub mod jitter;
pub mod metrics;

// Re-export commonly used types
pub use config::SimConfig;
pub use jitter::ArrivalJitter;
pub use metrics::{SimMetrics, TourSummary};
