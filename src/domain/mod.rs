//! Domain models - core simulation types
//!
//! This module contains the canonical data types used throughout the system:
//! - `VisitorId` / `Tier` - visitor identity and its priority class
//! - `TourTimings` - the per-visitor delay parameters
//! - `TourStage` / `TourEvent` - reportable traversal statuses
//! - `TourClock` - the shared elapsed-milliseconds run clock

pub mod event;
pub mod types;

// Re-export commonly used types
pub use event::{TourClock, TourEvent, TourStage};
pub use types::{Tier, TourTimings, VisitorId};
