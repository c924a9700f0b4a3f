//! Services - the synchronization engine and visitor orchestration
//!
//! This module contains the core simulation services:
//! - `checkpoints` - Three sequential stations with chained lock hand-off
//! - `capacity_gate` - Bounded concurrent admission (gallery, corridor)
//! - `photo_booth` - Single-occupancy admission with premium priority
//! - `museum` - The injected shared-resource aggregate
//! - `visitor` - Per-visitor traversal orchestration
//! - `driver` - Spawns the population, joins it, reports the summary

pub mod capacity_gate;
pub mod checkpoints;
pub mod driver;
pub mod museum;
pub mod photo_booth;
pub mod visitor;

// Re-export commonly used types
pub use capacity_gate::{CapacityGate, GatePermit};
pub use checkpoints::{CheckpointChain, StationPass};
pub use museum::Museum;
pub use photo_booth::{BoothStay, BoothTicket, PhotoBooth};
pub use visitor::Visitor;
