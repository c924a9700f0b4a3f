//! IO modules - output interfaces
//!
//! This module contains the simulator's only external output:
//! - `reporter` - Typed channel serializing visitor status lines to one stream

pub mod reporter;

// Re-export commonly used types
pub use reporter::{create_reporter, ReportStream, Reporter};
