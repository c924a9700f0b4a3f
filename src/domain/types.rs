//! Shared types for the museum simulator

use std::time::Duration;

/// First id handed to standard visitors (1001, 1002, ...).
pub const STANDARD_ID_BASE: u32 = 1001;
/// First id handed to premium visitors (2001, 2002, ...).
pub const PREMIUM_ID_BASE: u32 = 2001;

/// Newtype wrapper for visitor IDs to provide type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct VisitorId(pub u32);

impl VisitorId {
    /// Id for the `index`-th standard visitor (0-based).
    #[inline]
    pub fn standard(index: u32) -> Self {
        VisitorId(STANDARD_ID_BASE + index)
    }

    /// Id for the `index`-th premium visitor (0-based).
    #[inline]
    pub fn premium(index: u32) -> Self {
        VisitorId(PREMIUM_ID_BASE + index)
    }

    /// Tier is encoded in the id range: ids at or above the premium base
    /// are premium, everything below is standard.
    #[inline]
    pub fn tier(&self) -> Tier {
        if self.0 >= PREMIUM_ID_BASE {
            Tier::Premium
        } else {
            Tier::Standard
        }
    }
}

impl std::fmt::Display for VisitorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Visitor classification, fixed at creation. Premium visitors preempt
/// standard visitors for photo booth admission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Standard,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &str {
        match self {
            Tier::Standard => "standard",
            Tier::Premium => "premium",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-visitor timing parameters. The four CLI durations (w, x, y, z) are
/// shared by every visitor; the arrival delay is sampled per visitor from
/// the jitter source.
#[derive(Debug, Clone, Copy)]
pub struct TourTimings {
    /// Arrival jitter before the visitor shows up at point A.
    pub arrival_delay: Duration,
    /// Walk from A to B (CLI `w`).
    pub walk: Duration,
    /// Time spent inside Gallery 1 (CLI `x`).
    pub gallery: Duration,
    /// Idle time in Gallery 2 before queueing for the booth (CLI `y`).
    pub booth_wait_offset: Duration,
    /// Time spent inside the photo booth (CLI `z`).
    pub booth: Duration,
}

impl TourTimings {
    /// Pause after reporting each checkpoint step, with the station lock held.
    pub const STATION_HOLD: Duration = Duration::from_millis(1);
    /// Transit time through corridor DE, with a corridor permit held.
    pub const CORRIDOR_TRANSIT: Duration = Duration::from_millis(3);
}
