//! Photo booth arbiter - single occupancy with strict premium priority
//!
//! At most one visitor occupies the booth at a time. Premium visitors
//! preempt: while any premium registration is pending, standard admission
//! is frozen, even when the booth is empty. A booth exit wakes exactly one
//! premium waiter if any is pending, otherwise it wakes every standard
//! waiter; the woken standards re-check the admission rule and exactly one
//! of them claims the booth. Standards therefore cannot starve once the
//! premium queue drains.
//!
//! Classic monitor discipline: state behind a short-lived guard, waits on
//! notify channels with the guard released, predicate re-checked under the
//! guard after every wake. The notified future is registered *before* each
//! predicate check, so a wake landing between check and sleep is never
//! lost, and spurious wakes are harmless.

use crate::domain::types::Tier;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Notify;
use tracing::debug;

#[derive(Debug, Default)]
struct BoothState {
    occupied: bool,
    premium_waiting: u32,
    /// Total registrations, observability only.
    arrivals: u64,
}

pub struct PhotoBooth {
    state: Mutex<BoothState>,
    /// Woken one at a time; a stored permit covers the unregistered window.
    premium_turn: Notify,
    /// Woken as a broadcast so every standard re-checks the admission rule.
    standard_turn: Notify,
    premium_served: AtomicU64,
    standard_served: AtomicU64,
}

impl PhotoBooth {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BoothState::default()),
            premium_turn: Notify::new(),
            standard_turn: Notify::new(),
            premium_served: AtomicU64::new(0),
            standard_served: AtomicU64::new(0),
        }
    }

    /// Announce intent to enter. A premium registration freezes standard
    /// admission before the guard is released, so no standard contender can
    /// race past it. The ticket must be redeemed with [`PhotoBooth::admit`].
    pub fn register(&self, tier: Tier) -> BoothTicket {
        let mut state = self.state.lock();
        state.arrivals += 1;
        if tier == Tier::Premium {
            state.premium_waiting += 1;
        }
        debug!(
            tier = %tier,
            premium_waiting = %state.premium_waiting,
            arrivals = %state.arrivals,
            "booth_registered"
        );
        BoothTicket { tier }
    }

    /// Wait until the admission rule lets this ticket's tier in, then
    /// occupy the booth. Dropping the returned stay vacates it.
    pub async fn admit(&self, ticket: BoothTicket) -> BoothStay<'_> {
        match ticket.tier {
            Tier::Premium => self.admit_premium().await,
            Tier::Standard => self.admit_standard().await,
        }

        match ticket.tier {
            Tier::Premium => self.premium_served.fetch_add(1, Ordering::Relaxed),
            Tier::Standard => self.standard_served.fetch_add(1, Ordering::Relaxed),
        };
        debug!(tier = %ticket.tier, "booth_admitted");
        BoothStay { booth: self, tier: ticket.tier }
    }

    /// A premium visitor needs the booth empty; its pending registration
    /// already blocks standard contenders.
    async fn admit_premium(&self) {
        let notified = self.premium_turn.notified();
        tokio::pin!(notified);
        loop {
            notified.as_mut().enable();
            {
                let mut state = self.state.lock();
                if !state.occupied {
                    state.occupied = true;
                    debug_assert!(state.premium_waiting > 0);
                    state.premium_waiting -= 1;
                    return;
                }
            }
            notified.as_mut().await;
            notified.set(self.premium_turn.notified());
        }
    }

    /// A standard visitor needs the booth empty *and* no premium wait
    /// pending. The occupancy re-check keeps two standards woken by the
    /// same broadcast from both claiming the booth.
    async fn admit_standard(&self) {
        let notified = self.standard_turn.notified();
        tokio::pin!(notified);
        loop {
            notified.as_mut().enable();
            {
                let mut state = self.state.lock();
                if !state.occupied && state.premium_waiting == 0 {
                    state.occupied = true;
                    return;
                }
            }
            notified.as_mut().await;
            notified.set(self.standard_turn.notified());
        }
    }

    fn vacate(&self, tier: Tier) {
        let premium_pending = {
            let mut state = self.state.lock();
            state.occupied = false;
            state.premium_waiting > 0
        };
        debug!(tier = %tier, premium_pending = %premium_pending, "booth_vacated");

        if premium_pending {
            self.premium_turn.notify_one();
        } else {
            self.standard_turn.notify_waiters();
        }
    }

    /// Whether the booth currently has an occupant.
    pub fn is_occupied(&self) -> bool {
        self.state.lock().occupied
    }

    /// Premium registrations still waiting for admission.
    pub fn premium_waiting(&self) -> u32 {
        self.state.lock().premium_waiting
    }

    /// Total registrations seen.
    pub fn arrivals(&self) -> u64 {
        self.state.lock().arrivals
    }

    /// Visitors of one tier admitted so far.
    pub fn served(&self, tier: Tier) -> u64 {
        match tier {
            Tier::Premium => self.premium_served.load(Ordering::Relaxed),
            Tier::Standard => self.standard_served.load(Ordering::Relaxed),
        }
    }
}

impl Default for PhotoBooth {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration receipt; redeeming it is the only way to be admitted, so
/// an admission can never be missing its registration.
pub struct BoothTicket {
    tier: Tier,
}

/// RAII occupancy of the booth. Dropping it runs the exit wake policy.
pub struct BoothStay<'a> {
    booth: &'a PhotoBooth,
    tier: Tier,
}

impl Drop for BoothStay<'_> {
    fn drop(&mut self) {
        self.booth.vacate(self.tier);
    }
}
