//! Request sequencing.
//!
//! Loads are not cancelled when superseded. Instead each load takes a
//! [`Ticket`] and its result is only accepted if no newer load has started
//! since, so a slow stale response can never overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Proof of the order in which a load started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Generation counter handing out [`Ticket`]s.
#[derive(Debug, Default)]
pub struct LoadSequencer {
    latest: AtomicU64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load, superseding every earlier ticket.
    pub fn begin(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` belongs to the newest load.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Pass `result` through if `ticket` is still current, else drop it.
    pub fn accept<T>(&self, ticket: Ticket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            tracing::debug!(generation = ticket.0, "discarding stale load");
            None
        }
    }
}
