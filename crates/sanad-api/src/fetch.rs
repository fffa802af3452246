//! Fetch sequencing guard
//!
//! Focus-triggered refetches can race: a slow earlier request resolving
//! after a later one must not overwrite the fresher result. Each fetch takes
//! a ticket from the screen's guard and only the latest ticket's completion
//! may be applied.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic ticket issuer, one per screen.
#[derive(Debug, Default)]
pub struct FetchGuard {
    latest: AtomicU64,
}

/// A ticket identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

impl FetchGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a new fetch, superseding all earlier tickets.
    pub fn issue(&self) -> FetchTicket {
        FetchTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether this ticket is still the latest issued.
    ///
    /// Called when the fetch completes; a `false` result means a newer fetch
    /// was started in the meantime and this one's data must be discarded.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}
