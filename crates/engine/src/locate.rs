//! Locate-me request lifecycle.
//!
//! Position acquisition happens outside the engine: the caller asks its
//! geolocation provider for a single reading and feeds the outcome back.
//! Between those two moments the user may cancel (or start a fresh
//! request), so every request gets a ticket and only the latest live
//! ticket may complete. A late result for a stale ticket is ignored; no
//! timers or subscriptions are held open either way.

use std::sync::Arc;

use fermata_transit::models::Stop;

/// Why a position reading never arrived. Mirrors the failure modes of
/// device geolocation providers; surfaced verbatim, never retried here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("position access denied")]
    PermissionDenied,

    #[error("position unavailable")]
    Unavailable,

    #[error("position request timed out")]
    Timeout,
}

/// Handle for one in-flight locate request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocateTicket(u64);

/// Tracks which locate request, if any, is allowed to complete.
#[derive(Debug, Default)]
pub struct LocateSession {
    generation: u64,
    active: bool,
}

impl LocateSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request, implicitly superseding any earlier one.
    pub fn begin(&mut self) -> LocateTicket {
        self.generation += 1;
        self.active = true;
        LocateTicket(self.generation)
    }

    /// Abandon the in-flight request, if any.
    pub fn cancel(&mut self) {
        self.active = false;
    }

    /// Consume a ticket. Returns `false` for cancelled or superseded
    /// tickets, whose results the caller must discard.
    pub fn finish(&mut self, ticket: LocateTicket) -> bool {
        if self.active && ticket.0 == self.generation {
            self.active = false;
            true
        } else {
            false
        }
    }
}

/// Outcome of completing a locate request.
#[derive(Clone, Debug)]
pub enum LocateOutcome {
    /// The request was cancelled or superseded before the reading arrived.
    Ignored,
    /// The catalog is empty; there is no nearest stop.
    NoStops,
    /// The nearest stop to the reported position.
    Nearest(Arc<Stop>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_live_ticket() {
        let mut session = LocateSession::new();
        let ticket = session.begin();

        assert!(session.finish(ticket));
        // A ticket completes at most once.
        assert!(!session.finish(ticket));
    }

    #[test]
    fn test_cancelled_ticket_is_stale() {
        let mut session = LocateSession::new();
        let ticket = session.begin();
        session.cancel();

        assert!(!session.finish(ticket));
    }

    #[test]
    fn test_new_request_supersedes_old() {
        let mut session = LocateSession::new();
        let first = session.begin();
        let second = session.begin();

        assert!(!session.finish(first));
        assert!(session.finish(second));
    }
}
