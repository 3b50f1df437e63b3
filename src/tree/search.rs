use std::time::{Duration, Instant};

/// Decouples the applied search term from raw per-keystroke input.
///
/// At most one term is pending; a newer submission supersedes it and restarts
/// the delay. This is pure bookkeeping over caller-supplied instants — the
/// event loop's tick drives [`SearchDebouncer::poll`].
#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    pending: Option<(String, Instant)>,
}

impl SearchDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Queue `term`, replacing any pending one and restarting the delay.
    pub fn submit(&mut self, term: String, now: Instant) {
        self.pending = Some((term, now + self.delay));
    }

    /// Take the pending term once its delay has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        if self.pending.as_ref().is_some_and(|(_, due)| now >= *due) {
            self.pending.take().map(|(term, _)| term)
        } else {
            None
        }
    }

    /// Drop the pending term without applying it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
