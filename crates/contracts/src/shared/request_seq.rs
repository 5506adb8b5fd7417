use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Generation counter that lets the latest request win.
///
/// Every fetch takes a ticket before it starts; when its response arrives it
/// is applied only if no newer ticket was issued in the meantime.
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Invalidate all outstanding tickets (page closed, filters reset).
    pub fn cancel_all(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let seq = RequestSequencer::new();
        let first = seq.begin();
        assert!(seq.is_current(first));
        let second = seq.begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_clones_share_generation() {
        let seq = RequestSequencer::new();
        let other = seq.clone();
        let ticket = seq.begin();
        other.begin();
        assert!(!seq.is_current(ticket));
    }

    #[test]
    fn test_cancel_all() {
        let seq = RequestSequencer::new();
        let ticket = seq.begin();
        seq.cancel_all();
        assert!(!seq.is_current(ticket));
    }
}
