//! Debounce and last-request-wins for page fetches.
//!
//! There is no way to cancel an in-flight `fetch`, so a late response from a
//! superseded request is simply dropped when it arrives.

use contracts::shared::request_seq::RequestSequencer;
use gloo_timers::future::TimeoutFuture;
use std::future::Future;

/// Wait `delay_ms`, run `fetch` unless a newer request started meanwhile,
/// and return its result only if it is still the latest one.
pub async fn debounced<F, Fut, T>(
    sequencer: &RequestSequencer,
    delay_ms: u32,
    fetch: F,
) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    debounced_with(sequencer, delay_ms, TimeoutFuture::new, fetch).await
}

/// [`debounced`] with the timer supplied by the caller.
pub async fn debounced_with<W, WFut, F, Fut, T>(
    sequencer: &RequestSequencer,
    delay_ms: u32,
    wait: W,
    fetch: F,
) -> Option<T>
where
    W: FnOnce(u32) -> WFut,
    WFut: Future,
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    let ticket = sequencer.begin();
    if delay_ms > 0 {
        wait(delay_ms).await;
        if !sequencer.is_current(ticket) {
            log::debug!("Debounced fetch superseded before start");
            return None;
        }
    }

    let result = fetch().await;
    if sequencer.is_current(ticket) {
        Some(result)
    } else {
        log::debug!("Dropping stale fetch result");
        None
    }
}

/// Immediate fetch with the same stale-result check (page load, refresh).
pub async fn latest_only<F, Fut, T>(sequencer: &RequestSequencer, fetch: F) -> Option<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = T>,
{
    debounced(sequencer, 0, fetch).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future::ready;
    use std::cell::Cell;

    #[test]
    fn test_uncontested_fetch_returns_result() {
        let seq = RequestSequencer::new();
        let result = block_on(debounced_with(&seq, 300, |_| ready(()), || ready(7)));
        assert_eq!(result, Some(7));
    }

    #[test]
    fn test_newer_request_during_wait_skips_fetch() {
        let seq = RequestSequencer::new();
        let fetched = Cell::new(false);
        let wait = |ms: u32| {
            assert_eq!(ms, 300);
            seq.begin();
            ready(())
        };
        let fetch = || {
            fetched.set(true);
            ready(1)
        };
        assert_eq!(block_on(debounced_with(&seq, 300, wait, fetch)), None);
        assert!(!fetched.get());
    }

    #[test]
    fn test_newer_request_during_fetch_drops_result() {
        let seq = RequestSequencer::new();
        let fetch = || {
            seq.begin();
            ready("stale")
        };
        assert_eq!(block_on(debounced_with(&seq, 0, |_| ready(()), fetch)), None);
    }

    #[test]
    fn test_zero_delay_does_not_wait() {
        let seq = RequestSequencer::new();
        let waited = Cell::new(false);
        let wait = |_| {
            waited.set(true);
            ready(())
        };
        assert_eq!(block_on(debounced_with(&seq, 0, wait, || ready(3))), Some(3));
        assert!(!waited.get());
    }

    #[test]
    fn test_latest_only_drops_superseded_result() {
        let seq = RequestSequencer::new();
        let superseded = latest_only(&seq, || async {
            seq.begin();
            "older"
        });
        assert_eq!(block_on(superseded), None);
        assert_eq!(block_on(latest_only(&seq, || ready("newer"))), Some("newer"));
    }
}
