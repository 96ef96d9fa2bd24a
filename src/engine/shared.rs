// ============================================================================
// Shared Matchmaker
// Single-lock wrapper for concurrent request handlers
// ============================================================================

use crate::domain::{MatchOutcome, MatchRequest, ParticipantId};
use crate::engine::Matchmaker;
use parking_lot::Mutex;

/// A [`Matchmaker`] behind one mutex held for the whole of each operation.
///
/// Interleaving two submissions would let both miss each other, so the lock
/// covers the full search and both container updates.
pub struct SharedMatchmaker {
    inner: Mutex<Matchmaker>,
}

impl SharedMatchmaker {
    pub fn new(matchmaker: Matchmaker) -> Self {
        Self {
            inner: Mutex::new(matchmaker),
        }
    }

    pub fn submit(&self, request: MatchRequest) -> MatchOutcome {
        self.inner.lock().submit(request)
    }

    pub fn cancel(&self, id: ParticipantId) -> bool {
        self.inner.lock().cancel(id)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn is_waiting(&self, id: ParticipantId) -> bool {
        self.inner.lock().is_waiting(id)
    }

    /// Run `f` against the matchmaker while holding the lock
    pub fn with<R>(&self, f: impl FnOnce(&Matchmaker) -> R) -> R {
        f(&self.inner.lock())
    }

    pub fn into_inner(self) -> Matchmaker {
        self.inner.into_inner()
    }
}

impl From<Matchmaker> for SharedMatchmaker {
    fn from(matchmaker: Matchmaker) -> Self {
        Self::new(matchmaker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interfaces::NoOpEventHandler;
    use std::sync::Arc;
    use std::thread;

    fn shared() -> Arc<SharedMatchmaker> {
        Arc::new(SharedMatchmaker::new(Matchmaker::new(
            "shared".to_string(),
            Arc::new(NoOpEventHandler),
        )))
    }

    #[test]
    fn test_shared_basic() {
        let mm = shared();
        assert!(mm.is_empty());

        mm.submit(MatchRequest::new(1u64, 100, 10));
        assert!(mm.is_waiting(ParticipantId::new(1)));

        let outcome = mm.submit(MatchRequest::new(2u64, 105, 10));
        assert_eq!(outcome.peer, Some(ParticipantId::new(1)));
        assert_eq!(mm.len(), 0);
    }

    #[test]
    fn test_concurrent_submissions_pair_everyone() {
        let mm = shared();
        let threads = 8;
        let per_thread = 250u64;

        let handles: Vec<_> = (0..threads)
            .map(|t| {
                let mm = Arc::clone(&mm);
                thread::spawn(move || {
                    let mut paired = 0usize;
                    for i in 0..per_thread {
                        let raw = t * per_thread + i;
                        // Everyone is mutually compatible at this limit
                        if mm.submit(MatchRequest::new(raw, 1_000, 10)).is_matched() {
                            paired += 1;
                        }
                    }
                    paired
                })
            })
            .collect();

        let pairs: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        let total = (threads * per_thread) as usize;

        // Every pairing consumes two participants; an even total leaves no one behind
        assert_eq!(pairs * 2, total);
        assert!(mm.is_empty());
        assert!(mm.with(|inner| inner.verify_consistency()).is_ok());
    }

    #[test]
    fn test_concurrent_cancel() {
        let mm = shared();
        for raw in 0..100u64 {
            mm.submit(MatchRequest::new(raw, raw * 1_000, 0));
        }

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let mm = Arc::clone(&mm);
                thread::spawn(move || {
                    (0..100u64)
                        .filter(|&raw| mm.cancel(ParticipantId::new(raw)))
                        .count()
                })
            })
            .collect();

        let cancelled: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(cancelled, 100);
        assert!(mm.is_empty());
    }

    #[test]
    fn test_into_inner() {
        let mm = SharedMatchmaker::from(Matchmaker::new(
            "owned".to_string(),
            Arc::new(NoOpEventHandler),
        ));
        mm.submit(MatchRequest::new(5u64, 10, 0));
        let inner = mm.into_inner();
        assert_eq!(inner.pool(), "owned");
        assert_eq!(inner.len(), 1);
    }
}
