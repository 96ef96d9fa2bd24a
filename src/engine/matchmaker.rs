// ============================================================================
// Matchmaker
// Admit-or-pair and withdraw over one waiting pool
// ============================================================================

use crate::domain::{
    MatchOutcome, MatchRequest, MatchmakerConfig, Participant, ParticipantId, RatingOrder,
};
use crate::engine::ConsistencyError;
use crate::index::{KeyComparator, Probe, SkipList};
use crate::interfaces::{EventHandler, MatchEvent};
use chrono::Utc;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Waiting pool with rating-ordered matching.
///
/// The map and the index each own a copy of every waiting participant. The
/// matchmaker is the only writer of both and restores their agreement
/// before every public method returns. It does no locking of its own; wrap
/// it in [`SharedMatchmaker`](crate::engine::SharedMatchmaker) to share it.
pub struct Matchmaker {
    /// Pool name (e.g. "ranked-eu")
    pool: Arc<String>,

    /// Identity lookup for waiting participants
    waiting: HashMap<ParticipantId, Box<Participant>>,

    /// Rating-ordered snapshots of the same participants
    index: SkipList<Participant, RatingOrder>,

    /// Event handler for processing events
    event_handler: Arc<dyn EventHandler>,
}

enum Resolution {
    Paired {
        peer: ParticipantId,
        rating_gap: u64,
        rounds: usize,
    },
    Waiting {
        rounds: usize,
        exhausted: bool,
    },
}

impl Matchmaker {
    /// Create a matchmaker with default index parameters
    pub fn new(pool: String, event_handler: Arc<dyn EventHandler>) -> Self {
        Self::with_config(&MatchmakerConfig::new(pool), event_handler)
    }

    /// Create a matchmaker from an already validated configuration
    pub fn with_config(config: &MatchmakerConfig, event_handler: Arc<dyn EventHandler>) -> Self {
        let capacity = config.initial_capacity.unwrap_or(0);
        let index = SkipList::new(RatingOrder)
            .with_rng(config.level_seed.rng())
            .with_max_height(config.max_height)
            .with_branching(config.branching)
            .with_max_rounds(config.max_rounds)
            .with_capacity(capacity);

        Self {
            pool: Arc::new(config.pool.clone()),
            waiting: HashMap::with_capacity(capacity),
            index,
            event_handler,
        }
    }

    /// Pair the requester with a compatible waiting peer, or admit it.
    ///
    /// A known id resubmitted with a different rating is re-indexed at the
    /// new rating first. Its stored attributes and exclusions are kept; the
    /// ones on the request only apply to ids not already waiting.
    pub fn submit(&mut self, request: MatchRequest) -> MatchOutcome {
        let MatchRequest {
            id,
            rating,
            attributes,
            exclusions,
            limit,
        } = request;
        let mut events = Vec::with_capacity(2);

        // The requester is held outside the map until its fate is decided.
        let (record, fresh) = match self.waiting.remove(&id) {
            Some(mut existing) => {
                let previous_rating = existing.rating();
                if previous_rating != rating {
                    if self.index.remove(&existing).is_none() {
                        self.invariant_breach(ConsistencyError::MissingFromIndex(id));
                    }
                    existing.set_rating(rating);
                    events.push(MatchEvent::Refreshed {
                        participant: id,
                        previous_rating,
                        rating,
                        timestamp: Utc::now(),
                    });
                }
                (existing, false)
            },
            None => (
                Box::new(Participant::new(id, rating, attributes, exclusions)),
                true,
            ),
        };

        let resolution = match self.index.match_or_insert(&record, limit) {
            Probe::Matched { peer, rounds } => Resolution::Paired {
                peer: peer.id(),
                rating_gap: record.rating_gap(peer),
                rounds,
            },
            Probe::Admitted { rounds, exhausted } => Resolution::Waiting { rounds, exhausted },
        };

        let outcome = match resolution {
            Resolution::Waiting { rounds, exhausted } => {
                tracing::debug!(
                    pool = %self.pool,
                    participant = %id,
                    rating,
                    rounds,
                    exhausted,
                    fresh,
                    "participant waiting"
                );
                self.waiting.insert(id, record);
                events.push(MatchEvent::Admitted {
                    participant: id,
                    rating,
                    rounds,
                    exhausted,
                    timestamp: Utc::now(),
                });
                MatchOutcome::waiting(id)
            },
            Resolution::Paired {
                peer,
                rating_gap,
                rounds,
            } => {
                // A fresh requester was never indexed; a returning one was.
                self.index.remove(&record);
                match self.waiting.remove(&peer) {
                    Some(peer_record) => {
                        self.index.remove(&peer_record);
                    },
                    None => self.invariant_breach(ConsistencyError::MissingFromMap(peer)),
                }
                tracing::debug!(
                    pool = %self.pool,
                    participant = %id,
                    peer = %peer,
                    rating_gap,
                    rounds,
                    "participants paired"
                );
                events.push(MatchEvent::Matched {
                    participant: id,
                    peer,
                    rating_gap,
                    rounds,
                    timestamp: Utc::now(),
                });
                MatchOutcome::paired(id, peer)
            },
        };

        self.event_handler.on_events(events);
        outcome
    }

    /// Withdraw a waiting participant. Returns `false` for unknown ids.
    pub fn cancel(&mut self, id: ParticipantId) -> bool {
        let Some(record) = self.waiting.remove(&id) else {
            tracing::trace!(pool = %self.pool, participant = %id, "cancel for unknown participant");
            return false;
        };
        if self.index.remove(&record).is_none() {
            self.invariant_breach(ConsistencyError::MissingFromIndex(id));
        }

        tracing::debug!(pool = %self.pool, participant = %id, "participant cancelled");
        self.event_handler.on_event(MatchEvent::Cancelled {
            participant: id,
            timestamp: Utc::now(),
        });
        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Number of waiting participants
    #[inline]
    pub fn len(&self) -> usize {
        self.waiting.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waiting.is_empty()
    }

    pub fn is_waiting(&self, id: ParticipantId) -> bool {
        self.waiting.contains_key(&id)
    }

    /// Stored record of a waiting participant
    pub fn waiting(&self, id: ParticipantId) -> Option<&Participant> {
        self.waiting.get(&id).map(Box::as_ref)
    }

    /// Waiting participants in index order (rating, then id)
    pub fn participants(&self) -> impl Iterator<Item = &Participant> + '_ {
        self.index.iter()
    }

    /// Get the pool name
    pub fn pool(&self) -> &str {
        &self.pool
    }

    /// Check that the map and the index describe the same waiting pool.
    pub fn verify_consistency(&self) -> Result<(), ConsistencyError> {
        let mut seen = HashSet::with_capacity(self.waiting.len());
        let mut previous: Option<&Participant> = None;

        for snapshot in self.index.iter() {
            let id = snapshot.id();
            if !seen.insert(id) {
                return Err(ConsistencyError::DuplicateInIndex(id));
            }
            match self.waiting.get(&id) {
                None => return Err(ConsistencyError::MissingFromMap(id)),
                Some(record) if record.rating() != snapshot.rating() => {
                    return Err(ConsistencyError::StaleSnapshot {
                        participant: id,
                        map_rating: record.rating(),
                        index_rating: snapshot.rating(),
                    });
                },
                Some(_) => {},
            }
            if let Some(before) = previous {
                if RatingOrder.compare(before, snapshot) != Ordering::Less {
                    return Err(ConsistencyError::OutOfOrder {
                        before: before.id(),
                        after: id,
                    });
                }
            }
            previous = Some(snapshot);
        }

        match self.waiting.keys().find(|id| !seen.contains(*id)) {
            Some(id) => Err(ConsistencyError::MissingFromIndex(*id)),
            None => Ok(()),
        }
    }

    // ========================================================================
    // Private methods
    // ========================================================================

    fn invariant_breach(&self, error: ConsistencyError) {
        tracing::error!(pool = %self.pool, %error, "matchmaker invariant violated");
        debug_assert!(false, "matchmaker invariant violated: {}", error);
    }
}
