// ============================================================================
// Matchmaking Engine Library
// Rating-based pairing over a deterministic skip list
// ============================================================================

//! # Matchmaking Engine
//!
//! A real-time matchmaking engine: it holds a pool of waiting participants
//! and, for every request, either pairs the requester with a compatible,
//! rating-close participant or admits it to wait.
//!
//! ## Features
//!
//! - **Arena skip list** ordered by rating, with deterministic level heights
//! - **Bounded outward search**: nearest lower then upper neighbour, widened
//!   step by step under a hard round cap
//! - **Symmetric exclusions**: neither side may carry what the other refuses
//! - **Event stream** for logging, metrics and host notification
//! - **Host adapter** decoding loosely typed identities and scores
//!
//! ## Example
//!
//! ```rust
//! use matchmaking_engine::prelude::*;
//! use std::sync::Arc;
//!
//! let mut matchmaker = Matchmaker::new("ranked".to_string(), Arc::new(NoOpEventHandler));
//!
//! let first = matchmaker.submit(MatchRequest::new(1u64, 1000, 50));
//! assert!(!first.is_matched());
//!
//! let second = matchmaker.submit(MatchRequest::new(2u64, 1010, 50));
//! assert_eq!(second.peer, Some(ParticipantId::new(1)));
//! assert!(matchmaker.is_empty());
//! ```

pub mod adapter;
pub mod domain;
pub mod engine;
pub mod index;
pub mod interfaces;

// Re-exports for convenience
pub mod prelude {
    pub use crate::adapter::{AdapterError, HostAdapter, MatchReply, WireScalar};
    pub use crate::domain::{
        LevelSeed, MatchOutcome, MatchRequest, MatchmakerConfig, Participant, ParticipantId,
        RatingOrder,
    };
    pub use crate::engine::{
        create_from_config, ConsistencyError, Matchmaker, MatchmakerBuilder, SharedMatchmaker,
    };
    pub use crate::index::{LevelRng, Matchable, ParkMiller, Probe, SkipList};
    pub use crate::interfaces::{
        EventHandler, LoggingEventHandler, MatchEvent, NoOpEventHandler, QueueEventHandler,
    };
}

#[cfg(test)]
mod integration_tests {
    use super::prelude::*;
    use std::sync::Arc;

    fn id(raw: u64) -> ParticipantId {
        ParticipantId::new(raw)
    }

    #[test]
    fn test_end_to_end_matchmaking() {
        let events = Arc::new(QueueEventHandler::new());
        let mut mm = MatchmakerBuilder::new("ranked-eu")
            .deterministic(2024)
            .build(events.clone())
            .unwrap();

        // Out of range: both wait
        assert_eq!(
            mm.submit(MatchRequest::new(1u64, 1000, 10).with_exclusions(["smurf"])),
            MatchOutcome::waiting(id(1))
        );
        assert_eq!(mm.submit(MatchRequest::new(2u64, 1050, 10)), MatchOutcome::waiting(id(2)));

        // Blocked by exclusion although 1 is in range
        let blocked = mm.submit(
            MatchRequest::new(3u64, 1005, 10)
                .with_attributes(["smurf"])
                .with_exclusions(["toxic"]),
        );
        assert!(!blocked.is_matched());

        // Compatible with 3, nearest lower neighbour
        let paired = mm.submit(MatchRequest::new(4u64, 1008, 10).with_attributes(["eu"]));
        assert_eq!(paired, MatchOutcome::paired(id(4), id(3)));

        // 1 withdraws; 2 remains
        assert!(mm.cancel(id(1)));
        assert!(!mm.cancel(id(1)));
        assert_eq!(mm.len(), 1);
        assert!(mm.is_waiting(id(2)));
        assert!(mm.verify_consistency().is_ok());

        let matched = events
            .drain()
            .into_iter()
            .filter(|e| matches!(e, MatchEvent::Matched { .. }))
            .count();
        assert_eq!(matched, 1);
    }

    #[test]
    fn test_exclusion_blocks_otherwise_valid_match() {
        let mut mm = Matchmaker::new("pool".to_string(), Arc::new(NoOpEventHandler));
        mm.submit(MatchRequest::new(1u64, 500, 100).with_attributes(["smurf"]));
        let outcome = mm.submit(MatchRequest::new(2u64, 505, 100).with_exclusions(["smurf"]));

        assert_eq!(outcome, MatchOutcome::waiting(id(2)));
        assert!(mm.is_waiting(id(1)));
        assert!(mm.is_waiting(id(2)));
    }

    #[test]
    fn test_host_adapter_over_builder() {
        let shared = MatchmakerBuilder::new("host")
            .build_shared(Arc::new(LoggingEventHandler))
            .unwrap();
        let host = HostAdapter::new(shared);

        let waiting = host
            .match_request(&"10".into(), &"1500".into(), &"25".into(), vec![], vec![])
            .unwrap();
        assert!(waiting.is_none());

        let reply = host
            .match_request(&11u64.into(), &1520u64.into(), &25u64.into(), vec![], vec![])
            .unwrap();
        assert_eq!(
            reply,
            Some(MatchReply {
                self_id: "11".to_string(),
                peer: "10".to_string(),
            })
        );
    }

    #[test]
    fn test_deterministic_pools_behave_identically() {
        let run = || {
            let mut mm = MatchmakerBuilder::new("replay")
                .deterministic(77)
                .max_rounds(3)
                .build(Arc::new(NoOpEventHandler))
                .unwrap();
            let mut rng = ParkMiller::new(5);
            let mut outcomes = Vec::new();
            for raw in 0..500u64 {
                let rating = u64::from(rng.next_u32() % 2_000);
                let mut request = MatchRequest::new(raw, rating, 15);
                if rng.next_u32() % 3 == 0 {
                    request = request.with_exclusions(["smurf"]);
                } else if rng.next_u32() % 3 == 0 {
                    request = request.with_attributes(["smurf"]);
                }
                outcomes.push(mm.submit(request));
            }
            (outcomes, mm.len())
        };

        assert_eq!(run(), run());
    }
}
