// ============================================================================
// Event Handler Interface
// Defines the contract for handling matchmaking events
// ============================================================================

use crate::domain::ParticipantId;
use chrono::{DateTime, Utc};
use crossbeam::queue::SegQueue;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the matchmaker
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MatchEvent {
    /// Requester found no compatible peer and now waits in the pool
    Admitted {
        participant: ParticipantId,
        rating: u64,
        /// Outward search rounds spent
        rounds: usize,
        /// True when the round cap, not the pool, ended the search
        exhausted: bool,
        timestamp: DateTime<Utc>,
    },

    /// Requester was paired with a waiting peer; both left the pool
    Matched {
        participant: ParticipantId,
        peer: ParticipantId,
        rating_gap: u64,
        rounds: usize,
        timestamp: DateTime<Utc>,
    },

    /// A waiting participant resubmitted with a different rating
    Refreshed {
        participant: ParticipantId,
        previous_rating: u64,
        rating: u64,
        timestamp: DateTime<Utc>,
    },

    /// A waiting participant withdrew
    Cancelled {
        participant: ParticipantId,
        timestamp: DateTime<Utc>,
    },
}

impl MatchEvent {
    /// Participant the event is about
    pub fn participant(&self) -> ParticipantId {
        match self {
            MatchEvent::Admitted { participant, .. }
            | MatchEvent::Matched { participant, .. }
            | MatchEvent::Refreshed { participant, .. }
            | MatchEvent::Cancelled { participant, .. } => *participant,
        }
    }
}

/// Event handler trait for processing matchmaker events
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle a matchmaker event
    fn on_event(&self, event: MatchEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<MatchEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: MatchEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: MatchEvent) {
        tracing::debug!("Matchmaker event: {:?}", event);
    }
}

/// Buffers events in a lock-free queue until the host drains them
#[derive(Default)]
pub struct QueueEventHandler {
    queue: SegQueue<MatchEvent>,
}

impl QueueEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every buffered event in arrival order
    pub fn drain(&self) -> Vec<MatchEvent> {
        let mut events = Vec::with_capacity(self.queue.len());
        while let Some(event) = self.queue.pop() {
            events.push(event);
        }
        events
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EventHandler for QueueEventHandler {
    fn on_event(&self, event: MatchEvent) {
        self.queue.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cancelled(id: u64) -> MatchEvent {
        MatchEvent::Cancelled {
            participant: ParticipantId::new(id),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_noop_handler() {
        let handler = NoOpEventHandler;
        handler.on_event(cancelled(1));
        // Should not panic
    }

    #[test]
    fn test_queue_handler_preserves_order() {
        let handler = QueueEventHandler::new();
        handler.on_events(vec![cancelled(1), cancelled(2), cancelled(3)]);
        assert_eq!(handler.len(), 3);

        let ids: Vec<u64> = handler
            .drain()
            .iter()
            .map(|e| e.participant().get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(handler.is_empty());
    }

    #[test]
    fn test_event_participant() {
        let event = MatchEvent::Matched {
            participant: ParticipantId::new(2),
            peer: ParticipantId::new(1),
            rating_gap: 10,
            rounds: 1,
            timestamp: Utc::now(),
        };
        assert_eq!(event.participant(), ParticipantId::new(2));
    }
}
