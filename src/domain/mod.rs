// ============================================================================
// Domain Models Module
// Contains all core domain entities and value objects
// ============================================================================

pub mod config;
pub mod participant;
pub mod request;

pub use config::{LevelSeed, MatchmakerConfig};
pub use participant::{Participant, ParticipantId, RatingOrder, TagSet};
pub use request::{MatchOutcome, MatchRequest};
