// ============================================================================
// Engine Module
// Contains the core matchmaking business logic
// ============================================================================

mod errors;
mod matchmaker;
mod shared;

pub mod factory;

pub use errors::ConsistencyError;
pub use factory::{create_from_config, MatchmakerBuilder};
pub use matchmaker::Matchmaker;
pub use shared::SharedMatchmaker;
