// ============================================================================
// Host Adapter Module
// Thin boundary between a host runtime and the matchmaking core
// ============================================================================

mod host;
#[cfg(feature = "serde")]
mod protocol;
mod wire;

pub use host::{HostAdapter, MatchReply};
pub use wire::{decode_u64, AdapterError, AdapterResult, WireScalar};
