// ============================================================================
// Index Module
// Ordered waiting-pool index: skip list, cursors and level random sources
// ============================================================================

mod cursor;
pub mod random;
mod skip_list;

pub use cursor::{Cursor, Iter};
pub use random::{EntropyRng, LevelRng, ParkMiller};
pub use skip_list::{
    KeyComparator, Matchable, NodeId, Probe, SkipList, DEFAULT_BRANCHING, DEFAULT_MAX_ROUNDS,
    MAX_HEIGHT,
};
