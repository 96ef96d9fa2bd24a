// ============================================================================
// Matchmaker Configuration
// Pool identity, index shape and search bounds
// ============================================================================

use crate::index::{
    EntropyRng, LevelRng, ParkMiller, DEFAULT_BRANCHING, DEFAULT_MAX_ROUNDS, MAX_HEIGHT,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Level Seed
// ============================================================================

/// Where skip list node heights come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LevelSeed {
    /// Reproducible Park-Miller sequence from the given seed
    Fixed(u32),
    /// Seeded from operating system entropy at construction
    Entropy,
}

impl Default for LevelSeed {
    fn default() -> Self {
        LevelSeed::Fixed(ParkMiller::DEFAULT_SEED)
    }
}

impl LevelSeed {
    pub fn rng(&self) -> Box<dyn LevelRng> {
        match self {
            LevelSeed::Fixed(seed) => Box::new(ParkMiller::new(*seed)),
            LevelSeed::Entropy => Box::new(EntropyRng::new()),
        }
    }
}

// ============================================================================
// Complete Matchmaker Configuration
// ============================================================================

/// Configuration for one waiting pool
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchmakerConfig {
    /// Pool name, used in logs and events (e.g. "ranked-eu", "casual")
    pub pool: String,

    /// Source of node heights
    pub level_seed: LevelSeed,

    /// Tallest node the index may build (1..=12)
    pub max_height: usize,

    /// Promotion divisor; a node grows one level when a draw is divisible by it
    pub branching: u32,

    /// Outward search rounds before a requester is admitted unmatched
    pub max_rounds: usize,

    /// Optional: slots to pre-allocate in the map and index
    pub initial_capacity: Option<usize>,
}

impl MatchmakerConfig {
    /// Create a configuration with default index shape and search bounds
    pub fn new(pool: String) -> Self {
        Self {
            pool,
            level_seed: LevelSeed::default(),
            max_height: MAX_HEIGHT,
            branching: DEFAULT_BRANCHING,
            max_rounds: DEFAULT_MAX_ROUNDS,
            initial_capacity: None,
        }
    }

    /// Builder method: Set level seed policy
    pub fn with_level_seed(mut self, seed: LevelSeed) -> Self {
        self.level_seed = seed;
        self
    }

    /// Builder method: Set maximum node height
    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    /// Builder method: Set promotion divisor
    pub fn with_branching(mut self, branching: u32) -> Self {
        self.branching = branching;
        self
    }

    /// Builder method: Set search round cap
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Builder method: Pre-allocate capacity
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.pool.is_empty() {
            return Err("Pool name cannot be empty".to_string());
        }

        if self.max_height == 0 || self.max_height > MAX_HEIGHT {
            return Err(format!("Max height must be between 1 and {}", MAX_HEIGHT));
        }

        if self.branching < 2 {
            return Err("Branching factor must be at least 2".to_string());
        }

        if self.max_rounds == 0 {
            return Err("Max rounds must be positive".to_string());
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl MatchmakerConfig {
    /// Reproducible configuration for tests and replays
    /// - Fixed level seed
    /// - Default search bounds
    pub fn deterministic(pool: String, seed: u32) -> Self {
        Self::new(pool).with_level_seed(LevelSeed::Fixed(seed))
    }

    /// Live service configuration
    /// - Entropy-seeded levels
    /// - Default search bounds
    pub fn production(pool: String) -> Self {
        Self::new(pool).with_level_seed(LevelSeed::Entropy)
    }

    /// Small pools where latency matters more than pairing quality
    /// - Shallow search
    pub fn low_latency(pool: String) -> Self {
        Self::production(pool).with_max_rounds(16)
    }
}
