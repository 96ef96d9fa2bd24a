// ============================================================================
// Matchmaker Factory
// Creates matchmakers with proper configuration
// ============================================================================

use crate::domain::config::{LevelSeed, MatchmakerConfig};
use crate::engine::{Matchmaker, SharedMatchmaker};
use crate::interfaces::EventHandler;
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates a matchmaker from configuration
///
/// # Arguments
/// * `config` - Pool configuration
/// * `event_handler` - Event handler for matchmaking events
///
/// # Returns
/// * `Result<Matchmaker, String>` - Configured matchmaker or error
///
/// # Example
/// ```
/// use matchmaking_engine::prelude::*;
/// use std::sync::Arc;
///
/// let config = MatchmakerConfig::deterministic("ranked".to_string(), 7);
/// let matchmaker = create_from_config(config, Arc::new(NoOpEventHandler)).unwrap();
/// assert_eq!(matchmaker.pool(), "ranked");
/// ```
pub fn create_from_config(
    config: MatchmakerConfig,
    event_handler: Arc<dyn EventHandler>,
) -> Result<Matchmaker, String> {
    config.validate()?;
    tracing::debug!(
        pool = %config.pool,
        level_seed = ?config.level_seed,
        max_rounds = config.max_rounds,
        "creating matchmaker"
    );
    Ok(Matchmaker::with_config(&config, event_handler))
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating matchmakers with fluent API
///
/// # Example
/// ```
/// use matchmaking_engine::prelude::*;
/// use std::sync::Arc;
///
/// let matchmaker = MatchmakerBuilder::new("casual")
///     .deterministic(42)
///     .max_rounds(32)
///     .build(Arc::new(NoOpEventHandler))
///     .unwrap();
///
/// assert!(matchmaker.is_empty());
/// ```
pub struct MatchmakerBuilder {
    config: MatchmakerConfig,
}

impl MatchmakerBuilder {
    /// Create a new builder for the named pool
    pub fn new(pool: impl Into<String>) -> Self {
        Self {
            config: MatchmakerConfig::new(pool.into()),
        }
    }

    // ========================================================================
    // Level Source Configuration
    // ========================================================================

    /// Reproducible node heights from `seed`
    pub fn deterministic(mut self, seed: u32) -> Self {
        self.config.level_seed = LevelSeed::Fixed(seed);
        self
    }

    /// Node heights seeded from operating system entropy
    pub fn entropy_seeded(mut self) -> Self {
        self.config.level_seed = LevelSeed::Entropy;
        self
    }

    // ========================================================================
    // Index and Search Configuration
    // ========================================================================

    pub fn max_rounds(mut self, rounds: usize) -> Self {
        self.config.max_rounds = rounds;
        self
    }

    pub fn max_height(mut self, height: usize) -> Self {
        self.config.max_height = height;
        self
    }

    pub fn branching(mut self, branching: u32) -> Self {
        self.config.branching = branching;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_capacity = Some(capacity);
        self
    }

    // ========================================================================
    // Preset Configurations
    // ========================================================================

    /// Apply live service configuration
    pub fn production(pool: impl Into<String>) -> Self {
        Self {
            config: MatchmakerConfig::production(pool.into()),
        }
    }

    /// Apply low latency configuration
    pub fn low_latency(pool: impl Into<String>) -> Self {
        Self {
            config: MatchmakerConfig::low_latency(pool.into()),
        }
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Build the matchmaker
    pub fn build(self, event_handler: Arc<dyn EventHandler>) -> Result<Matchmaker, String> {
        create_from_config(self.config, event_handler)
    }

    /// Build a lock-wrapped matchmaker ready to be shared across threads
    pub fn build_shared(
        self,
        event_handler: Arc<dyn EventHandler>,
    ) -> Result<Arc<SharedMatchmaker>, String> {
        self.build(event_handler)
            .map(|matchmaker| Arc::new(SharedMatchmaker::new(matchmaker)))
    }

    /// Get the configuration without building (for inspection)
    pub fn get_config(&self) -> &MatchmakerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchRequest, ParticipantId};
    use crate::interfaces::NoOpEventHandler;

    #[test]
    fn test_create_from_config() {
        let config = MatchmakerConfig::deterministic("ranked".to_string(), 3);
        let mm = create_from_config(config, Arc::new(NoOpEventHandler)).unwrap();
        assert_eq!(mm.pool(), "ranked");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = MatchmakerConfig::new("bad".to_string()).with_max_rounds(0);
        assert!(create_from_config(config, Arc::new(NoOpEventHandler)).is_err());

        let built = MatchmakerBuilder::new("")
            .build(Arc::new(NoOpEventHandler));
        assert!(built.is_err());
    }

    #[test]
    fn test_builder_pattern() {
        let builder = MatchmakerBuilder::new("casual")
            .deterministic(9)
            .max_rounds(8)
            .max_height(4)
            .branching(2)
            .with_capacity(64);

        let config = builder.get_config();
        assert_eq!(config.level_seed, LevelSeed::Fixed(9));
        assert_eq!(config.max_rounds, 8);
        assert_eq!(config.max_height, 4);
        assert_eq!(config.branching, 2);
        assert_eq!(config.initial_capacity, Some(64));

        let mut mm = builder.build(Arc::new(NoOpEventHandler)).unwrap();
        mm.submit(MatchRequest::new(1u64, 10, 5));
        let outcome = mm.submit(MatchRequest::new(2u64, 12, 5));
        assert_eq!(outcome.peer, Some(ParticipantId::new(1)));
    }

    #[test]
    fn test_build_shared() {
        let shared = MatchmakerBuilder::production("live")
            .build_shared(Arc::new(NoOpEventHandler))
            .unwrap();
        shared.submit(MatchRequest::new(1u64, 10, 5));
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_preset_builders() {
        let fast = MatchmakerBuilder::low_latency("fast");
        assert_eq!(fast.get_config().max_rounds, 16);
        assert_eq!(fast.get_config().level_seed, LevelSeed::Entropy);

        let mm = fast.entropy_seeded().build(Arc::new(NoOpEventHandler)).unwrap();
        assert_eq!(mm.pool(), "fast");
    }
}
