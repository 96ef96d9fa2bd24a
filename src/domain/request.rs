// ============================================================================
// Match Requests and Outcomes
// ============================================================================

use super::ParticipantId;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An incoming admit-or-pair request.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchRequest {
    pub id: ParticipantId,
    pub rating: u64,
    pub attributes: Vec<String>,
    pub exclusions: Vec<String>,
    /// Largest acceptable rating distance to a peer
    pub limit: u64,
}

impl MatchRequest {
    /// Request with no attributes or exclusions
    pub fn new(id: impl Into<ParticipantId>, rating: u64, limit: u64) -> Self {
        Self {
            id: id.into(),
            rating,
            attributes: Vec::new(),
            exclusions: Vec::new(),
            limit,
        }
    }

    /// Builder method: set attributes
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method: set exclusions
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = exclusions.into_iter().map(Into::into).collect();
        self
    }
}

/// Result of a submission: the requester and, if paired, its peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchOutcome {
    pub participant: ParticipantId,
    pub peer: Option<ParticipantId>,
}

impl MatchOutcome {
    pub fn waiting(participant: ParticipantId) -> Self {
        Self {
            participant,
            peer: None,
        }
    }

    pub fn paired(participant: ParticipantId, peer: ParticipantId) -> Self {
        Self {
            participant,
            peer: Some(peer),
        }
    }

    #[inline]
    pub fn is_matched(&self) -> bool {
        self.peer.is_some()
    }
}
