// ============================================================================
// Consistency Errors
// Breaches of the map/index bookkeeping invariant
// ============================================================================

use crate::domain::ParticipantId;
use std::fmt;

/// A disagreement between the waiting map and the ordered index.
///
/// These indicate a defect in the matchmaker itself; they are never
/// produced by well-formed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConsistencyError {
    /// Id waiting in the map but absent from the index
    MissingFromIndex(ParticipantId),
    /// Id present in the index but not waiting in the map
    MissingFromMap(ParticipantId),
    /// Id represented by more than one index node
    DuplicateInIndex(ParticipantId),
    /// Index snapshot disagrees with the map record's rating
    StaleSnapshot {
        participant: ParticipantId,
        map_rating: u64,
        index_rating: u64,
    },
    /// Adjacent index entries violate the rating order
    OutOfOrder {
        before: ParticipantId,
        after: ParticipantId,
    },
}

impl fmt::Display for ConsistencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyError::MissingFromIndex(id) => {
                write!(f, "participant {} is waiting but not indexed", id)
            },
            ConsistencyError::MissingFromMap(id) => {
                write!(f, "participant {} is indexed but not waiting", id)
            },
            ConsistencyError::DuplicateInIndex(id) => {
                write!(f, "participant {} is indexed more than once", id)
            },
            ConsistencyError::StaleSnapshot {
                participant,
                map_rating,
                index_rating,
            } => write!(
                f,
                "participant {} has rating {} in the map but {} in the index",
                participant, map_rating, index_rating
            ),
            ConsistencyError::OutOfOrder { before, after } => {
                write!(f, "index order broken between {} and {}", before, after)
            },
        }
    }
}

impl std::error::Error for ConsistencyError {}
