// ============================================================================
// Host Adapter
// Decodes host calls into core requests and encodes replies
// ============================================================================

use super::wire::{decode_u64, AdapterResult, WireScalar};
use crate::domain::{MatchRequest, ParticipantId};
use crate::engine::SharedMatchmaker;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reply to a match call that found a peer. Identities are rendered as
/// decimal strings so that 64-bit values survive hosts with 53-bit numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MatchReply {
    #[cfg_attr(feature = "serde", serde(rename = "self"))]
    pub self_id: String,
    pub peer: String,
}

/// Boundary between a host runtime and one shared pool.
#[derive(Clone)]
pub struct HostAdapter {
    matchmaker: Arc<SharedMatchmaker>,
}

impl HostAdapter {
    pub fn new(matchmaker: Arc<SharedMatchmaker>) -> Self {
        Self { matchmaker }
    }

    /// Submit a match request. `Ok(None)` means the caller is now waiting.
    pub fn match_request(
        &self,
        uid: &WireScalar,
        score: &WireScalar,
        limit: &WireScalar,
        attrs: Vec<String>,
        bans: Vec<String>,
    ) -> AdapterResult<Option<MatchReply>> {
        let request = MatchRequest {
            id: ParticipantId::new(decode_u64(uid, "uid")?),
            rating: decode_u64(score, "score")?,
            attributes: attrs,
            exclusions: bans,
            limit: decode_u64(limit, "limit")?,
        };

        let outcome = self.matchmaker.submit(request);
        Ok(outcome.peer.map(|peer| MatchReply {
            self_id: outcome.participant.to_string(),
            peer: peer.to_string(),
        }))
    }

    /// Withdraw a waiting caller.
    pub fn cancel(&self, uid: &WireScalar) -> AdapterResult<bool> {
        let id = ParticipantId::new(decode_u64(uid, "uid")?);
        Ok(self.matchmaker.cancel(id))
    }

    pub fn matchmaker(&self) -> &Arc<SharedMatchmaker> {
        &self.matchmaker
    }
}
