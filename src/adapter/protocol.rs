// ============================================================================
// JSON Line Protocol
// One request object per line, one reply value per line
// ============================================================================
//
// {"op":"match","uid":1,"score":"1000","limit":50,"attrs":["eu"],"bans":[]}
//     -> {"self":"1","peer":"2"}  or  null
// {"op":"cancel","uid":"1"}
//     -> true  or  false
// ============================================================================

use super::host::HostAdapter;
use super::wire::{AdapterError, AdapterResult, WireScalar};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct MatchBody {
    uid: WireScalar,
    score: WireScalar,
    limit: WireScalar,
    #[serde(default)]
    attrs: Vec<String>,
    #[serde(default)]
    bans: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CancelBody {
    uid: WireScalar,
}

impl HostAdapter {
    /// Decode one JSON request, run it, and encode the reply.
    pub fn handle_line(&self, line: &str) -> AdapterResult<String> {
        let value: Value = serde_json::from_str(line)
            .map_err(|e| AdapterError::MalformedRequest(e.to_string()))?;

        let op = value
            .get("op")
            .and_then(Value::as_str)
            .ok_or_else(|| AdapterError::MalformedRequest("missing \"op\"".to_string()))?
            .to_string();

        let reply = match op.as_str() {
            "match" => {
                let body: MatchBody = decode_body(value)?;
                let reply =
                    self.match_request(&body.uid, &body.score, &body.limit, body.attrs, body.bans)?;
                serde_json::to_string(&reply)
            },
            "cancel" => {
                let body: CancelBody = decode_body(value)?;
                serde_json::to_string(&self.cancel(&body.uid)?)
            },
            _ => return Err(AdapterError::UnknownOperation(op)),
        };

        let reply = reply.map_err(|e| AdapterError::Encoding(e.to_string()))?;
        tracing::trace!(%op, %reply, "host request served");
        Ok(reply)
    }
}

fn decode_body<T: for<'de> Deserialize<'de>>(value: Value) -> AdapterResult<T> {
    serde_json::from_value(value).map_err(|e| AdapterError::MalformedRequest(e.to_string()))
}
