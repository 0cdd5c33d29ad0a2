use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /api/v1/votes`. `vote_type` stays a raw string so an unknown
/// direction is reported as a validation failure rather than a parse rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct CastVoteRequest {
    pub place_id: String,
    pub tag: String,
    pub vote_type: String,
}
