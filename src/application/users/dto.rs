use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Identity asserted by a verified bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionIdentity {
    pub unique_id: String,
    pub email: Option<String>,
    pub name: Option<String>,
}
