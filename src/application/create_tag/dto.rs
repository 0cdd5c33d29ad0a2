use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct CreateTagRequest {
    /// One of the fixed ranking phrases, e.g. `"Most Loved"`.
    pub phrase: String,
    pub keyword: String,
}
