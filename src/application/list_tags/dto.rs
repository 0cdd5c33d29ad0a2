use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query of `GET /api/v1/tags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListTagsQuery {
    pub scope: Option<String>,
    pub country_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TagSuggestionQuery {
    pub q: Option<String>,
}
