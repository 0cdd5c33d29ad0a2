use crate::{domain::place::entity::PlaceWithTags, infrastructure::places::traits::ProviderPlace};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlaceDetailsQuery {
    pub place_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlaceSuggestionsQuery {
    pub q: Option<String>,
    pub country_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Provider details next to the stored place they resolve to, if any.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlaceDetailsResponse {
    pub provider: ProviderPlace,
    pub stored: Option<PlaceWithTags>,
}
