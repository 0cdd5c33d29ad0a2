use crate::infrastructure::places::traits::ProviderPlace;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Body of `POST /api/v1/places`: the provider's place record as fetched by the
/// client, plus the names of existing tags to attach.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct AddPlaceRequest {
    pub place: ProviderPlace,
    pub tags: Vec<String>,
}
