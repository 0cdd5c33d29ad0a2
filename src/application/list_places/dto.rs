use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Query of `GET /api/v1/places`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListPlacesQuery {
    pub scope: Option<String>,
    pub tag: Option<String>,
    pub page: Option<i64>,
    pub country_code: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}
