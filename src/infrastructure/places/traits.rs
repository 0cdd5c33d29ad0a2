use crate::domain::shared::geo::Coordinates;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct AddressComponent {
    pub long_name: String,
    pub short_name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Geometry {
    pub location: LatLng,
}

/// Place record as returned by the places provider. Every field is optional because
/// the provider omits what it does not know; callers check what they need.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct ProviderPlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub url: Option<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<i32>,
}

impl ProviderPlace {
    pub fn location(&self) -> Option<LatLng> {
        self.geometry.as_ref().map(|g| g.location)
    }

    /// First address component carrying the given type (`locality`, `country`, ...).
    pub fn address_component(&self, kind: &str) -> Option<&AddressComponent> {
        self.address_components
            .iter()
            .find(|c| c.types.iter().any(|t| t == kind))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct StructuredFormatting {
    pub main_text: String,
    pub secondary_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct PlaceSuggestion {
    pub description: String,
    pub place_id: String,
    #[serde(default)]
    pub types: Vec<String>,
    pub structured_formatting: Option<StructuredFormatting>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionQuery {
    pub input: String,
    pub country_code: Option<String>,
    pub bias: Option<Coordinates>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// `Ok(None)` when the provider does not know the id.
    async fn place_details(&self, place_id: &str) -> anyhow::Result<Option<ProviderPlace>>;
    async fn autocomplete(&self, query: &SuggestionQuery) -> anyhow::Result<Vec<PlaceSuggestion>>;
}
