use super::dto::{PlaceDetailsQuery, PlaceDetailsResponse, PlaceSuggestionsQuery};
use crate::{
    domain::{
        place::{entity::PlaceLookup, repository::PlaceRepository},
        shared::{errors::DomainError, geo::Coordinates},
    },
    infrastructure::{
        places::traits::{PlaceSuggestion, PlacesProvider, SuggestionQuery},
        security::sanitizer::{sanitize, sanitize_optional},
    },
};
use std::sync::Arc;
use tracing::{error, instrument};

const MIN_PLACE_ID_LENGTH: usize = 10;
const MIN_SUGGESTION_INPUT_LENGTH: usize = 3;

fn provider_error(err: anyhow::Error) -> DomainError {
    error!("places provider failed: {:#}", err);
    DomainError::ExternalService("Error from external api.".into())
}

/// Proxies the places provider for the place picker.
pub struct PlaceLookupUseCase {
    provider: Arc<dyn PlacesProvider>,
    places: Arc<dyn PlaceRepository>,
}

impl PlaceLookupUseCase {
    pub fn new(provider: Arc<dyn PlacesProvider>, places: Arc<dyn PlaceRepository>) -> Self {
        Self { provider, places }
    }

    #[instrument(skip(self))]
    pub async fn details(
        &self,
        query: PlaceDetailsQuery,
    ) -> Result<PlaceDetailsResponse, DomainError> {
        let place_id = query
            .place_id
            .as_deref()
            .map(|id| sanitize(id, 255))
            .filter(|id| id.chars().count() >= MIN_PLACE_ID_LENGTH)
            .ok_or_else(|| DomainError::ValidationError("place_id is invalid or missing.".into()))?;

        let incomplete = || DomainError::NotFound("Incomplete response from external api.".into());

        let provider = self
            .provider
            .place_details(&place_id)
            .await
            .map_err(provider_error)?
            .ok_or_else(incomplete)?;

        let lookup = match (
            provider.place_id.as_deref(),
            provider.location(),
            provider.formatted_address.as_deref(),
        ) {
            (Some(id), Some(location), Some(address)) => PlaceLookup {
                place_id: id.to_string(),
                address: address.to_string(),
                coordinates: Coordinates::new(location.lat, location.lng)
                    .map_err(|_| incomplete())?,
            },
            _ => return Err(incomplete()),
        };

        let stored = self.places.resolve(&lookup).await?;
        Ok(PlaceDetailsResponse { provider, stored })
    }

    #[instrument(skip(self))]
    pub async fn suggestions(
        &self,
        query: PlaceSuggestionsQuery,
    ) -> Result<Vec<PlaceSuggestion>, DomainError> {
        let bias = match (query.lat, query.lng) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng).map_err(|_| {
                DomainError::ValidationError("Latitude/Longitude is invalid.".into())
            })?),
            (None, None) => None,
            _ => {
                return Err(DomainError::ValidationError(
                    "Latitude/Longitude is invalid.".into(),
                ));
            }
        };

        let input = query
            .q
            .as_deref()
            .map(|q| sanitize(q, 255))
            .filter(|q| q.chars().count() >= MIN_SUGGESTION_INPUT_LENGTH)
            .ok_or_else(|| {
                DomainError::ValidationError("Searched place value is invalid or required.".into())
            })?;

        let suggestion_query = SuggestionQuery {
            input,
            country_code: sanitize_optional(query.country_code.as_deref(), 2)
                .map(|c| c.to_lowercase()),
            bias,
        };

        self.provider
            .autocomplete(&suggestion_query)
            .await
            .map_err(provider_error)
    }
}
