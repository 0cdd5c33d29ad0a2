use super::dto::ListPlacesQuery;
use crate::{
    domain::{
        place::{entity::RankedPlace, repository::PlaceRepository},
        shared::{
            errors::DomainError,
            geo::Scope,
            pagination::{PageRequest, PaginatedResponse},
        },
        tag::value_objects::MAX_TAG_NAME_LENGTH,
    },
    infrastructure::security::sanitizer::sanitize,
};
use std::sync::Arc;
use tracing::instrument;

const MIN_TAG_QUERY_LENGTH: usize = 2;

/// Leaderboard of places for one tag inside a scope.
pub struct ListPlacesUseCase {
    places: Arc<dyn PlaceRepository>,
}

impl ListPlacesUseCase {
    pub fn new(places: Arc<dyn PlaceRepository>) -> Self {
        Self { places }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        query: ListPlacesQuery,
    ) -> Result<PaginatedResponse<RankedPlace>, DomainError> {
        let page = PageRequest::new(query.page.unwrap_or(1))?;

        let tag = query
            .tag
            .as_deref()
            .map(|t| sanitize(t, MAX_TAG_NAME_LENGTH))
            .filter(|t| t.chars().count() >= MIN_TAG_QUERY_LENGTH)
            .ok_or_else(|| DomainError::ValidationError("Invalid tag name.".into()))?;

        let scope = Scope::parse(
            query.scope.as_deref(),
            query.country_code.as_deref(),
            query.lat,
            query.lng,
        )?;

        let rows = self.places.list_ranked(&tag, &scope, page).await?;
        Ok(PaginatedResponse::from_overfetch(rows, page))
    }
}
