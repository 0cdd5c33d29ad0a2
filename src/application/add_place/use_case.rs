use super::dto::AddPlaceRequest;
use crate::{
    domain::{
        place::{
            entity::{NewPlace, PlaceWithTags},
            repository::PlaceRepository,
        },
        shared::{errors::DomainError, geo::Coordinates},
        tag::repository::TagRepository,
        user::repository::UserRepository,
    },
    infrastructure::{
        places::traits::ProviderPlace,
        security::sanitizer::{sanitize, sanitize_optional, sanitize_tag_list},
    },
};
use std::sync::Arc;
use tracing::{debug, instrument};

const DEFAULT_CATEGORY: &str = "establishment";
const DEFAULT_MAPS_URL: &str = "https://maps.google.com";
const UNKNOWN: &str = "Unknown";

/// Submits a provider place to the ranking with one or more existing tags.
pub struct AddPlaceUseCase {
    places: Arc<dyn PlaceRepository>,
    tags: Arc<dyn TagRepository>,
    users: Arc<dyn UserRepository>,
}

impl AddPlaceUseCase {
    pub fn new(
        places: Arc<dyn PlaceRepository>,
        tags: Arc<dyn TagRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            places,
            tags,
            users,
        }
    }

    #[instrument(skip(self, request), fields(tags = request.tags.len()))]
    pub async fn execute(
        &self,
        user_unique_id: &str,
        request: AddPlaceRequest,
    ) -> Result<PlaceWithTags, DomainError> {
        let user = self
            .users
            .find_by_unique_id(user_unique_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        let tag_names = sanitize_tag_list(&request.tags);
        if tag_names.is_empty() {
            return Err(DomainError::ValidationError(
                "Tags should be between 1 and 6 valid tags.".into(),
            ));
        }

        let new_place = normalize_place(&request.place)?;

        let tags = self.tags.find_by_names(&tag_names).await?;
        if tags.is_empty() {
            return Err(DomainError::NotFound("One or more tags do not exist.".into()));
        }
        if tags.len() < tag_names.len() {
            debug!(
                requested = tag_names.len(),
                found = tags.len(),
                "ignoring unknown tags"
            );
        }

        let tag_ids: Vec<_> = tags.iter().map(|t| t.id).collect();
        self.places.submit(&new_place, &tag_ids, user.id).await
    }
}

/// Validates and sanitizes a provider record into storable place data.
pub fn normalize_place(raw: &ProviderPlace) -> Result<NewPlace, DomainError> {
    let incomplete = || DomainError::ValidationError("Invalid or incomplete place data.".into());

    let place_id = sanitize_optional(raw.place_id.as_deref(), 100).ok_or_else(incomplete)?;
    let name = sanitize_optional(raw.name.as_deref(), 255).ok_or_else(incomplete)?;
    let address =
        sanitize_optional(raw.formatted_address.as_deref(), 500).ok_or_else(incomplete)?;
    let location = raw.location().ok_or_else(incomplete)?;
    let coordinates = Coordinates::new(location.lat, location.lng)?;

    let component = |kind: &str, short: bool, max: usize| {
        raw.address_component(kind)
            .map(|c| if short { &c.short_name } else { &c.long_name })
            .and_then(|v| sanitize_optional(Some(v.as_str()), max))
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    Ok(NewPlace {
        place_id,
        name,
        category: sanitize_optional(raw.types.first().map(String::as_str), 100)
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        address,
        city: component("locality", false, 100),
        country: component("country", false, 100),
        country_code: component("country", true, 10),
        coordinates,
        phone: sanitize_optional(raw.international_phone_number.as_deref(), 50),
        website: sanitize_optional(raw.website.as_deref(), 500),
        maps_url: raw
            .url
            .as_deref()
            .map(|u| sanitize(u, 500))
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_MAPS_URL.to_string()),
        review_value: raw.rating.filter(|r| r.is_finite()).unwrap_or(0.0),
        review_amount: raw.user_ratings_total.unwrap_or(0),
    })
}
