use super::dto::{ListTagsQuery, TagSuggestionQuery};
use crate::{
    domain::{
        shared::{errors::DomainError, geo::Scope},
        tag::{
            entity::{Tag, TagWithPlaceCount},
            repository::TagRepository,
            value_objects::MAX_TAG_NAME_LENGTH,
        },
    },
    infrastructure::security::sanitizer::sanitize,
};
use std::sync::Arc;
use tracing::instrument;

pub const TOP_TAGS_LIMIT: i64 = 25;
pub const TAG_SUGGESTIONS_LIMIT: i64 = 5;
const MIN_SUGGESTION_QUERY_LENGTH: usize = 2;

pub struct ListTagsUseCase {
    tags: Arc<dyn TagRepository>,
}

impl ListTagsUseCase {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    /// Most used tags inside the scope, by number of places carrying them.
    #[instrument(skip(self))]
    pub async fn top(&self, query: ListTagsQuery) -> Result<Vec<TagWithPlaceCount>, DomainError> {
        let scope = Scope::parse(
            query.scope.as_deref(),
            query.country_code.as_deref(),
            query.lat,
            query.lng,
        )?;
        self.tags.top_in_scope(&scope, TOP_TAGS_LIMIT).await
    }

    pub async fn suggest(&self, query: TagSuggestionQuery) -> Result<Vec<Tag>, DomainError> {
        let fragment = query
            .q
            .as_deref()
            .map(|q| sanitize(q, MAX_TAG_NAME_LENGTH))
            .filter(|q| q.chars().count() >= MIN_SUGGESTION_QUERY_LENGTH)
            .ok_or_else(|| {
                DomainError::ValidationError("Searched tag value is invalid or required.".into())
            })?;
        self.tags.suggest(&fragment, TAG_SUGGESTIONS_LIMIT).await
    }
}
