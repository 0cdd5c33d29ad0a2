use super::entity::{NewPlace, PlaceLookup, PlaceWithTags, RankedPlace};
use crate::domain::shared::{errors::DomainError, geo::Scope, pagination::PageRequest};
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaceRepository: Send + Sync {
    /// Exact provider id match first, then case-insensitive address within coordinate
    /// tolerance. Read-only.
    async fn resolve(&self, lookup: &PlaceLookup) -> Result<Option<PlaceWithTags>, DomainError>;
    /// Resolves or inserts the place and attaches every tag in `tag_ids`, atomically.
    /// Fails with `Conflict` when any of the tags is already attached.
    async fn submit(
        &self,
        place: &NewPlace,
        tag_ids: &[Uuid],
        added_by: Uuid,
    ) -> Result<PlaceWithTags, DomainError>;
    /// Places carrying `tag_name`, best score first. Returns up to `page.limit() + 1`
    /// rows so the caller can tell whether another page follows.
    async fn list_ranked(
        &self,
        tag_name: &str,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Vec<RankedPlace>, DomainError>;
}
