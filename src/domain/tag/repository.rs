use super::entity::{Tag, TagWithPlaceCount};
use crate::domain::shared::{errors::DomainError, geo::Scope};
use async_trait::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, DomainError>;
    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Tag>, DomainError>;
    /// Fails with `Conflict` when the name is taken.
    async fn create(&self, name: &str, author_id: Uuid) -> Result<Tag, DomainError>;
    async fn suggest(&self, fragment: &str, limit: i64) -> Result<Vec<Tag>, DomainError>;
    async fn top_in_scope(
        &self,
        scope: &Scope,
        limit: i64,
    ) -> Result<Vec<TagWithPlaceCount>, DomainError>;
}
