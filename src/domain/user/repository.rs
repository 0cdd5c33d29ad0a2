use super::entity::User;
use crate::domain::shared::errors::DomainError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user or refreshes the name of an existing one.
    async fn upsert(&self, unique_id: &str, email: &str, name: &str) -> Result<User, DomainError>;
    async fn find_by_unique_id(&self, unique_id: &str) -> Result<Option<User>, DomainError>;
}
