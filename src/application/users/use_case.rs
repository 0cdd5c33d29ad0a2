use super::dto::SessionIdentity;
use crate::{
    domain::{
        shared::errors::DomainError,
        user::{
            entity::{User, UserWithVotes},
            repository::UserRepository,
        },
        vote::repository::VoteRepository,
    },
    infrastructure::security::sanitizer::{sanitize, sanitize_optional},
};
use std::sync::Arc;
use tracing::{info, instrument};

const DEFAULT_USER_NAME: &str = "Unknown";

pub struct UsersUseCase {
    users: Arc<dyn UserRepository>,
    votes: Arc<dyn VoteRepository>,
}

impl UsersUseCase {
    pub fn new(users: Arc<dyn UserRepository>, votes: Arc<dyn VoteRepository>) -> Self {
        Self { users, votes }
    }

    /// Creates the user on first sign-in and refreshes their display name afterwards.
    #[instrument(skip(self, identity), fields(unique_id = %identity.unique_id))]
    pub async fn sync_session(&self, identity: SessionIdentity) -> Result<User, DomainError> {
        let unique_id = sanitize(&identity.unique_id, 255);
        if unique_id.is_empty() {
            return Err(DomainError::Unauthorized);
        }
        let email = sanitize_optional(identity.email.as_deref(), 255).ok_or_else(|| {
            DomainError::ValidationError("Email is required to sign in.".into())
        })?;
        let name = sanitize_optional(identity.name.as_deref(), 255)
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());

        let user = self.users.upsert(&unique_id, &email, &name).await?;
        info!(user_id = %user.id, "session synced");
        Ok(user)
    }

    pub async fn me(&self, unique_id: &str) -> Result<UserWithVotes, DomainError> {
        let user = self
            .users
            .find_by_unique_id(unique_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;
        let votes = self.votes.find_by_user(user.id).await?;
        Ok(UserWithVotes { user, votes })
    }
}
