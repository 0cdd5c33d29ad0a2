use super::dto::CreateTagRequest;
use crate::{
    domain::{
        shared::errors::DomainError,
        tag::{
            entity::Tag,
            repository::TagRepository,
            value_objects::{MAX_TAG_NAME_LENGTH, TagName},
        },
        user::repository::UserRepository,
    },
    infrastructure::security::sanitizer::sanitize,
};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct CreateTagUseCase {
    tags: Arc<dyn TagRepository>,
    users: Arc<dyn UserRepository>,
}

impl CreateTagUseCase {
    pub fn new(tags: Arc<dyn TagRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { tags, users }
    }

    #[instrument(skip(self, request), fields(phrase = %request.phrase))]
    pub async fn execute(
        &self,
        user_unique_id: &str,
        request: CreateTagRequest,
    ) -> Result<Tag, DomainError> {
        let name = TagName::compose(
            request.phrase.trim(),
            &sanitize(&request.keyword, MAX_TAG_NAME_LENGTH),
        )?;

        let author = self
            .users
            .find_by_unique_id(user_unique_id)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if self.tags.find_by_name(name.as_str()).await?.is_some() {
            return Err(DomainError::Conflict("Tag already exists.".into()));
        }

        let tag = self.tags.create(name.as_str(), author.id).await?;
        info!(tag_id = %tag.id, "tag created by {}", author.id);
        Ok(tag)
    }
}
