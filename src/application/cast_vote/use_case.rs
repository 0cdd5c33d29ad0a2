use super::dto::CastVoteRequest;
use crate::{
    domain::{
        shared::errors::DomainError,
        vote::{
            entity::{VoteCommand, VoteDirection},
            repository::{VoteReceipt, VoteRepository},
        },
    },
    infrastructure::security::sanitizer::{
        MAX_VOTE_PLACE_ID_LENGTH, MAX_VOTE_TAG_LENGTH, sanitize,
    },
};
use std::sync::Arc;
use tracing::instrument;

/// Applies one vote request of an authenticated user.
pub struct CastVoteUseCase {
    votes: Arc<dyn VoteRepository>,
}

impl CastVoteUseCase {
    pub fn new(votes: Arc<dyn VoteRepository>) -> Self {
        Self { votes }
    }

    /// The direction is validated before anything touches the datastore; tag and
    /// place ids are sanitized before lookup.
    #[instrument(skip(self, request), fields(vote_type = %request.vote_type))]
    pub async fn execute(
        &self,
        user_unique_id: &str,
        request: CastVoteRequest,
    ) -> Result<VoteReceipt, DomainError> {
        let direction: VoteDirection = request.vote_type.parse()?;

        let command = VoteCommand {
            user_unique_id: user_unique_id.to_string(),
            place_external_id: sanitize(&request.place_id, MAX_VOTE_PLACE_ID_LENGTH),
            tag_name: sanitize(&request.tag, MAX_VOTE_TAG_LENGTH),
            direction,
        };

        self.votes.apply_vote(&command).await
    }
}
