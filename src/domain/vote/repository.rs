use super::{
    entity::{Vote, VoteCommand, VoteDirection},
    transition::{VoteOutcome, VoteTransition},
};
use crate::domain::{place::entity::PlaceTag, shared::errors::DomainError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Result of one committed application of the vote tally rule.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VoteReceipt {
    pub updated: PlaceTag,
    pub tag: String,
    pub place: String,
    pub outcome: VoteOutcome,
    pub current: Option<VoteDirection>,
}

impl VoteReceipt {
    pub fn new(updated: PlaceTag, tag: String, place: String, applied: VoteTransition) -> Self {
        Self {
            updated,
            tag,
            place,
            outcome: applied.outcome,
            current: applied.next,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Resolves user, tag, place and their association, then applies the tally rule,
    /// all in one transaction.
    async fn apply_vote(&self, command: &VoteCommand) -> Result<VoteReceipt, DomainError>;
    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Vote>, DomainError>;
}
