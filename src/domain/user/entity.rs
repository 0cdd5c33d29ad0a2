use crate::domain::vote::entity::Vote;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow, PartialEq, Eq)]
#[ts(export)]
pub struct User {
    pub id: Uuid,
    /// Subject id issued by the identity provider.
    pub unique_id: String,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserWithVotes {
    #[serde(flatten)]
    pub user: User,
    pub votes: Vec<Vote>,
}
