use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow, PartialEq, Eq)]
#[ts(export)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Tag with the number of places carrying it inside the requested scope.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct TagWithPlaceCount {
    pub id: Uuid,
    pub name: String,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub place_count: i64,
}
