use crate::domain::shared::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use ts_rs::TS;
use uuid::Uuid;

/// Direction of a single user's opinion on a place/tag pairing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum VoteDirection {
    Up,
    Down,
}

impl VoteDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteDirection {
    type Err = DomainError;

    /// Only the exact upper-case wire values are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UP" => Ok(Self::Up),
            "DOWN" => Ok(Self::Down),
            _ => Err(DomainError::ValidationError("Vote type is invalid.".into())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Vote {
    pub id: Uuid,
    pub voted_by_id: Uuid,
    pub place_tag_id: Uuid,
    pub vote_type: VoteDirection,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resolved input of the vote tally rule, already validated and sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteCommand {
    pub user_unique_id: String,
    pub place_external_id: String,
    pub tag_name: String,
    pub direction: VoteDirection,
}
