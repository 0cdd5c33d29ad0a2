use super::infrastructure_error;
use crate::domain::{
    place::entity::PlaceTag,
    shared::errors::DomainError,
    vote::{
        entity::{Vote, VoteCommand, VoteDirection},
        repository::{VoteReceipt, VoteRepository},
        transition::transition,
    },
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::{info, instrument};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct VoteRow {
    id: Uuid,
    voted_by_id: Uuid,
    place_tag_id: Uuid,
    vote_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VoteRow> for Vote {
    type Error = DomainError;

    fn try_from(row: VoteRow) -> Result<Self, Self::Error> {
        Ok(Vote {
            id: row.id,
            voted_by_id: row.voted_by_id,
            place_tag_id: row.place_tag_id,
            vote_type: parse_stored_direction(&row.vote_type)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_stored_direction(raw: &str) -> Result<VoteDirection, DomainError> {
    raw.parse().map_err(|_| {
        DomainError::InfrastructureError(format!("unexpected stored vote_type {:?}", raw))
    })
}

pub struct SqlxVoteRepository {
    pub pool: PgPool,
}

impl SqlxVoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for SqlxVoteRepository {
    #[instrument(skip(self), fields(direction = %command.direction))]
    async fn apply_vote(&self, command: &VoteCommand) -> Result<VoteReceipt, DomainError> {
        // Dropping `tx` without commit rolls back every statement below.
        let mut tx = self.pool.begin().await.map_err(infrastructure_error)?;

        let user_id = sqlx::query_scalar::<_, Uuid>("SELECT id FROM users WHERE unique_id = $1")
            .bind(&command.user_unique_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(infrastructure_error)?
            .ok_or_else(|| DomainError::NotFound("User not found.".into()))?;

        let (tag_id, tag_name) =
            sqlx::query_as::<_, (Uuid, String)>("SELECT id, name FROM tags WHERE name = $1")
                .bind(&command.tag_name)
                .fetch_optional(&mut *tx)
                .await
                .map_err(infrastructure_error)?
                .ok_or_else(|| DomainError::NotFound("Tag does not exist.".into()))?;

        let (place_id, place_name) =
            sqlx::query_as::<_, (Uuid, String)>("SELECT id, name FROM places WHERE place_id = $1")
                .bind(&command.place_external_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(infrastructure_error)?
                .ok_or_else(|| DomainError::NotFound("Place does not exist.".into()))?;

        // Row lock on the pairing serializes concurrent votes on it until commit.
        let place_tag = sqlx::query_as::<_, PlaceTag>(
            "SELECT id, place_id, tag_id, up_votes, down_votes, created_at
             FROM place_tags
             WHERE place_id = $1 AND tag_id = $2
             FOR UPDATE",
        )
        .bind(place_id)
        .bind(tag_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(infrastructure_error)?
        .ok_or_else(|| DomainError::NotFound("Place is not added with this tag.".into()))?;

        let current = sqlx::query_scalar::<_, String>(
            "SELECT vote_type FROM votes WHERE voted_by_id = $1 AND place_tag_id = $2 FOR UPDATE",
        )
        .bind(user_id)
        .bind(place_tag.id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(infrastructure_error)?
        .as_deref()
        .map(parse_stored_direction)
        .transpose()?;

        let applied = transition(current, command.direction);

        match (current, applied.next) {
            (None, Some(direction)) => {
                sqlx::query(
                    "INSERT INTO votes (id, voted_by_id, place_tag_id, vote_type) VALUES ($1, $2, $3, $4)",
                )
                .bind(Uuid::now_v7())
                .bind(user_id)
                .bind(place_tag.id)
                .bind(direction.as_str())
                .execute(&mut *tx)
                .await
                .map_err(infrastructure_error)?;
            }
            (Some(_), None) => {
                sqlx::query("DELETE FROM votes WHERE voted_by_id = $1 AND place_tag_id = $2")
                    .bind(user_id)
                    .bind(place_tag.id)
                    .execute(&mut *tx)
                    .await
                    .map_err(infrastructure_error)?;
            }
            (Some(_), Some(direction)) => {
                sqlx::query(
                    "UPDATE votes SET vote_type = $3, updated_at = NOW()
                     WHERE voted_by_id = $1 AND place_tag_id = $2",
                )
                .bind(user_id)
                .bind(place_tag.id)
                .bind(direction.as_str())
                .execute(&mut *tx)
                .await
                .map_err(infrastructure_error)?;
            }
            (None, None) => {}
        }

        let updated = sqlx::query_as::<_, PlaceTag>(
            "UPDATE place_tags
             SET up_votes = up_votes + $2, down_votes = down_votes + $3
             WHERE id = $1
             RETURNING id, place_id, tag_id, up_votes, down_votes, created_at",
        )
        .bind(place_tag.id)
        .bind(applied.delta.up)
        .bind(applied.delta.down)
        .fetch_one(&mut *tx)
        .await
        .map_err(infrastructure_error)?;

        tx.commit().await.map_err(infrastructure_error)?;

        info!(
            place_tag_id = %updated.id,
            outcome = ?applied.outcome,
            up_votes = updated.up_votes,
            down_votes = updated.down_votes,
            "vote applied"
        );

        Ok(VoteReceipt::new(updated, tag_name, place_name, applied))
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Vote>, DomainError> {
        sqlx::query_as::<_, VoteRow>(
            "SELECT id, voted_by_id, place_tag_id, vote_type, created_at, updated_at
             FROM votes
             WHERE voted_by_id = $1
             ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure_error)?
        .into_iter()
        .map(Vote::try_from)
        .collect()
    }
}
