use super::infrastructure_error;
use crate::domain::{
    shared::errors::DomainError,
    user::{entity::User, repository::UserRepository},
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn upsert(&self, unique_id: &str, email: &str, name: &str) -> Result<User, DomainError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (id, unique_id, email, name) VALUES ($1, $2, $3, $4)
             ON CONFLICT (unique_id) DO UPDATE SET name = EXCLUDED.name
             RETURNING id, unique_id, name, email, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(unique_id)
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(infrastructure_error)
    }

    async fn find_by_unique_id(&self, unique_id: &str) -> Result<Option<User>, DomainError> {
        sqlx::query_as::<_, User>(
            "SELECT id, unique_id, name, email, created_at FROM users WHERE unique_id = $1",
        )
        .bind(unique_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(infrastructure_error)
    }
}
