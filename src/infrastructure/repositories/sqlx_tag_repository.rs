use super::{escape_like, infrastructure_error, is_unique_violation, push_scope_filter};
use crate::domain::{
    shared::{errors::DomainError, geo::Scope},
    tag::{
        entity::{Tag, TagWithPlaceCount},
        repository::TagRepository,
    },
};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::info;
use uuid::Uuid;

pub struct SqlxTagRepository {
    pub pool: PgPool,
}

impl SqlxTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for SqlxTagRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Tag>, DomainError> {
        sqlx::query_as::<_, Tag>("SELECT id, name, author_id, created_at FROM tags WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure_error)
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Tag>, DomainError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Tag>(
            "SELECT id, name, author_id, created_at FROM tags WHERE name = ANY($1) ORDER BY name",
        )
        .bind(names)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure_error)
    }

    async fn create(&self, name: &str, author_id: Uuid) -> Result<Tag, DomainError> {
        let tag = sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (id, name, author_id) VALUES ($1, $2, $3)
             RETURNING id, name, author_id, created_at",
        )
        .bind(Uuid::now_v7())
        .bind(name)
        .bind(author_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Tag already exists.".into())
            } else {
                infrastructure_error(e)
            }
        })?;

        info!(tag_id = %tag.id, name = %tag.name, "tag created");
        Ok(tag)
    }

    async fn suggest(&self, fragment: &str, limit: i64) -> Result<Vec<Tag>, DomainError> {
        sqlx::query_as::<_, Tag>(
            "SELECT id, name, author_id, created_at FROM tags
             WHERE name ILIKE $1 ESCAPE '\\'
             ORDER BY name
             LIMIT $2",
        )
        .bind(format!("%{}%", escape_like(fragment)))
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(infrastructure_error)
    }

    async fn top_in_scope(
        &self,
        scope: &Scope,
        limit: i64,
    ) -> Result<Vec<TagWithPlaceCount>, DomainError> {
        let joins = match scope {
            Scope::World => {
                "LEFT JOIN place_tags pt ON pt.tag_id = t.id LEFT JOIN places p ON p.id = pt.place_id"
            }
            _ => "JOIN place_tags pt ON pt.tag_id = t.id JOIN places p ON p.id = pt.place_id",
        };

        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT t.id, t.name, t.author_id, t.created_at, COUNT(pt.id)::bigint AS place_count
             FROM tags t {joins}
             WHERE TRUE"
        ));
        push_scope_filter(&mut qb, scope);
        qb.push(" GROUP BY t.id ORDER BY place_count DESC, t.name LIMIT ");
        qb.push_bind(limit);

        qb.build_query_as::<TagWithPlaceCount>()
            .fetch_all(&self.pool)
            .await
            .map_err(infrastructure_error)
    }
}
