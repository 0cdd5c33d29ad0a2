use super::{infrastructure_error, is_unique_violation, push_scope_filter};
use crate::domain::{
    place::{
        entity::{NewPlace, Place, PlaceLookup, PlaceTagSummary, PlaceWithTags, RankedPlace},
        repository::PlaceRepository,
    },
    shared::{errors::DomainError, geo::Scope, pagination::PageRequest},
};
use async_trait::async_trait;
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

const PLACE_COLUMNS: &str = "p.id, p.place_id, p.name, p.category, p.address, p.city, p.country, \
     p.country_code, p.lat, p.lng, p.phone, p.website, p.maps_url, p.review_value, \
     p.review_amount, p.added_by_id, p.created_at, p.updated_at";

#[derive(Debug, FromRow)]
struct RankedRow {
    #[sqlx(flatten)]
    place: Place,
    score: i64,
}

pub struct SqlxPlaceRepository {
    pub pool: PgPool,
}

impl SqlxPlaceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn resolve_in(
    conn: &mut PgConnection,
    lookup: &PlaceLookup,
) -> Result<Option<Place>, DomainError> {
    let by_id = sqlx::query_as::<_, Place>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places p WHERE p.place_id = $1"
    ))
    .bind(&lookup.place_id)
    .fetch_optional(&mut *conn)
    .await
    .map_err(infrastructure_error)?;

    if by_id.is_some() {
        return Ok(by_id);
    }

    let (min_lat, max_lat, min_lng, max_lng) = lookup.coordinates.tolerance_window();
    sqlx::query_as::<_, Place>(&format!(
        "SELECT {PLACE_COLUMNS} FROM places p
         WHERE LOWER(p.address) = LOWER($1)
           AND p.lat BETWEEN $2 AND $3
           AND p.lng BETWEEN $4 AND $5
         ORDER BY p.created_at
         LIMIT 1"
    ))
    .bind(&lookup.address)
    .bind(min_lat)
    .bind(max_lat)
    .bind(min_lng)
    .bind(max_lng)
    .fetch_optional(&mut *conn)
    .await
    .map_err(infrastructure_error)
}

async fn tags_for(
    conn: &mut PgConnection,
    place_ids: &[Uuid],
) -> Result<Vec<PlaceTagSummary>, DomainError> {
    if place_ids.is_empty() {
        return Ok(Vec::new());
    }

    sqlx::query_as::<_, PlaceTagSummary>(
        "SELECT pt.id AS place_tag_id, pt.place_id, pt.tag_id, t.name AS tag_name,
                pt.up_votes, pt.down_votes
         FROM place_tags pt
         JOIN tags t ON t.id = pt.tag_id
         WHERE pt.place_id = ANY($1)
         ORDER BY (pt.up_votes - pt.down_votes) DESC, t.name",
    )
    .bind(place_ids)
    .fetch_all(&mut *conn)
    .await
    .map_err(infrastructure_error)
}

async fn with_tags(
    conn: &mut PgConnection,
    places: Vec<Place>,
) -> Result<Vec<PlaceWithTags>, DomainError> {
    let ids: Vec<Uuid> = places.iter().map(|p| p.id).collect();
    let mut grouped: HashMap<Uuid, Vec<PlaceTagSummary>> = HashMap::new();
    for summary in tags_for(conn, &ids).await? {
        grouped.entry(summary.place_id).or_default().push(summary);
    }

    Ok(places
        .into_iter()
        .map(|place| {
            let tags = grouped.remove(&place.id).unwrap_or_default();
            PlaceWithTags::new(place, tags)
        })
        .collect())
}

async fn single_with_tags(
    conn: &mut PgConnection,
    place: Option<Place>,
) -> Result<Option<PlaceWithTags>, DomainError> {
    match place {
        Some(place) => Ok(with_tags(conn, vec![place]).await?.pop()),
        None => Ok(None),
    }
}

#[async_trait]
impl PlaceRepository for SqlxPlaceRepository {
    async fn resolve(&self, lookup: &PlaceLookup) -> Result<Option<PlaceWithTags>, DomainError> {
        let mut conn = self.pool.acquire().await.map_err(infrastructure_error)?;
        let place = resolve_in(&mut conn, lookup).await?;
        single_with_tags(&mut conn, place).await
    }

    #[instrument(skip(self, place), fields(place_id = %place.place_id, tags = tag_ids.len()))]
    async fn submit(
        &self,
        place: &NewPlace,
        tag_ids: &[Uuid],
        added_by: Uuid,
    ) -> Result<PlaceWithTags, DomainError> {
        let mut tx = self.pool.begin().await.map_err(infrastructure_error)?;

        let resolved = resolve_in(&mut tx, &place.lookup()).await?;
        let stored = match single_with_tags(&mut tx, resolved).await? {
            Some(existing) => {
                if tag_ids.iter().any(|tag_id| existing.has_tag(*tag_id)) {
                    return Err(DomainError::Conflict(
                        "One or more tags already exist for this place.".into(),
                    ));
                }

                debug!(id = %existing.place.id, "refreshing resolved place");
                sqlx::query_as::<_, Place>(&format!(
                    "UPDATE places AS p SET
                         place_id = $2, name = $3, address = $4, lat = $5, lng = $6,
                         phone = $7, website = $8, maps_url = $9, review_value = $10,
                         review_amount = $11,
                         location = ST_SetSRID(ST_MakePoint($6, $5), 4326)::geography,
                         updated_at = NOW()
                     WHERE p.id = $1
                     RETURNING {PLACE_COLUMNS}"
                ))
                .bind(existing.place.id)
                .bind(&place.place_id)
                .bind(&place.name)
                .bind(&place.address)
                .bind(place.coordinates.lat)
                .bind(place.coordinates.lng)
                .bind(&place.phone)
                .bind(&place.website)
                .bind(&place.maps_url)
                .bind(place.review_value)
                .bind(place.review_amount)
                .fetch_one(&mut *tx)
                .await
                .map_err(infrastructure_error)?
            }
            None => sqlx::query_as::<_, Place>(&format!(
                "INSERT INTO places AS p (
                     id, place_id, name, category, address, city, country, country_code,
                     lat, lng, phone, website, maps_url, review_value, review_amount,
                     added_by_id, location
                 ) VALUES (
                     $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                     ST_SetSRID(ST_MakePoint($10, $9), 4326)::geography
                 )
                 RETURNING {PLACE_COLUMNS}"
            ))
            .bind(Uuid::now_v7())
            .bind(&place.place_id)
            .bind(&place.name)
            .bind(&place.category)
            .bind(&place.address)
            .bind(&place.city)
            .bind(&place.country)
            .bind(&place.country_code)
            .bind(place.coordinates.lat)
            .bind(place.coordinates.lng)
            .bind(&place.phone)
            .bind(&place.website)
            .bind(&place.maps_url)
            .bind(place.review_value)
            .bind(place.review_amount)
            .bind(added_by)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Conflict("Place already exists.".into())
                } else {
                    infrastructure_error(e)
                }
            })?,
        };

        for tag_id in tag_ids {
            sqlx::query(
                "INSERT INTO place_tags (id, place_id, tag_id, up_votes, down_votes)
                 VALUES ($1, $2, $3, 0, 0)",
            )
            .bind(Uuid::now_v7())
            .bind(stored.id)
            .bind(tag_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DomainError::Conflict("One or more tags already exist for this place.".into())
                } else {
                    infrastructure_error(e)
                }
            })?;
        }

        let result = single_with_tags(&mut tx, Some(stored))
            .await?
            .ok_or_else(|| DomainError::InfrastructureError("submitted place vanished".into()))?;

        tx.commit().await.map_err(infrastructure_error)?;

        info!(id = %result.place.id, tags = result.tags.len(), "place submitted");
        Ok(result)
    }

    async fn list_ranked(
        &self,
        tag_name: &str,
        scope: &Scope,
        page: PageRequest,
    ) -> Result<Vec<RankedPlace>, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PLACE_COLUMNS}, (pt.up_votes - pt.down_votes)::bigint AS score
             FROM places p
             JOIN place_tags pt ON pt.place_id = p.id
             JOIN tags t ON t.id = pt.tag_id
             WHERE t.name = "
        ));
        qb.push_bind(tag_name.to_string());
        push_scope_filter(&mut qb, scope);
        qb.push(" ORDER BY score DESC, pt.up_votes DESC, p.name LIMIT ");
        qb.push_bind(page.limit() + 1);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());

        let mut conn = self.pool.acquire().await.map_err(infrastructure_error)?;
        let rows = qb
            .build_query_as::<RankedRow>()
            .fetch_all(&mut *conn)
            .await
            .map_err(infrastructure_error)?;

        let scores: Vec<i64> = rows.iter().map(|r| r.score).collect();
        let places = rows.into_iter().map(|r| r.place).collect();
        let entries = with_tags(&mut conn, places).await?;

        Ok(entries
            .into_iter()
            .zip(scores)
            .map(|(entry, score)| RankedPlace { entry, score })
            .collect())
    }
}
