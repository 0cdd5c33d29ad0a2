use crate::domain::shared::geo::Coordinates;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A physical location submitted by a user from the places provider.
///
/// # Invariants
/// - `place_id` (the provider's identifier) is unique.
/// - No two places share a case-insensitive address with coordinates inside
///   [`COORD_TOLERANCE`](crate::domain::shared::geo::COORD_TOLERANCE) of each other;
///   submissions resolve onto the existing row instead.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow)]
#[ts(export)]
pub struct Place {
    pub id: Uuid,
    /// Identifier assigned by the places provider.
    pub place_id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub country_code: String,
    pub lat: f64,
    pub lng: f64,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub maps_url: String,
    /// Provider rating, not derived from votes.
    pub review_value: f64,
    pub review_amount: i32,
    pub added_by_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Place {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// The association of one place with one tag; the unit that accumulates votes.
///
/// `up_votes` / `down_votes` always equal the number of vote rows on this pairing
/// with the matching direction, outside an in-flight vote transaction.
#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow, PartialEq, Eq)]
#[ts(export)]
pub struct PlaceTag {
    pub id: Uuid,
    pub place_id: Uuid,
    pub tag_id: Uuid,
    pub up_votes: i32,
    pub down_votes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, sqlx::FromRow, PartialEq, Eq)]
#[ts(export)]
pub struct PlaceTagSummary {
    pub place_tag_id: Uuid,
    pub place_id: Uuid,
    pub tag_id: Uuid,
    pub tag_name: String,
    pub up_votes: i32,
    pub down_votes: i32,
}

/// A place with every tag attached to it.
///
/// Place-level totals are the sum of the per-tag counters and are never stored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PlaceWithTags {
    #[serde(flatten)]
    pub place: Place,
    pub total_up_votes: i64,
    pub total_down_votes: i64,
    pub tags: Vec<PlaceTagSummary>,
}

impl PlaceWithTags {
    pub fn new(place: Place, tags: Vec<PlaceTagSummary>) -> Self {
        let total_up_votes = tags.iter().map(|t| i64::from(t.up_votes)).sum();
        let total_down_votes = tags.iter().map(|t| i64::from(t.down_votes)).sum();
        Self {
            place,
            total_up_votes,
            total_down_votes,
            tags,
        }
    }

    pub fn has_tag(&self, tag_id: Uuid) -> bool {
        self.tags.iter().any(|t| t.tag_id == tag_id)
    }
}

/// Leaderboard entry: a place ranked by its score on one tag.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RankedPlace {
    #[serde(flatten)]
    pub entry: PlaceWithTags,
    /// `up_votes - down_votes` on the tag being ranked.
    pub score: i64,
}

/// Sanitized place data ready to be inserted or refreshed.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlace {
    pub place_id: String,
    pub name: String,
    pub category: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub country_code: String,
    pub coordinates: Coordinates,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub maps_url: String,
    pub review_value: f64,
    pub review_amount: i32,
}

impl NewPlace {
    pub fn lookup(&self) -> PlaceLookup {
        PlaceLookup {
            place_id: self.place_id.clone(),
            address: self.address.clone(),
            coordinates: self.coordinates,
        }
    }
}

/// Keys for the two-step place resolution: exact provider id, then address + proximity.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceLookup {
    pub place_id: String,
    pub address: String,
    pub coordinates: Coordinates,
}
