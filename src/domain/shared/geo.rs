//! Geographic primitives shared by place resolution and scoped listings.

use super::errors::DomainError;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Two stored places closer than this on both axes (in degrees) are the same place
/// when their addresses also match.
pub const COORD_TOLERANCE: f64 = 0.0001;

/// Radius of the "city" scope around the caller's coordinates.
pub const CITY_RADIUS_METERS: f64 = 50_000.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, PartialEq)]
#[ts(export)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Result<Self, DomainError> {
        if !Self::is_valid(lat, lng) {
            return Err(DomainError::ValidationError(
                "Invalid latitude or longitude values.".into(),
            ));
        }
        Ok(Self { lat, lng })
    }

    pub fn is_valid(lat: f64, lng: f64) -> bool {
        lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng)
    }

    /// Inclusive `(min_lat, max_lat, min_lng, max_lng)` window around this point.
    pub fn tolerance_window(&self) -> (f64, f64, f64, f64) {
        (
            self.lat - COORD_TOLERANCE,
            self.lat + COORD_TOLERANCE,
            self.lng - COORD_TOLERANCE,
            self.lng + COORD_TOLERANCE,
        )
    }
}

/// Geography a leaderboard or tag listing is restricted to.
#[derive(Debug, Clone, PartialEq)]
pub enum Scope {
    World,
    Country { country_code: String },
    City {
        country_code: String,
        center: Coordinates,
    },
}

impl Scope {
    pub fn parse(
        kind: Option<&str>,
        country_code: Option<&str>,
        lat: Option<f64>,
        lng: Option<f64>,
    ) -> Result<Self, DomainError> {
        match kind.map(str::trim) {
            Some("world") => Ok(Scope::World),
            Some("country") => Ok(Scope::Country {
                country_code: normalize_country_code(country_code).ok_or_else(|| {
                    DomainError::ValidationError(
                        "Country code is required with country scope.".into(),
                    )
                })?,
            }),
            Some("city") => {
                let country_code = normalize_country_code(country_code).ok_or_else(|| {
                    DomainError::ValidationError("Country code is required with city scope.".into())
                })?;
                let center = match (lat, lng) {
                    (Some(lat), Some(lng)) if Coordinates::is_valid(lat, lng) => {
                        Coordinates { lat, lng }
                    }
                    _ => {
                        return Err(DomainError::ValidationError(
                            "Latitude/Longitude is invalid or missing which is required in city scope."
                                .into(),
                        ));
                    }
                };
                Ok(Scope::City {
                    country_code,
                    center,
                })
            }
            _ => Err(DomainError::ValidationError("Invalid scope.".into())),
        }
    }
}

fn normalize_country_code(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|c| c.len() == 2 && c.chars().all(|ch| ch.is_ascii_alphabetic()))
        .map(str::to_uppercase)
}
