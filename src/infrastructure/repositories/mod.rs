pub mod sqlx_place_repository;
pub mod sqlx_tag_repository;
pub mod sqlx_user_repository;
pub mod sqlx_vote_repository;

use crate::domain::shared::{
    errors::DomainError,
    geo::{CITY_RADIUS_METERS, Scope},
};
use sqlx::{Postgres, QueryBuilder};

pub(crate) fn infrastructure_error(err: sqlx::Error) -> DomainError {
    DomainError::InfrastructureError(err.to_string())
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

/// Appends ` AND ...` conditions restricting the `places p` alias to `scope`.
pub(crate) fn push_scope_filter(qb: &mut QueryBuilder<'_, Postgres>, scope: &Scope) {
    match scope {
        Scope::World => {}
        Scope::Country { country_code } => {
            qb.push(" AND p.country_code = ");
            qb.push_bind(country_code.clone());
        }
        Scope::City {
            country_code,
            center,
        } => {
            qb.push(" AND p.country_code = ");
            qb.push_bind(country_code.clone());
            qb.push(" AND ST_DWithin(p.location, ST_SetSRID(ST_MakePoint(");
            qb.push_bind(center.lng);
            qb.push(", ");
            qb.push_bind(center.lat);
            qb.push("), 4326)::geography, ");
            qb.push_bind(CITY_RADIUS_METERS);
            qb.push(")");
        }
    }
}

/// Escapes `%`, `_` and `\` so user input matches literally inside an ILIKE pattern.
pub(crate) fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for ch in fragment.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
