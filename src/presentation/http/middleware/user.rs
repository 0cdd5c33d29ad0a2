use axum::http::{HeaderMap, header};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{
    application::users::dto::SessionIdentity, presentation::http::errors::AppError,
};

/// Claims of a bearer token minted by the identity provider bridge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// External unique id of the user.
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub exp: usize,
}

impl From<UserClaims> for SessionIdentity {
    fn from(claims: UserClaims) -> Self {
        Self {
            unique_id: claims.sub,
            email: claims.email,
            name: claims.name,
        }
    }
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn decode_required_user_claims(
    headers: &HeaderMap,
    secret: &str,
) -> Result<UserClaims, AppError> {
    let token = extract_bearer_token(headers)
        .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;
    decode::<UserClaims>(
        &token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|d| d.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        AppError::Unauthorized("Unauthorized".to_string())
    })
}
