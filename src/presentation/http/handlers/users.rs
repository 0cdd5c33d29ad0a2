use crate::{
    application::users::use_case::UsersUseCase,
    domain::user::entity::{User, UserWithVotes},
    presentation::http::{
        errors::AppError, middleware::user::decode_required_user_claims, response::ApiResponse,
        state::AppState,
    },
};
use axum::{extract::State, http::HeaderMap};

/// Called by the sign-in flow after the identity provider accepted the user.
pub async fn sync_session(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiResponse<User>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let user = UsersUseCase::new(state.user_repo.clone(), state.vote_repo.clone())
        .sync_session(claims.into())
        .await?;
    Ok(ApiResponse::ok("Signed in.", user))
}

pub async fn me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<ApiResponse<UserWithVotes>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let user = UsersUseCase::new(state.user_repo.clone(), state.vote_repo.clone())
        .me(&claims.sub)
        .await?;
    Ok(ApiResponse::ok("Successfully fetched user data.", user))
}
