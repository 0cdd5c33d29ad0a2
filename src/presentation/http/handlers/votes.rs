use crate::{
    application::cast_vote::{dto::CastVoteRequest, use_case::CastVoteUseCase},
    domain::vote::repository::VoteReceipt,
    presentation::http::{
        errors::AppError, middleware::user::decode_required_user_claims, response::ApiResponse,
        state::AppState,
    },
};
use axum::{Json, extract::State, extract::rejection::JsonRejection, http::HeaderMap};

pub async fn cast_vote(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CastVoteRequest>, JsonRejection>,
) -> Result<ApiResponse<VoteReceipt>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let Json(request) = payload?;

    let receipt = CastVoteUseCase::new(state.vote_repo.clone())
        .execute(&claims.sub, request)
        .await?;

    Ok(ApiResponse::ok("Registered vote successfully.", receipt))
}
