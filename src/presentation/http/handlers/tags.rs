use crate::{
    application::{
        create_tag::{dto::CreateTagRequest, use_case::CreateTagUseCase},
        list_tags::{
            dto::{ListTagsQuery, TagSuggestionQuery},
            use_case::ListTagsUseCase,
        },
    },
    domain::tag::entity::{Tag, TagWithPlaceCount},
    presentation::http::{
        errors::AppError, middleware::user::decode_required_user_claims, response::ApiResponse,
        state::AppState,
    },
};
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::HeaderMap,
};

pub async fn create_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateTagRequest>, JsonRejection>,
) -> Result<ApiResponse<Tag>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let Json(request) = payload?;

    let tag = CreateTagUseCase::new(state.tag_repo.clone(), state.user_repo.clone())
        .execute(&claims.sub, request)
        .await?;

    Ok(ApiResponse::created("Successfully created tag.", tag))
}

pub async fn list_tags(
    State(state): State<AppState>,
    query: Result<Query<ListTagsQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<TagWithPlaceCount>>, AppError> {
    let Query(query) = query?;
    let tags = ListTagsUseCase::new(state.tag_repo.clone())
        .top(query)
        .await?;
    Ok(ApiResponse::ok("Successfully fetched tags.", tags))
}

pub async fn suggest_tags(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<TagSuggestionQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<Tag>>, AppError> {
    decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let Query(query) = query?;
    let tags = ListTagsUseCase::new(state.tag_repo.clone())
        .suggest(query)
        .await?;
    Ok(ApiResponse::ok("Successfully fetched suggestions.", tags))
}
