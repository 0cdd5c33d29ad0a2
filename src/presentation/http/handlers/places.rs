use crate::{
    application::{
        add_place::{dto::AddPlaceRequest, use_case::AddPlaceUseCase},
        list_places::{dto::ListPlacesQuery, use_case::ListPlacesUseCase},
        place_lookup::{
            dto::{PlaceDetailsQuery, PlaceDetailsResponse, PlaceSuggestionsQuery},
            use_case::PlaceLookupUseCase,
        },
    },
    domain::{
        place::entity::{PlaceWithTags, RankedPlace},
        shared::pagination::PaginatedResponse,
    },
    infrastructure::places::traits::PlaceSuggestion,
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

pub async fn add_place(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<AddPlaceRequest>, JsonRejection>,
) -> Result<ApiResponse<PlaceWithTags>, AppError> {
    let claims = decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let Json(request) = payload?;

    let place = AddPlaceUseCase::new(
        state.place_repo.clone(),
        state.tag_repo.clone(),
        state.user_repo.clone(),
    )
    .execute(&claims.sub, request)
    .await?;

    Ok(ApiResponse::created(
        "Added place with provided tags successfully.",
        place,
    ))
}

pub async fn list_places(
    State(state): State<AppState>,
    query: Result<Query<ListPlacesQuery>, QueryRejection>,
) -> Result<ApiResponse<PaginatedResponse<RankedPlace>>, AppError> {
    let Query(query) = query?;
    let page = ListPlacesUseCase::new(state.place_repo.clone())
        .execute(query)
        .await?;
    Ok(ApiResponse::ok("Successfully fetched places.", page))
}

pub async fn place_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PlaceDetailsQuery>, QueryRejection>,
) -> Result<ApiResponse<PlaceDetailsResponse>, AppError> {
    decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let Query(query) = query?;
    let details = PlaceLookupUseCase::new(state.places_provider.clone(), state.place_repo.clone())
        .details(query)
        .await?;
    Ok(ApiResponse::ok("Successfully fetched place details.", details))
}

pub async fn place_suggestions(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<PlaceSuggestionsQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<PlaceSuggestion>>, AppError> {
    decode_required_user_claims(&headers, &state.config.jwt_secret)?;
    let Query(query) = query?;
    let suggestions =
        PlaceLookupUseCase::new(state.places_provider.clone(), state.place_repo.clone())
            .suggestions(query)
            .await?;
    Ok(ApiResponse::ok("Successfully fetched place suggestions.", suggestions))
}
