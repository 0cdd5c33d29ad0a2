use super::{
    handlers::{health, places, tags, users, votes},
    middleware::{rate_limit::rate_limit_middleware, request_id::request_id_middleware},
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn create_router(state: AppState) -> Router {
    let write_routes = Router::new()
        .route("/api/v1/votes", post(votes::cast_vote))
        .route("/api/v1/tags", post(tags::create_tag))
        .route("/api/v1/places", post(places::add_place))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Leaderboards
        .route("/api/v1/places", get(places::list_places))
        .route("/api/v1/tags", get(tags::list_tags))
        .route("/api/v1/tags/suggestions", get(tags::suggest_tags))
        // Places provider
        .route("/api/v1/places/details", get(places::place_details))
        .route("/api/v1/places/suggestions", get(places::place_suggestions))
        // Users
        .route("/api/v1/auth/session", post(users::sync_session))
        .route("/api/v1/me", get(users::me))
        .merge(write_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
