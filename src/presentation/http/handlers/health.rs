use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    cache: &'static str,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => "up",
        Err(e) => {
            tracing::error!("Health check failed: Database unreachable: {}", e);
            "down"
        }
    };

    let cache = match state.redis.get_multiplexed_async_connection().await {
        Ok(mut conn) => {
            let pong: redis::RedisResult<String> = redis::cmd("PING").query_async(&mut conn).await;
            match pong {
                Ok(_) => "up",
                Err(e) => {
                    tracing::warn!("Health check: Redis command failed: {}", e);
                    "down"
                }
            }
        }
        Err(e) => {
            tracing::warn!("Health check: Redis unreachable: {}", e);
            "down"
        }
    };

    // Redis only backs caching and rate limiting; the API still serves without it.
    let (status, code) = if database == "up" {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        code,
        Json(HealthResponse {
            status,
            database,
            cache,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
