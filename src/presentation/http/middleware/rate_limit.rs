use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use redis::AsyncCommands;

use crate::presentation::http::{errors::AppError, state::AppState};

const WINDOW_SECONDS: i64 = 86_400;

fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|s| !s.is_empty())
        })
        .map(str::to_string)
}

/// Resolves the address a write is charged to. Proxy headers are only
/// honoured when `trust_proxy_headers` is set; otherwise the socket peer wins.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy_headers: bool) -> String {
    let forwarded = if trust_proxy_headers {
        forwarded_ip(headers)
    } else {
        None
    };
    forwarded
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Daily per-IP budget for write endpoints, counted in Redis.
/// A zero budget disables the limit.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let limit = state.config.rate_limit_writes_per_ip;
    if limit == 0 {
        return Ok(next.run(request).await);
    }

    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), peer, state.config.trust_proxy_headers);
    let date = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let key = format!("rate_limit:writes:{}:{}", ip, date);

    let mut conn = state.redis.get_multiplexed_async_connection().await?;
    let count: u32 = conn.incr(&key, 1_u32).await?;
    if count == 1 {
        let _: () = conn.expire(&key, WINDOW_SECONDS).await?;
    }

    if count > limit {
        tracing::warn!(%ip, count, "write rate limit exceeded");
        return Err(AppError::RateLimited);
    }

    Ok(next.run(request).await)
}
