use axum::extract::DefaultBodyLimit;
use http::{HeaderValue, Method, header};
use placerank::{
    config::Config,
    infrastructure::{
        cache::redis_cache::RedisCache,
        database::pool::{create_pool, run_migrations},
        places::{cached::CachedPlacesProvider, google_places::GooglePlacesClient},
        repositories::{
            sqlx_place_repository::SqlxPlaceRepository, sqlx_tag_repository::SqlxTagRepository,
            sqlx_user_repository::SqlxUserRepository, sqlx_vote_repository::SqlxVoteRepository,
        },
    },
    presentation::http::{routes::create_router, state::AppState},
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

const MAX_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| {
            tracing_subscriber::EnvFilter::try_new("info,placerank=debug,tower_http=debug")
        })
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = Config::from_env()?;
    let db = create_pool(&config.database_url, config.database_max_connections).await?;
    run_migrations(&db, config.ignore_missing_migrations).await?;

    let redis = redis::Client::open(config.redis_url.clone())?;
    let cache = Arc::new(RedisCache::new(redis.clone()));

    if config.places_api_key.is_none() {
        tracing::warn!("PLACES_API_KEY is not set; place lookups will fail");
    }
    let google = Arc::new(GooglePlacesClient::new(
        config.places_api_base_url.clone(),
        config.places_api_key.clone(),
    )?);
    let places_provider = Arc::new(CachedPlacesProvider::new(
        google,
        cache,
        config.place_details_cache_ttl_seconds,
    ));

    let state = AppState {
        db: db.clone(),
        redis,
        config: config.clone(),
        place_repo: Arc::new(SqlxPlaceRepository::new(db.clone())),
        tag_repo: Arc::new(SqlxTagRepository::new(db.clone())),
        user_repo: Arc::new(SqlxUserRepository::new(db.clone())),
        vote_repo: Arc::new(SqlxVoteRepository::new(db.clone())),
        places_provider,
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600));
    let cors = if cfg!(debug_assertions) && config.allowed_origins.is_empty() {
        cors.allow_origin(tower_http::cors::Any)
    } else {
        let origins = config
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                    None
                }
            })
            .collect::<Vec<_>>();
        cors.allow_origin(AllowOrigin::list(origins))
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("placerank listening on {}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Ctrl+C received, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("SIGTERM received, initiating graceful shutdown");
        }
    }
}
