use crate::{
    config::Config,
    domain::{
        place::repository::PlaceRepository, tag::repository::TagRepository,
        user::repository::UserRepository, vote::repository::VoteRepository,
    },
    infrastructure::places::traits::PlacesProvider,
};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub redis: redis::Client,
    pub config: Config,
    pub place_repo: Arc<dyn PlaceRepository>,
    pub tag_repo: Arc<dyn TagRepository>,
    pub user_repo: Arc<dyn UserRepository>,
    pub vote_repo: Arc<dyn VoteRepository>,
    pub places_provider: Arc<dyn PlacesProvider>,
}
