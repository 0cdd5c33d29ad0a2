use super::traits::{PlaceSuggestion, PlacesProvider, ProviderPlace, SuggestionQuery};
use crate::infrastructure::cache::redis_cache::RedisCache;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("place {0} is unknown to the provider")]
struct UnknownPlace(String);

/// Caches provider place details in Redis. Autocomplete is passed through untouched
/// because its inputs are per-keystroke.
pub struct CachedPlacesProvider {
    inner: Arc<dyn PlacesProvider>,
    cache: Arc<RedisCache>,
    ttl_seconds: u64,
}

impl CachedPlacesProvider {
    pub fn new(inner: Arc<dyn PlacesProvider>, cache: Arc<RedisCache>, ttl_seconds: u64) -> Self {
        Self {
            inner,
            cache,
            ttl_seconds,
        }
    }
}

#[async_trait]
impl PlacesProvider for CachedPlacesProvider {
    async fn place_details(&self, place_id: &str) -> anyhow::Result<Option<ProviderPlace>> {
        let key = format!("place_details:{}", place_id);
        let inner = self.inner.clone();
        let id = place_id.to_string();

        let fetched = self
            .cache
            .get_or_fetch(&key, self.ttl_seconds, move || async move {
                let place: anyhow::Result<ProviderPlace> = match inner.place_details(&id).await? {
                    Some(place) => Ok(place),
                    None => Err(UnknownPlace(id).into()),
                };
                place
            })
            .await;

        match fetched {
            Ok(place) => Ok(Some(place)),
            Err(e) if e.is::<UnknownPlace>() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn autocomplete(&self, query: &SuggestionQuery) -> anyhow::Result<Vec<PlaceSuggestion>> {
        self.inner.autocomplete(query).await
    }
}
