use anyhow::Result;
use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::{future::Future, time::Duration};
use tracing::{debug, error, warn};

/// Lock TTL in seconds; the lock expires on its own if the holder dies.
const FILL_LOCK_TTL_SECONDS: u64 = 10;
const FILL_WAIT_INTERVAL_MS: u64 = 50;
const FILL_WAIT_ATTEMPTS: u32 = 40;

/// JSON values in Redis with a TTL. Redis failures degrade to a direct fetch.
pub struct RedisCache {
    client: Client,
}

impl RedisCache {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;
        value
            .map(|v| serde_json::from_str(&v))
            .transpose()
            .map_err(Into::into)
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl: u64) -> Result<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)?;
        let _: () = conn.set_ex(key, json, ttl).await?;
        Ok(())
    }

    /// Read-through lookup. On a miss only the holder of a short `SET NX` lock runs
    /// `fetch_fn`; concurrent callers poll for the filled value and fall back to their
    /// own fetch when it does not appear. Errors from `fetch_fn` are never cached.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: &str, ttl: u64, fetch_fn: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match self.get::<T>(key).await {
            Ok(Some(hit)) => {
                debug!(key, "cache hit");
                return Ok(hit);
            }
            Ok(None) => debug!(key, "cache miss"),
            Err(e) => {
                error!(key, error = %e, "cache read failed, fetching from source");
                return fetch_fn().await;
            }
        }

        let lock_key = format!("{}:lock", key);
        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(c) => c,
            Err(e) => {
                error!(key, error = %e, "cache connection failed, fetching from source");
                return fetch_fn().await;
            }
        };

        let lock_acquired = redis::cmd("SET")
            .arg(&lock_key)
            .arg("1")
            .arg("NX")
            .arg("EX")
            .arg(FILL_LOCK_TTL_SECONDS)
            .query_async::<Option<String>>(&mut conn)
            .await
            .map(|v| v.is_some())
            .unwrap_or_else(|e| {
                warn!(key, error = %e, "cache lock failed");
                false
            });

        if lock_acquired {
            let result = fetch_fn().await;
            if let Ok(value) = &result {
                if let Err(e) = self.set(key, value, ttl).await {
                    error!(key, error = %e, "cache write failed");
                }
            }
            if let Err(e) = conn.del::<_, ()>(&lock_key).await {
                warn!(key, error = %e, "cache lock release failed, waiting for expiry");
            }
            return result;
        }

        for _ in 0..FILL_WAIT_ATTEMPTS {
            tokio::time::sleep(Duration::from_millis(FILL_WAIT_INTERVAL_MS)).await;
            match self.get::<T>(key).await {
                Ok(Some(filled)) => return Ok(filled),
                Ok(None) => continue,
                Err(e) => {
                    error!(key, error = %e, "cache read failed while waiting for fill");
                    break;
                }
            }
        }

        warn!(key, "cache fill did not complete in time, fetching from source");
        fetch_fn().await
    }
}
