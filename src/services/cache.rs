use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::{de::DeserializeOwned, Serialize};

const KEY_PREFIX: &str = "edebai";

pub const CATEGORY_LIST_KEY: &str = "categories:list";
pub const CATEGORY_LIST_TTL: u64 = 300; // 5 minutes

/// Best-effort JSON cache on top of Redis.
///
/// Every failure (connection, decode) is treated as a miss so that callers
/// fall back to the database.
#[derive(Clone)]
pub struct CacheService {
    redis: ConnectionManager,
}

fn namespaced(key: &str) -> String {
    format!("{}:{}", KEY_PREFIX, key)
}

impl CacheService {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let mut conn = self.redis.clone();
        let raw: Option<String> = match conn.get(namespaced(key)).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("cache read failed for {}: {}", key, e);
                return None;
            }
        };
        raw.and_then(|s| serde_json::from_str(&s).ok())
    }

    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let Ok(json) = serde_json::to_string(value) else {
            return;
        };
        let mut conn = self.redis.clone();
        if let Err(e) = conn
            .set_ex::<_, _, ()>(namespaced(key), json, ttl_secs)
            .await
        {
            tracing::debug!("cache write failed for {}: {}", key, e);
        }
    }

    pub async fn invalidate(&self, key: &str) {
        let mut conn = self.redis.clone();
        let _: Result<(), _> = conn.del(namespaced(key)).await;
    }
}
