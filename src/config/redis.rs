use redis::aio::ConnectionManager;
use tokio::time::{timeout, Duration};

/// Connect to `REDIS_URL` when it is configured.
///
/// Returns `Ok(None)` when the variable is absent so the site runs without a
/// cache; a configured but unreachable server is an error the caller logs.
pub async fn connect_redis() -> anyhow::Result<Option<ConnectionManager>> {
    let Some(redis_url) = std::env::var("REDIS_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
    else {
        return Ok(None);
    };

    let client = redis::Client::open(redis_url)?;
    let manager = timeout(Duration::from_secs(5), ConnectionManager::new(client))
        .await
        .map_err(|_| anyhow::anyhow!("Redis connection timeout after 5 seconds"))??;

    Ok(Some(manager))
}
