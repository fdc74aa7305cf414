//! TTL cache for the spot-price message.

use std::future::Future;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::error::Result;

/// Returned when the price fetch fails and no valid entry exists.
pub const PRICE_UNAVAILABLE: &str = "Price data unavailable.";

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    fetched_at: Instant,
}

/// Memoizes one fetched string for a fixed duration.
///
/// The entry is guarded by an async mutex that is held across the refresh,
/// so concurrent callers of an expired cache trigger a single fetch.
pub struct PriceCache {
    ttl: Duration,
    entry: Mutex<Option<CacheEntry>>,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entry: Mutex::new(None),
        }
    }

    /// Return the cached value if it is younger than the TTL, otherwise run
    /// `fetch` and store the result.
    ///
    /// A failed fetch returns [`PRICE_UNAVAILABLE`] and leaves the entry
    /// untouched; failures are never cached.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> String
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        self.get_or_fetch_at(Instant::now(), fetch).await
    }

    async fn get_or_fetch_at<F, Fut>(&self, now: Instant, fetch: F) -> String
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let mut entry = self.entry.lock().await;

        if let Some(cached) = entry.as_ref() {
            if now.duration_since(cached.fetched_at) < self.ttl {
                tracing::debug!("Using cached prices");
                return cached.value.clone();
            }
        }

        match fetch().await {
            Ok(value) => {
                *entry = Some(CacheEntry {
                    value: value.clone(),
                    fetched_at: now,
                });
                tracing::info!("Prices refreshed");
                value
            }
            Err(e) => {
                tracing::warn!("Price fetch failed: {}", e);
                PRICE_UNAVAILABLE.to_string()
            }
        }
    }
}
