//! Freshness-checked price store
//!
//! Provides a `TransparentCache` that remembers prices fetched from the
//! underlying service so repeated lookups within the freshness window don't
//! have to wait on it. An entry is only ever written after a successful
//! fetch; failures leave the store exactly as it was, so a stale entry stays
//! in place and the next lookup retries the service.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::service::{BoxError, PriceService};

/// A price remembered from a successful fetch, with the time it was stored.
#[derive(Debug, Clone, Copy)]
struct CachedPrice {
    value: f64,
    cached_at: DateTime<Utc>,
}

/// Errors that can occur when looking up a price through the cache
#[derive(Debug, Error)]
pub enum CacheError {
    /// The underlying price service failed. The original cause is preserved;
    /// the cache does not retry.
    #[error("getting price from service for {item_code:?}")]
    ServiceFetch {
        /// The item code whose fetch failed
        item_code: String,
        /// The service's own error, unchanged
        #[source]
        source: BoxError,
    },
}

/// A cache that wraps the actual price service
///
/// Remembers prices we ask for so we don't have to wait on every call, but
/// only returns a price younger than the freshness window so we don't serve
/// stale data. Cloning is cheap and every clone shares the same store, which
/// lets batch fetches and independent callers work against one instance.
///
/// The store only grows: entries are overwritten on refresh, never removed.
pub struct TransparentCache<S> {
    inner: Arc<CacheInner<S>>,
}

struct CacheInner<S> {
    service: S,
    max_age: Duration,
    prices: RwLock<HashMap<String, CachedPrice>>,
}

impl<S> Clone for TransparentCache<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> TransparentCache<S> {
    /// Creates a new cache in front of `service`.
    ///
    /// `max_age` is the freshness window: a cached price older than or
    /// exactly as old as `max_age` is treated as a miss. Both arguments are
    /// fixed for the cache's lifetime.
    pub fn new(service: S, max_age: Duration) -> Self {
        Self {
            inner: Arc::new(CacheInner {
                service,
                max_age,
                prices: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Number of item codes currently held in the store, fresh or stale.
    pub async fn len(&self) -> usize {
        self.inner.prices.read().await.len()
    }

    /// Whether the store holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.inner.prices.read().await.is_empty()
    }
}

impl<S: PriceService> TransparentCache<S> {
    /// Gets the price for the item, either from the cache or the actual
    /// service if it was not cached or too old.
    ///
    /// On a miss the service is called outside the store lock, so unrelated
    /// concurrent lookups are not serialized behind it. A successful fetch
    /// overwrites any prior entry for the code; a failed fetch writes nothing
    /// and returns [`CacheError::ServiceFetch`] wrapping the cause.
    pub async fn get_price_for(&self, item_code: &str) -> Result<f64, CacheError> {
        if let Some(value) = self.fresh_price(item_code).await {
            debug!(item_code, value, "cache hit");
            return Ok(value);
        }

        debug!(item_code, "cache miss, fetching from service");
        let value = self
            .inner
            .service
            .price_for(item_code)
            .await
            .map_err(|source| {
                warn!(item_code, error = %source, "price fetch failed");
                CacheError::ServiceFetch {
                    item_code: item_code.to_string(),
                    source,
                }
            })?;

        let mut prices = self.inner.prices.write().await;
        prices.insert(
            item_code.to_string(),
            CachedPrice {
                value,
                cached_at: Utc::now(),
            },
        );
        Ok(value)
    }

    /// Returns the cached price if an entry exists and is still fresh.
    ///
    /// Freshness is strict: an entry aged exactly `max_age` is stale, and a
    /// zero window means every read is a miss.
    async fn fresh_price(&self, item_code: &str) -> Option<f64> {
        let prices = self.inner.prices.read().await;
        let entry = prices.get(item_code)?;
        let age = Utc::now().signed_duration_since(entry.cached_at);
        (age < self.inner.max_age).then_some(entry.value)
    }
}
