//! Underlying price service contract
//!
//! The cache is built on top of an injected collaborator exposing a single
//! lookup operation. Calls to this service are expensive (they take time),
//! which is the whole reason the cache exists. The cache never retries a
//! failed lookup and never inspects the error beyond wrapping it.

use std::sync::Arc;

use async_trait::async_trait;

/// Opaque error type reported by price service implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A service that can look up the current price for an item.
#[async_trait]
pub trait PriceService: Send + Sync {
    /// Fetches the price for the given item code.
    ///
    /// May be slow. Returns the price on success, or an implementation-defined
    /// error on failure.
    async fn price_for(&self, item_code: &str) -> Result<f64, BoxError>;
}

#[async_trait]
impl<S> PriceService for Arc<S>
where
    S: PriceService + ?Sized,
{
    async fn price_for(&self, item_code: &str) -> Result<f64, BoxError> {
        (**self).price_for(item_code).await
    }
}
