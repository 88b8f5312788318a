//! Read-through price cache library
//!
//! Wraps a slow, fallible price lookup service behind an in-memory cache.
//! Cached prices are served without touching the service as long as they are
//! younger than a configured freshness window; stale or missing prices are
//! refreshed transparently. Batches of item codes are fetched concurrently so
//! total latency approaches the slowest single lookup rather than the sum.
//!
//! ```ignore
//! let cache = TransparentCache::new(store_api, Duration::seconds(30));
//!
//! // Single item: hit if fresh, otherwise fetched and cached.
//! let price = cache.get_price_for("APPLE").await?;
//!
//! // Batch: one concurrent fetch per code, first error wins.
//! let prices = cache.get_prices_for(["APPLE", "BANANA"]).await?;
//! ```

pub mod cache;
pub mod service;

pub use cache::{CacheError, TransparentCache};
pub use service::{BoxError, PriceService};
