//! In-memory read-through cache
//!
//! This module provides a `TransparentCache` that fronts a [`PriceService`]
//! with a freshness-checked in-memory store and a concurrent batch fetch
//! operation. Entries are never evicted, only treated as stale once they are
//! older than the configured freshness window.
//!
//! [`PriceService`]: crate::service::PriceService

mod batch;
mod store;

pub use store::{CacheError, TransparentCache};
