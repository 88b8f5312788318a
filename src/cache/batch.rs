//! Concurrent batch fetching
//!
//! Fetching several items one after another would cost the sum of the
//! individual lookup latencies. Instead, each code in a batch gets its own
//! spawned task publishing its outcome to a channel sized to the batch, and
//! the aggregator consumes exactly that many outcomes in completion order.
//! The first error observed is returned immediately; tasks still in flight
//! are not cancelled, so their store writes still land even though their
//! outcomes go unread.

use tokio::sync::mpsc;
use tracing::debug;

use super::store::{CacheError, TransparentCache};
use crate::service::PriceService;

impl<S> TransparentCache<S>
where
    S: PriceService + 'static,
{
    /// Gets the prices for several items at once; some might be found in the
    /// cache, others might not.
    ///
    /// One independent fetch is launched per code, duplicates included, so
    /// total latency is bounded by the slowest single lookup. Returned prices
    /// are ordered by completion, not by the order codes were submitted.
    ///
    /// On failure the first error observed is returned and prices that had
    /// already completed are discarded; callers cannot distinguish how many
    /// of the remaining fetches succeeded. This is a deliberate tradeoff
    /// favoring simplicity and latency over partial results. In-flight
    /// fetches keep running and still update the store.
    pub async fn get_prices_for<I, T>(&self, item_codes: I) -> Result<Vec<f64>, CacheError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let codes: Vec<String> = item_codes.into_iter().map(Into::into).collect();
        let n = codes.len();

        // Sized to the batch so publishing never blocks, even once the
        // aggregator has returned early and stopped reading.
        let (tx, mut rx) = mpsc::channel(n.max(1));
        for code in codes {
            let cache = self.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = cache.get_price_for(&code).await;
                // The receiver may already be gone after an earlier error.
                let _ = tx.send(outcome).await;
            });
        }
        drop(tx);

        // Every task sends exactly once and then drops its sender, so the
        // channel yields one outcome per code before closing.
        let mut prices = Vec::with_capacity(n);
        while let Some(outcome) = rx.recv().await {
            match outcome {
                Ok(value) => prices.push(value),
                Err(err) => return Err(err),
            }
        }
        debug!(count = prices.len(), "batch fetch complete");
        Ok(prices)
    }
}
