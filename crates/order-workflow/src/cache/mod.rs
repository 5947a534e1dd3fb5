//! # Order Cache
//!
//! A best-effort, read-through cache of [`OrderView`]s keyed by `order:<id>`.
//!
//! The cache is a hint, never a source of truth: entries may be stale or missing at
//! any time, and the workflow engine logs and swallows every [`CacheError`]. It is
//! injected into the engine as an `Arc<dyn OrderCache>`, so tests can substitute
//! their own implementation (for example one that always fails).

pub mod memory;

pub use memory::MokaOrderCache;

use crate::model::{OrderId, OrderView};
use async_trait::async_trait;
use thiserror::Error;

/// Errors a cache backend may report.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Storage contract for cached order views.
#[async_trait]
pub trait OrderCache: Send + Sync {
    /// Returns the cached view, or `None` on a miss. A miss is not an error.
    async fn get(&self, id: OrderId) -> Result<Option<OrderView>, CacheError>;

    /// Stores `view` under its order id, replacing any previous entry.
    async fn put(&self, view: &OrderView) -> Result<(), CacheError>;
}

/// The key an order's view is stored under.
pub fn cache_key(id: OrderId) -> String {
    format!("order:{}", id.0)
}

/// Cache used when caching is disabled: stores nothing, always misses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOrderCache;

#[async_trait]
impl OrderCache for NoopOrderCache {
    async fn get(&self, _id: OrderId) -> Result<Option<OrderView>, CacheError> {
        Ok(None)
    }

    async fn put(&self, _view: &OrderView) -> Result<(), CacheError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderStatus;
    use chrono::Utc;

    #[test]
    fn test_cache_key_format() {
        assert_eq!(cache_key(OrderId(42)), "order:42");
    }

    #[tokio::test]
    async fn test_noop_cache_always_misses() {
        let cache = NoopOrderCache;
        let view = OrderView {
            order_id: OrderId(1),
            owner_identity: "alice".into(),
            status: OrderStatus::Pending,
            total_price: 0,
            ordered_at: Utc::now(),
            line_items: vec![],
        };
        cache.put(&view).await.unwrap();
        assert!(cache.get(OrderId(1)).await.unwrap().is_none());
    }
}
