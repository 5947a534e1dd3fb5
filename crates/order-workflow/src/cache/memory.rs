//! In-process [`OrderCache`] backed by `moka`.
//!
//! Views are stored as their JSON encoding, the same representation an external
//! cache would hold. Entries have no TTL; they are only replaced by later writes
//! or evicted when the cache reaches its capacity.

use super::{cache_key, CacheError, OrderCache};
use crate::model::{OrderId, OrderView};
use async_trait::async_trait;
use moka::future::Cache;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct MokaOrderCache {
    cache: Cache<String, String>,
}

impl MokaOrderCache {
    pub fn new(capacity: u64) -> Self {
        Self {
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }
}

#[async_trait]
impl OrderCache for MokaOrderCache {
    async fn get(&self, id: OrderId) -> Result<Option<OrderView>, CacheError> {
        let key = cache_key(id);
        let Some(raw) = self.cache.get(&key).await else {
            debug!(%key, "Cache miss");
            return Ok(None);
        };

        match serde_json::from_str::<OrderView>(&raw) {
            Ok(view) => {
                debug!(%key, "Cache hit");
                Ok(Some(view))
            }
            Err(e) => {
                // Treat a corrupt entry as absent and drop it
                warn!(%key, error = %e, "Discarding undecodable cache entry");
                self.cache.invalidate(&key).await;
                Ok(None)
            }
        }
    }

    async fn put(&self, view: &OrderView) -> Result<(), CacheError> {
        let key = cache_key(view.order_id);
        let raw = serde_json::to_string(view)?;
        self.cache.insert(key, raw).await;
        Ok(())
    }
}
