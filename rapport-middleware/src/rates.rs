//! One-shot rate table cache.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use rapport_core::{ExchangeRateLookup, Middleware, RapportError, RateTable};

/// Lookup that fetches the rate table for each base currency once.
///
/// The first caller triggers the upstream fetch; every concurrent or later
/// caller awaits and reads the same outcome. A failed fetch is kept as well
/// and is never retried by this wrapper.
pub struct RateTableCache {
    inner: Arc<dyn ExchangeRateLookup>,
    tables: Cache<String, Result<RateTable, RapportError>>,
}

impl RateTableCache {
    /// Wrap `inner`.
    pub fn new(inner: Arc<dyn ExchangeRateLookup>) -> Self {
        Self {
            inner,
            tables: Cache::builder().max_capacity(16).build(),
        }
    }
}

#[async_trait]
impl ExchangeRateLookup for RateTableCache {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn rates(&self, base: &str) -> Result<RateTable, RapportError> {
        let inner = Arc::clone(&self.inner);
        self.tables
            .get_with(base.to_uppercase(), async move {
                #[cfg(feature = "tracing")]
                tracing::debug!(base, lookup = inner.name(), "fetching rate table");
                inner.rates(base).await
            })
            .await
    }
}

/// Middleware for constructing a [`RateTableCache`].
#[derive(Default)]
pub struct RateCacheMiddleware;

impl Middleware<dyn ExchangeRateLookup> for RateCacheMiddleware {
    fn apply(
        self: Box<Self>,
        inner: Arc<dyn ExchangeRateLookup>,
    ) -> Arc<dyn ExchangeRateLookup> {
        Arc::new(RateTableCache::new(inner))
    }

    fn name(&self) -> &'static str {
        "RateTableCache"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({})
    }
}
