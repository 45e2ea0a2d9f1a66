//! Memoizing wrapper for country currency lookups.

use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;
use rapport_core::{
    CountryCacheConfig, CountryCurrencyLookup, LocalCurrency, Middleware, RapportError,
};

/// Lookup that resolves each distinct country at most once.
///
/// Concurrent callers asking for the same country share a single upstream
/// call. Failures are remembered too, so a country that failed once keeps
/// failing for the lifetime of this wrapper without further upstream calls.
pub struct MemoizedCountryLookup {
    inner: Arc<dyn CountryCurrencyLookup>,
    cache: Cache<String, Result<LocalCurrency, RapportError>>,
}

impl MemoizedCountryLookup {
    /// Wrap `inner` with a cache sized by `config`.
    pub fn new(inner: Arc<dyn CountryCurrencyLookup>, config: CountryCacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_entries.max(1));
        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }
        Self {
            inner,
            cache: builder.build(),
        }
    }

    /// Access the inner lookup.
    pub fn inner(&self) -> &Arc<dyn CountryCurrencyLookup> {
        &self.inner
    }
}

#[async_trait]
impl CountryCurrencyLookup for MemoizedCountryLookup {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn local_currency(&self, country: &str) -> Result<LocalCurrency, RapportError> {
        let inner = Arc::clone(&self.inner);
        self.cache
            .get_with(country.to_string(), async move {
                #[cfg(feature = "tracing")]
                tracing::debug!(country, lookup = inner.name(), "resolving country currency");
                inner.local_currency(country).await
            })
            .await
    }
}

/// Middleware config for constructing a [`MemoizedCountryLookup`].
pub struct CountryCacheMiddleware {
    /// Cache sizing and expiry handed to the wrapper.
    pub config: CountryCacheConfig,
}

impl CountryCacheMiddleware {
    /// Create a cache middleware with the given sizing.
    #[must_use]
    pub const fn new(config: CountryCacheConfig) -> Self {
        Self { config }
    }
}

impl Middleware<dyn CountryCurrencyLookup> for CountryCacheMiddleware {
    fn apply(
        self: Box<Self>,
        inner: Arc<dyn CountryCurrencyLookup>,
    ) -> Arc<dyn CountryCurrencyLookup> {
        Arc::new(MemoizedCountryLookup::new(inner, self.config))
    }

    fn name(&self) -> &'static str {
        "MemoizedCountryLookup"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({
            "max_entries": self.config.max_entries,
            "ttl_ms": self
                .config
                .ttl
                .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX)),
        })
    }
}
