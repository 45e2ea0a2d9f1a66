//! Configuration types shared across the orchestrator and middleware.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Strategy for resolving country currency metadata during enrichment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CountryFetch {
    /// Issue one lookup per product row, even when countries repeat.
    #[default]
    PerRow,
    /// Resolve each distinct country once per enrichment run and share the result.
    Memoized,
}

/// Capacity and lifetime settings for the memoizing country cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCacheConfig {
    /// Maximum number of distinct countries kept.
    pub max_entries: u64,
    /// Optional time-to-live; `None` keeps entries for the cache lifetime.
    pub ttl: Option<Duration>,
}

impl Default for CountryCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            ttl: None,
        }
    }
}

/// Global configuration for the `Rapport` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RapportConfig {
    /// Currency every local price is converted from.
    pub base_currency: String,
    /// Timeout for each catalog page fetch. Exceeding it aborts the report.
    pub provider_timeout: Duration,
    /// Timeout for each country or rate lookup. Exceeding it degrades the row.
    pub lookup_timeout: Duration,
    /// Optional deadline for a whole report generation.
    pub request_timeout: Option<Duration>,
    /// Country resolution strategy used by the enrichment pipeline.
    pub country_fetch: CountryFetch,
    /// Settings for the memoized country strategy.
    pub country_cache: CountryCacheConfig,
    /// Upper bound on rows enriched concurrently; `None` submits every row at once.
    pub max_concurrent_lookups: Option<usize>,
}

impl Default for RapportConfig {
    fn default() -> Self {
        Self {
            base_currency: "USD".to_string(),
            provider_timeout: Duration::from_secs(5),
            lookup_timeout: Duration::from_secs(5),
            request_timeout: None,
            country_fetch: CountryFetch::default(),
            country_cache: CountryCacheConfig::default(),
            max_concurrent_lookups: None,
        }
    }
}
