use std::sync::Arc;
use std::time::Duration;

use rapport_core::{
    CatalogConnector, CountryCacheConfig, CountryFetch, RapportConfig, RapportError,
};

/// Report engine over one registered catalog connector.
pub struct Rapport {
    pub(crate) catalog: Arc<dyn CatalogConnector>,
    pub(crate) cfg: RapportConfig,
}

/// Builder for constructing a [`Rapport`] with custom configuration.
pub struct RapportBuilder {
    catalog: Option<Arc<dyn CatalogConnector>>,
    cfg: RapportConfig,
}

impl Default for RapportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RapportBuilder {
    /// Create a new builder with default configuration and no catalog.
    ///
    /// Defaults: base currency `USD`, 5s provider and lookup timeouts, no
    /// request deadline, one country lookup per row, unbounded row concurrency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            catalog: None,
            cfg: RapportConfig::default(),
        }
    }

    /// Register the catalog connector. A later call replaces the earlier one.
    #[must_use]
    pub fn catalog(mut self, catalog: Arc<dyn CatalogConnector>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Currency every local price is converted from.
    #[must_use]
    pub fn base_currency(mut self, code: impl Into<String>) -> Self {
        self.cfg.base_currency = code.into();
        self
    }

    /// Timeout for opening a catalog session and for each page fetch.
    ///
    /// Exceeding it aborts the report with `ProviderTimeout`.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Timeout for each country or rate lookup during enrichment.
    ///
    /// Exceeding it degrades the affected row instead of failing the report.
    #[must_use]
    pub const fn lookup_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.lookup_timeout = timeout;
        self
    }

    /// Deadline for a whole report generation.
    ///
    /// When exceeded, the report fails with `RequestTimeout` labelled by the
    /// report name.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Country resolution strategy for local-price reports.
    #[must_use]
    pub const fn country_fetch(mut self, strategy: CountryFetch) -> Self {
        self.cfg.country_fetch = strategy;
        self
    }

    /// Cache settings used when countries are memoized.
    #[must_use]
    pub const fn country_cache(mut self, cache: CountryCacheConfig) -> Self {
        self.cfg.country_cache = cache;
        self
    }

    /// Bound how many rows are enriched concurrently.
    #[must_use]
    pub const fn max_concurrent_lookups(mut self, limit: usize) -> Self {
        self.cfg.max_concurrent_lookups = Some(limit);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: RapportConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the `Rapport` engine.
    ///
    /// # Errors
    /// Returns `Configuration` if no catalog was registered, the base currency
    /// is blank, a timeout is zero or the concurrency limit is zero.
    pub fn build(mut self) -> Result<Rapport, RapportError> {
        let Some(catalog) = self.catalog else {
            return Err(RapportError::configuration(
                "no catalog registered; add one via catalog(...)",
            ));
        };

        let base = self.cfg.base_currency.trim();
        if base.is_empty() {
            return Err(RapportError::configuration("base currency must not be blank"));
        }
        self.cfg.base_currency = base.to_ascii_uppercase();

        if self.cfg.provider_timeout.is_zero() {
            return Err(RapportError::configuration("provider timeout must be non-zero"));
        }
        if self.cfg.lookup_timeout.is_zero() {
            return Err(RapportError::configuration("lookup timeout must be non-zero"));
        }
        if self.cfg.request_timeout.is_some_and(|d| d.is_zero()) {
            return Err(RapportError::configuration("request timeout must be non-zero"));
        }
        if self.cfg.max_concurrent_lookups == Some(0) {
            return Err(RapportError::configuration(
                "max concurrent lookups must be at least 1",
            ));
        }

        Ok(Rapport {
            catalog,
            cfg: self.cfg,
        })
    }
}

/// Attribute a foreign error to the connector it came from.
///
/// Errors already carrying transport meaning pass through unchanged.
pub fn tag_err(connector: &str, e: RapportError) -> RapportError {
    match e {
        e @ (RapportError::NotFound { .. }
        | RapportError::ProviderTimeout { .. }
        | RapportError::Connector { .. }
        | RapportError::RequestTimeout { .. }
        | RapportError::Data(_)) => e,
        other => RapportError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Bound `fut` by an optional deadline, mapping expiry to `RequestTimeout`.
pub(crate) async fn with_request_deadline<T, Fut>(
    capability: &'static str,
    deadline: Option<Duration>,
    fut: Fut,
) -> Result<T, RapportError>
where
    Fut: core::future::Future<Output = Result<T, RapportError>>,
{
    match deadline {
        Some(d) => tokio::time::timeout(d, fut)
            .await
            .unwrap_or_else(|_| Err(RapportError::request_timeout(capability))),
        None => fut.await,
    }
}

impl Rapport {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rapport::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: &'static str,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, RapportError>
    where
        Fut: core::future::Future<Output = Result<T, RapportError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(RapportError::provider_timeout(connector_name, capability)))
    }

    /// Start building a new `Rapport` instance.
    ///
    /// ```rust,ignore
    /// let rapport = rapport::Rapport::builder()
    ///     .catalog(std::sync::Arc::new(rapport_mock::MockCatalog::new()))
    ///     .lookup_timeout(std::time::Duration::from_secs(2))
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> RapportBuilder {
        RapportBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &RapportConfig {
        &self.cfg
    }

    /// Name of the registered catalog connector.
    #[must_use]
    pub fn catalog_name(&self) -> &'static str {
        self.catalog.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_err_wraps_only_foreign_errors() {
        let passthrough = RapportError::provider_timeout("odata", "catalog-page");
        assert_eq!(tag_err("odata", passthrough.clone()), passthrough);

        let wrapped = tag_err("odata", RapportError::Other("boom".into()));
        assert_eq!(
            wrapped,
            RapportError::connector("odata", "unknown error: boom")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn request_deadline_maps_to_request_timeout() {
        let slow = async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok::<_, RapportError>(1)
        };
        let err = with_request_deadline("current-products", Some(Duration::from_secs(1)), slow)
            .await
            .unwrap_err();
        assert_eq!(err, RapportError::request_timeout("current-products"));

        let fast = async { Ok::<_, RapportError>(2) };
        assert_eq!(with_request_deadline("x", None, fast).await.unwrap(), 2);
    }
}
