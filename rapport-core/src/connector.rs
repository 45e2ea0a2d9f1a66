use async_trait::async_trait;

use crate::{
    CatalogQuery, ContinuationToken, LocalCurrency, Page, ProductRecord, RapportError, RateTable,
};

/// An open connection to a paged product catalog.
///
/// Sessions are acquired for one report generation and released when dropped.
#[async_trait]
pub trait CatalogSession: Send {
    /// Execute a query and return its first page.
    ///
    /// Sources may translate `query` into a native query or ignore it. The
    /// caller evaluates it in memory unless the connector reports
    /// [`CatalogConnector::applies_query`].
    async fn query(&mut self, query: &CatalogQuery) -> Result<Page<ProductRecord>, RapportError>;

    /// Fetch the page a continuation token points at.
    async fn resume(
        &mut self,
        token: &ContinuationToken,
    ) -> Result<Page<ProductRecord>, RapportError>;
}

/// Catalog data source that hands out sessions.
#[async_trait]
pub trait CatalogConnector: Send + Sync {
    /// A stable identifier used in error tagging and logs (e.g. "rapport-odata").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Whether sessions return rows already filtered, ordered and limited by
    /// the query. Such rows are reported in the order they arrive.
    fn applies_query(&self) -> bool {
        false
    }

    /// Open a new session.
    async fn open_session(&self) -> Result<Box<dyn CatalogSession>, RapportError>;
}

/// Resolves currency metadata for a country name.
#[async_trait]
pub trait CountryCurrencyLookup: Send + Sync {
    /// A stable identifier used in error tagging and logs.
    fn name(&self) -> &'static str;

    /// Currency metadata for `country`.
    async fn local_currency(&self, country: &str) -> Result<LocalCurrency, RapportError>;
}

/// Fetches the exchange rates quoted against a base currency.
#[async_trait]
pub trait ExchangeRateLookup: Send + Sync {
    /// A stable identifier used in error tagging and logs.
    fn name(&self) -> &'static str;

    /// Every rate quoted against `base`, keyed by `BASE+QUOTE`.
    async fn rates(&self, base: &str) -> Result<RateTable, RapportError>;
}
