use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rapport_core::{
    CatalogConnector, CatalogQuery, CatalogSession, ContinuationToken, CountryCurrencyLookup,
    ExchangeRateLookup, LocalCurrency, Page, ProductRecord, RapportError, RateTable,
};

mod dynamic;
mod fixtures;

pub use dynamic::{
    DynamicMockController, DynamicMockLookup, MockBehavior, ScriptHandle, ScriptedCatalog,
};

/// Latency simulated for inputs named `TIMEOUT`.
const SIMULATED_LATENCY: Duration = Duration::from_millis(200);

async fn maybe_fail_or_timeout(
    input: &str,
    connector: &'static str,
    capability: &'static str,
) -> Result<(), RapportError> {
    match input {
        "FAIL" => Err(RapportError::connector(
            connector,
            format!("forced failure: {capability}"),
        )),
        "TIMEOUT" => {
            tokio::time::sleep(SIMULATED_LATENCY).await;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Product records of the deterministic Northwind sample, in catalog order.
#[must_use]
pub fn fixture_products() -> Vec<ProductRecord> {
    fixtures::products::catalog()
}

#[derive(Default)]
struct SessionCounters {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// Paged mock catalog over the Northwind fixture.
///
/// Pages hold `page_size` records and continuation tokens encode the offset
/// of the next page. Session acquisition and release are counted so tests can
/// check that every session is dropped.
pub struct MockCatalog {
    page_size: usize,
    pushdown: bool,
    fail_on_page: Option<usize>,
    records: Arc<Vec<ProductRecord>>,
    counters: Arc<SessionCounters>,
}

impl Default for MockCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCatalog {
    pub const DEFAULT_PAGE_SIZE: usize = 5;

    #[must_use]
    pub fn new() -> Self {
        Self::with_records(fixtures::products::catalog())
    }

    /// Catalog over caller-provided records instead of the fixture.
    #[must_use]
    pub fn with_records(records: Vec<ProductRecord>) -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            pushdown: true,
            fail_on_page: None,
            records: Arc::new(records),
            counters: Arc::new(SessionCounters::default()),
        }
    }

    /// Records per page; zero is treated as one.
    #[must_use]
    pub fn page_size(mut self, n: usize) -> Self {
        self.page_size = n.max(1);
        self
    }

    /// Ignore pushed-down queries and page through the raw catalog.
    #[must_use]
    pub const fn without_pushdown(mut self) -> Self {
        self.pushdown = false;
        self
    }

    /// Fail the fetch of the zero-based page `index`.
    #[must_use]
    pub const fn fail_on_page(mut self, index: usize) -> Self {
        self.fail_on_page = Some(index);
        self
    }

    /// Sessions opened so far.
    pub fn sessions_opened(&self) -> usize {
        self.counters.opened.load(Ordering::SeqCst)
    }

    /// Sessions released so far.
    pub fn sessions_closed(&self) -> usize {
        self.counters.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogConnector for MockCatalog {
    fn name(&self) -> &'static str {
        "rapport-mock"
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn applies_query(&self) -> bool {
        self.pushdown
    }

    async fn open_session(&self) -> Result<Box<dyn CatalogSession>, RapportError> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockSession {
            page_size: self.page_size,
            pushdown: self.pushdown,
            fail_on_page: self.fail_on_page,
            source: Arc::clone(&self.records),
            result: Vec::new(),
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct MockSession {
    page_size: usize,
    pushdown: bool,
    fail_on_page: Option<usize>,
    source: Arc<Vec<ProductRecord>>,
    result: Vec<ProductRecord>,
    counters: Arc<SessionCounters>,
}

impl MockSession {
    fn page_at(&self, offset: usize) -> Result<Page<ProductRecord>, RapportError> {
        if self.fail_on_page == Some(offset / self.page_size) {
            return Err(RapportError::connector(
                "rapport-mock",
                format!("forced failure: catalog page at offset {offset}"),
            ));
        }
        let end = (offset + self.page_size).min(self.result.len());
        let records = self.result.get(offset..end).unwrap_or_default().to_vec();
        if end < self.result.len() {
            Ok(Page::more(records, ContinuationToken::new(format!("skip={end}"))))
        } else {
            Ok(Page::last(records))
        }
    }
}

#[async_trait]
impl CatalogSession for MockSession {
    async fn query(&mut self, query: &CatalogQuery) -> Result<Page<ProductRecord>, RapportError> {
        let all = self.source.as_ref().clone();
        self.result = if self.pushdown { query.apply(all) } else { all };
        self.page_at(0)
    }

    async fn resume(
        &mut self,
        token: &ContinuationToken,
    ) -> Result<Page<ProductRecord>, RapportError> {
        let offset = token
            .as_str()
            .strip_prefix("skip=")
            .and_then(|n| n.parse::<usize>().ok())
            .ok_or_else(|| RapportError::Data(format!("unrecognized token: {}", token.as_str())))?;
        self.page_at(offset)
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Country lookup over a fixed table of Northwind supplier countries.
///
/// The country `FAIL` fails and `TIMEOUT` resolves after a short delay.
/// Unknown countries are reported as `NotFound`.
pub struct MockCountryLookup;

impl Default for MockCountryLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCountryLookup {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CountryCurrencyLookup for MockCountryLookup {
    fn name(&self) -> &'static str {
        "rapport-mock-countries"
    }

    async fn local_currency(&self, country: &str) -> Result<LocalCurrency, RapportError> {
        maybe_fail_or_timeout(country, self.name(), "country-currency").await?;
        fixtures::countries::by_country(country)
            .ok_or_else(|| RapportError::not_found(format!("country {country}")))
    }
}

/// Rate lookup quoting a fixed USD table.
pub struct MockRateLookup;

impl Default for MockRateLookup {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRateLookup {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ExchangeRateLookup for MockRateLookup {
    fn name(&self) -> &'static str {
        "rapport-mock-rates"
    }

    async fn rates(&self, base: &str) -> Result<RateTable, RapportError> {
        maybe_fail_or_timeout(base, self.name(), "exchange-rates").await?;
        fixtures::rates::for_base(base)
            .ok_or_else(|| RapportError::not_found(format!("rates for base {base}")))
    }
}
