use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use rapport_core::{
    CatalogConnector, CatalogQuery, CatalogSession, ContinuationToken, CountryCurrencyLookup,
    ExchangeRateLookup, LocalCurrency, Page, ProductRecord, RapportError, RateTable,
};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after sleeping for the given duration.
    Delay(Duration, T),
    /// Fail immediately with the provided error.
    Fail(RapportError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

impl<T> MockBehavior<T> {
    async fn run(self) -> Result<T, RapportError> {
        match self {
            Self::Return(v) => Ok(v),
            Self::Delay(d, v) => {
                tokio::time::sleep(d).await;
                Ok(v)
            }
            Self::Fail(e) => Err(e),
            Self::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

#[derive(Default)]
struct InternalState {
    country_rules: HashMap<String, MockBehavior<LocalCurrency>>,
    rate_rules: HashMap<String, MockBehavior<RateTable>>,
    country_calls: Vec<String>,
    rate_calls: Vec<String>,
}

/// Controller handle used by tests to drive the dynamic lookup from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `local_currency` calls for a specific country.
    pub async fn set_country_behavior(
        &self,
        country: impl Into<String>,
        behavior: MockBehavior<LocalCurrency>,
    ) {
        let mut guard = self.state.lock().await;
        guard.country_rules.insert(country.into(), behavior);
    }

    /// Set the behavior for `rates` calls for a specific base currency.
    pub async fn set_rates_behavior(&self, base: impl Into<String>, behavior: MockBehavior<RateTable>) {
        let mut guard = self.state.lock().await;
        guard.rate_rules.insert(base.into(), behavior);
    }

    /// Countries requested so far, in call order.
    pub async fn country_calls(&self) -> Vec<String> {
        self.state.lock().await.country_calls.clone()
    }

    /// Number of calls made for one country.
    pub async fn country_call_count(&self, country: &str) -> usize {
        let guard = self.state.lock().await;
        guard.country_calls.iter().filter(|c| *c == country).count()
    }

    /// Base currencies requested so far, in call order.
    pub async fn rate_calls(&self) -> Vec<String> {
        self.state.lock().await.rate_calls.clone()
    }

    /// Clear all configured behaviors and call logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.country_rules.clear();
        guard.rate_rules.clear();
        guard.country_calls.clear();
        guard.rate_calls.clear();
    }
}

/// A country and rate lookup that defers all behavior to an external controller.
///
/// Inputs without a configured behavior fail with `NotFound`.
pub struct DynamicMockLookup {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockLookup {
    /// Create a new dynamic lookup and its controller.
    #[must_use]
    pub fn new_with_controller(name: &'static str) -> (Arc<Self>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        (Arc::new(Self { name, state }), controller)
    }
}

#[async_trait]
impl CountryCurrencyLookup for DynamicMockLookup {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn local_currency(&self, country: &str) -> Result<LocalCurrency, RapportError> {
        // Snapshot the behavior without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.country_calls.push(country.to_string());
            guard.country_rules.get(country).cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(RapportError::not_found(format!("country {country}"))),
        }
    }
}

#[async_trait]
impl ExchangeRateLookup for DynamicMockLookup {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn rates(&self, base: &str) -> Result<RateTable, RapportError> {
        let behavior = {
            let mut guard = self.state.lock().await;
            guard.rate_calls.push(base.to_string());
            guard.rate_rules.get(base).cloned()
        };
        match behavior {
            Some(b) => b.run().await,
            None => Err(RapportError::not_found(format!("rates for base {base}"))),
        }
    }
}

type Script = Vec<MockBehavior<Page<ProductRecord>>>;

#[derive(Default)]
struct ScriptLog {
    queries: Vec<CatalogQuery>,
    resumed: Vec<ContinuationToken>,
}

#[derive(Default)]
struct ScriptCounters {
    opened: AtomicUsize,
    closed: AtomicUsize,
}

/// Handle for inspecting a [`ScriptedCatalog`] after it was handed out.
pub struct ScriptHandle {
    log: Arc<Mutex<ScriptLog>>,
    counters: Arc<ScriptCounters>,
}

impl ScriptHandle {
    /// Queries executed so far, one per session.
    pub async fn queries(&self) -> Vec<CatalogQuery> {
        self.log.lock().await.queries.clone()
    }

    /// Tokens passed to `resume`, in call order.
    pub async fn resumed_tokens(&self) -> Vec<ContinuationToken> {
        self.log.lock().await.resumed.clone()
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

/// Catalog that replays a fixed script of page outcomes.
///
/// Every session starts at the first step: `query` plays step 0 and each
/// `resume` plays the next one, regardless of the token passed in. Running
/// past the end of the script fails with a `Data` error.
pub struct ScriptedCatalog {
    script: Arc<Script>,
    applies_query: bool,
    log: Arc<Mutex<ScriptLog>>,
    counters: Arc<ScriptCounters>,
}

impl ScriptedCatalog {
    /// Create a scripted catalog and the handle observing it.
    ///
    /// The catalog does not claim to apply queries, so callers evaluate them
    /// over the scripted rows.
    #[must_use]
    pub fn new_with_handle(script: Script) -> (Arc<dyn CatalogConnector>, ScriptHandle) {
        Self::build(script, false)
    }

    /// Like [`Self::new_with_handle`], but the scripted pages stand for rows the
    /// source already selected and ordered, as a pushdown server returns them.
    #[must_use]
    pub fn applying_query_with_handle(script: Script) -> (Arc<dyn CatalogConnector>, ScriptHandle) {
        Self::build(script, true)
    }

    fn build(script: Script, applies_query: bool) -> (Arc<dyn CatalogConnector>, ScriptHandle) {
        let log = Arc::new(Mutex::new(ScriptLog::default()));
        let counters = Arc::new(ScriptCounters::default());
        let handle = ScriptHandle {
            log: Arc::clone(&log),
            counters: Arc::clone(&counters),
        };
        let me = Arc::new(Self {
            script: Arc::new(script),
            applies_query,
            log,
            counters,
        });
        (me as Arc<dyn CatalogConnector>, handle)
    }

    /// Script that returns `records` split into pages of `page_size`.
    ///
    /// Tokens are `page-1`, `page-2`, ...; an empty input yields one empty page.
    #[must_use]
    pub fn paged(records: Vec<ProductRecord>, page_size: usize) -> Script {
        let chunks: Vec<Vec<ProductRecord>> = if records.is_empty() {
            vec![Vec::new()]
        } else {
            records.chunks(page_size.max(1)).map(<[_]>::to_vec).collect()
        };
        let last = chunks.len() - 1;
        chunks
            .into_iter()
            .enumerate()
            .map(|(i, chunk)| {
                let page = if i == last {
                    Page::last(chunk)
                } else {
                    Page::more(chunk, ContinuationToken::new(format!("page-{}", i + 1)))
                };
                MockBehavior::Return(page)
            })
            .collect()
    }
}

#[async_trait]
impl CatalogConnector for ScriptedCatalog {
    fn name(&self) -> &'static str {
        "rapport-scripted"
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn applies_query(&self) -> bool {
        self.applies_query
    }

    async fn open_session(&self) -> Result<Box<dyn CatalogSession>, RapportError> {
        self.counters.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedSession {
            script: Arc::clone(&self.script),
            step: 0,
            log: Arc::clone(&self.log),
            counters: Arc::clone(&self.counters),
        }))
    }
}

struct ScriptedSession {
    script: Arc<Script>,
    step: usize,
    log: Arc<Mutex<ScriptLog>>,
    counters: Arc<ScriptCounters>,
}

impl ScriptedSession {
    async fn play(&mut self) -> Result<Page<ProductRecord>, RapportError> {
        let behavior = self
            .script
            .get(self.step)
            .cloned()
            .ok_or_else(|| RapportError::Data(format!("script exhausted at step {}", self.step)))?;
        self.step += 1;
        behavior.run().await
    }
}

#[async_trait]
impl CatalogSession for ScriptedSession {
    async fn query(&mut self, query: &CatalogQuery) -> Result<Page<ProductRecord>, RapportError> {
        self.log.lock().await.queries.push(query.clone());
        self.step = 0;
        self.play().await
    }

    async fn resume(
        &mut self,
        token: &ContinuationToken,
    ) -> Result<Page<ProductRecord>, RapportError> {
        self.log.lock().await.resumed.push(token.clone());
        self.play().await
    }
}

impl Drop for ScriptedSession {
    fn drop(&mut self) {
        self.counters.closed.fetch_add(1, Ordering::SeqCst);
    }
}
