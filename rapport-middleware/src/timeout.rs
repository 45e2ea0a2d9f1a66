//! Per-call timeouts for lookup collaborators.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rapport_core::{
    CountryCurrencyLookup, ExchangeRateLookup, LocalCurrency, Middleware, RapportError, RateTable,
};

const COUNTRY_CAPABILITY: &str = "country-currency";
const RATES_CAPABILITY: &str = "exchange-rates";

/// Country lookup whose calls fail with `ProviderTimeout` after a deadline.
pub struct TimedCountryLookup {
    inner: Arc<dyn CountryCurrencyLookup>,
    timeout: Duration,
}

impl TimedCountryLookup {
    /// Wrap `inner`, bounding each call by `timeout`.
    pub fn new(inner: Arc<dyn CountryCurrencyLookup>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl CountryCurrencyLookup for TimedCountryLookup {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn local_currency(&self, country: &str) -> Result<LocalCurrency, RapportError> {
        match tokio::time::timeout(self.timeout, self.inner.local_currency(country)).await {
            Ok(res) => res,
            Err(_) => Err(RapportError::provider_timeout(
                self.inner.name(),
                COUNTRY_CAPABILITY,
            )),
        }
    }
}

/// Rate lookup whose calls fail with `ProviderTimeout` after a deadline.
pub struct TimedRateLookup {
    inner: Arc<dyn ExchangeRateLookup>,
    timeout: Duration,
}

impl TimedRateLookup {
    /// Wrap `inner`, bounding each call by `timeout`.
    pub fn new(inner: Arc<dyn ExchangeRateLookup>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait]
impl ExchangeRateLookup for TimedRateLookup {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn rates(&self, base: &str) -> Result<RateTable, RapportError> {
        match tokio::time::timeout(self.timeout, self.inner.rates(base)).await {
            Ok(res) => res,
            Err(_) => Err(RapportError::provider_timeout(
                self.inner.name(),
                RATES_CAPABILITY,
            )),
        }
    }
}

/// Middleware applying one timeout to either lookup kind.
#[derive(Clone, Copy)]
pub struct TimeoutMiddleware {
    /// Upper bound on each wrapped lookup call.
    pub timeout: Duration,
}

impl TimeoutMiddleware {
    /// Create a timeout middleware bounding each call by `timeout`.
    #[must_use]
    pub const fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "timeout_ms": u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }
}

impl Middleware<dyn CountryCurrencyLookup> for TimeoutMiddleware {
    fn apply(
        self: Box<Self>,
        inner: Arc<dyn CountryCurrencyLookup>,
    ) -> Arc<dyn CountryCurrencyLookup> {
        Arc::new(TimedCountryLookup::new(inner, self.timeout))
    }

    fn name(&self) -> &'static str {
        "TimedCountryLookup"
    }

    fn config_json(&self) -> serde_json::Value {
        self.config()
    }
}

impl Middleware<dyn ExchangeRateLookup> for TimeoutMiddleware {
    fn apply(
        self: Box<Self>,
        inner: Arc<dyn ExchangeRateLookup>,
    ) -> Arc<dyn ExchangeRateLookup> {
        Arc::new(TimedRateLookup::new(inner, self.timeout))
    }

    fn name(&self) -> &'static str {
        "TimedRateLookup"
    }

    fn config_json(&self) -> serde_json::Value {
        self.config()
    }
}
