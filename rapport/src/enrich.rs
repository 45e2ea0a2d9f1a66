use std::sync::Arc;

use futures::StreamExt;
use rapport_core::{
    CountryCurrencyLookup, CountryFetch, Decimal, ExchangeRateLookup, LocalCurrency,
    LocalPriceLine, Middleware, ProductRecord, RapportConfig, Report,
};
use rapport_middleware::{CountryCacheMiddleware, RateCacheMiddleware, TimeoutMiddleware};

/// Attaches local currency data and converted prices to product rows.
///
/// Lookups are composed at construction: every call is bounded by the lookup
/// timeout, the rate table is fetched at most once per pipeline, and with
/// [`CountryFetch::Memoized`] each distinct country is resolved once.
/// Failed lookups never fail a row. A country fault leaves the currency
/// fields empty and a rate fault converts at `1`.
pub struct CurrencyEnrichmentPipeline {
    countries: Arc<dyn CountryCurrencyLookup>,
    rates: Arc<dyn ExchangeRateLookup>,
    base_currency: String,
    max_in_flight: Option<usize>,
}

impl CurrencyEnrichmentPipeline {
    /// Compose a pipeline from raw lookups and the engine configuration.
    #[must_use]
    pub fn new(
        countries: Arc<dyn CountryCurrencyLookup>,
        rates: Arc<dyn ExchangeRateLookup>,
        cfg: &RapportConfig,
    ) -> Self {
        let timeout = TimeoutMiddleware {
            timeout: cfg.lookup_timeout,
        };
        let mut countries =
            Middleware::<dyn CountryCurrencyLookup>::apply(Box::new(timeout), countries);
        if cfg.country_fetch == CountryFetch::Memoized {
            let cache = CountryCacheMiddleware {
                config: cfg.country_cache,
            };
            countries = Box::new(cache).apply(countries);
        }
        let rates = Middleware::<dyn ExchangeRateLookup>::apply(Box::new(timeout), rates);
        let rates = Box::new(RateCacheMiddleware).apply(rates);

        Self {
            countries,
            rates,
            base_currency: cfg.base_currency.clone(),
            max_in_flight: cfg.max_concurrent_lookups,
        }
    }

    /// Enrich `records`, keeping their length and order.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rapport::enrich::enrich",
            skip(self, records),
            fields(rows = records.len(), base = %self.base_currency),
        )
    )]
    pub async fn enrich(&self, records: Vec<ProductRecord>) -> Report<LocalPriceLine> {
        let limit = self.max_in_flight.unwrap_or(records.len()).max(1);
        futures::stream::iter(records.into_iter().map(|r| self.enrich_row(r)))
            .buffered(limit)
            .collect::<Vec<_>>()
            .await
            .into()
    }

    async fn enrich_row(&self, record: ProductRecord) -> LocalPriceLine {
        let currency = self.resolve_country(&record).await;
        let rate = self.resolve_rate(&currency.currency_code).await;
        let price = record.report_price();
        LocalPriceLine {
            name: record.name,
            price,
            country: currency.country_name,
            local_price: price * rate,
            currency_symbol: currency.currency_symbol,
        }
    }

    async fn resolve_country(&self, record: &ProductRecord) -> LocalCurrency {
        match self.countries.local_currency(&record.supplier_country).await {
            Ok(currency) => currency,
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    product = %record.name,
                    country = %record.supplier_country,
                    error = %_e,
                    "country lookup failed; currency left empty"
                );
                LocalCurrency::default()
            }
        }
    }

    async fn resolve_rate(&self, quote: &str) -> Decimal {
        match self.rates.rates(&self.base_currency).await {
            Ok(table) => table.rate(&self.base_currency, quote),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    base = %self.base_currency,
                    quote = quote,
                    error = %_e,
                    "rate lookup failed; converting at 1"
                );
                Decimal::ONE
            }
        }
    }
}
