use std::sync::Arc;

use rapport_core::{
    CatalogQuery, CountryCurrencyLookup, ExchangeRateLookup, LocalPriceLine, RapportError, Report,
};

use crate::Rapport;
use crate::core::with_request_deadline;
use crate::enrich::CurrencyEnrichmentPipeline;

const CAPABILITY: &str = "current-products-local-prices";

impl Rapport {
    /// Every catalog product with its supplier country's currency and local price.
    ///
    /// Rows keep catalog order. The lookups are wrapped for this call only: the
    /// rate table for the base currency is fetched at most once, and a failed
    /// lookup degrades its row instead of failing the report.
    ///
    /// # Errors
    /// Returns an error if a catalog page fails or times out, or if the
    /// request deadline expires. Lookup failures never surface here.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "rapport::router",
            skip(self, countries, rates),
            fields(countries = countries.name(), rates = rates.name()),
        )
    )]
    pub async fn current_products_with_local_price(
        &self,
        countries: Arc<dyn CountryCurrencyLookup>,
        rates: Arc<dyn ExchangeRateLookup>,
    ) -> Result<Report<LocalPriceLine>, RapportError> {
        let pipeline = CurrencyEnrichmentPipeline::new(countries, rates, &self.cfg);
        with_request_deadline(CAPABILITY, self.cfg.request_timeout, async {
            let records = self.fetch_all(&CatalogQuery::all()).await?;
            Ok(pipeline.enrich(records).await)
        })
        .await
    }
}
