use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use rapport_core::{ExchangeRateLookup, RapportError, RateTable};
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use crate::CURRENCYLAYER_URL;
use crate::transport::{build_client, get_json, parse_base};

const CAPABILITY: &str = "exchange-rates";

/// Exchange-rate lookup backed by the currencylayer `live` endpoint.
///
/// USD is the service's default source and is requested without a `source`
/// parameter; any other base is passed explicitly.
pub struct CurrencyLayerRates {
    client: reqwest::Client,
    base: Url,
    access_key: String,
}

impl CurrencyLayerRates {
    /// Connector name used in error tagging.
    pub const NAME: &'static str = "rapport-currencylayer";

    /// Builder preset with the public currencylayer API.
    #[must_use]
    pub fn builder() -> CurrencyLayerBuilder {
        CurrencyLayerBuilder::default()
    }

    /// Lookup at the public API with the given access key.
    ///
    /// # Errors
    /// Returns `Configuration` if the key is blank.
    pub fn new(access_key: impl Into<String>) -> Result<Self, RapportError> {
        Self::builder().access_key(access_key).build()
    }

    fn live_url(&self, source: &str) -> Result<Url, RapportError> {
        let mut url = self
            .base
            .join("live")
            .map_err(|e| RapportError::configuration(format!("{}: {e}", Self::NAME)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("access_key", &self.access_key);
            if !source.eq_ignore_ascii_case("USD") {
                pairs.append_pair("source", &source.to_uppercase());
            }
        }
        Ok(url)
    }
}

/// Builder for [`CurrencyLayerRates`].
pub struct CurrencyLayerBuilder {
    base_url: String,
    access_key: String,
    timeout: Option<Duration>,
}

impl Default for CurrencyLayerBuilder {
    fn default() -> Self {
        Self {
            base_url: CURRENCYLAYER_URL.to_string(),
            access_key: String::new(),
            timeout: None,
        }
    }
}

impl CurrencyLayerBuilder {
    /// API root.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Account access key (required).
    #[must_use]
    pub fn access_key(mut self, key: impl Into<String>) -> Self {
        self.access_key = key.into();
        self
    }

    /// HTTP client timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the lookup.
    ///
    /// # Errors
    /// Returns `Configuration` for a blank access key, an unparsable base URL,
    /// or client setup failure.
    pub fn build(self) -> Result<CurrencyLayerRates, RapportError> {
        let access_key = self.access_key.trim().to_string();
        if access_key.is_empty() {
            return Err(RapportError::configuration(format!(
                "{}: access key is required",
                CurrencyLayerRates::NAME
            )));
        }
        Ok(CurrencyLayerRates {
            client: build_client(CurrencyLayerRates::NAME, self.timeout)?,
            base: parse_base(CurrencyLayerRates::NAME, &self.base_url)?,
            access_key,
        })
    }
}

#[async_trait]
impl ExchangeRateLookup for CurrencyLayerRates {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn rates(&self, base: &str) -> Result<RateTable, RapportError> {
        let url = self.live_url(base)?;
        let live: WireLive = get_json(&self.client, url, Self::NAME, CAPABILITY, || {
            format!("rates for base {base}")
        })
        .await?;
        live.into_table()
    }
}

#[derive(Deserialize)]
struct WireLive {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    quotes: HashMap<String, Decimal>,
    error: Option<WireError>,
}

#[derive(Deserialize)]
struct WireError {
    code: Option<i64>,
    info: Option<String>,
}

impl WireLive {
    fn into_table(self) -> Result<RateTable, RapportError> {
        if !self.success {
            let (code, info) = self
                .error
                .map(|e| (e.code.unwrap_or_default(), e.info.unwrap_or_default()))
                .unwrap_or_default();
            return Err(RapportError::connector(
                CurrencyLayerRates::NAME,
                format!("request rejected (code {code}): {info}"),
            ));
        }
        Ok(self.quotes.into_iter().collect())
    }
}
