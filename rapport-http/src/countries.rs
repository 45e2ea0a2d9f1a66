use std::time::Duration;

use async_trait::async_trait;
use rapport_core::{CountryCurrencyLookup, LocalCurrency, RapportError};
use serde::Deserialize;
use url::Url;

use crate::RESTCOUNTRIES_URL;
use crate::transport::{build_client, get_json, parse_base};

const CAPABILITY: &str = "country-currency";

/// Country currency lookup backed by the restcountries v3.1 `name` endpoint.
///
/// The first matching country wins. Its official name and its first listed
/// currency are used; fields missing from the payload come back empty.
pub struct RestCountriesLookup {
    client: reqwest::Client,
    base: Url,
}

impl RestCountriesLookup {
    /// Connector name used in error tagging.
    pub const NAME: &'static str = "rapport-restcountries";

    /// Builder preset with the public restcountries API.
    #[must_use]
    pub fn builder() -> RestCountriesBuilder {
        RestCountriesBuilder::default()
    }

    fn country_url(&self, country: &str) -> Result<Url, RapportError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RapportError::configuration(format!("{}: base URL cannot have a path", Self::NAME))
            })?
            .pop_if_empty()
            .extend(["name", country]);
        Ok(url)
    }
}

/// Builder for [`RestCountriesLookup`].
pub struct RestCountriesBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl Default for RestCountriesBuilder {
    fn default() -> Self {
        Self {
            base_url: RESTCOUNTRIES_URL.to_string(),
            timeout: None,
        }
    }
}

impl RestCountriesBuilder {
    /// API root, e.g. `https://restcountries.com/v3.1`.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
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
    /// Returns `Configuration` for an unparsable base URL or client setup failure.
    pub fn build(self) -> Result<RestCountriesLookup, RapportError> {
        Ok(RestCountriesLookup {
            client: build_client(RestCountriesLookup::NAME, self.timeout)?,
            base: parse_base(RestCountriesLookup::NAME, &self.base_url)?,
        })
    }
}

#[async_trait]
impl CountryCurrencyLookup for RestCountriesLookup {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn local_currency(&self, country: &str) -> Result<LocalCurrency, RapportError> {
        let url = self.country_url(country)?;
        let matches: Vec<WireCountry> = get_json(&self.client, url, Self::NAME, CAPABILITY, || {
            format!("country {country}")
        })
        .await?;
        Ok(matches
            .into_iter()
            .next()
            .map(LocalCurrency::from)
            .unwrap_or_default())
    }
}

#[derive(Deserialize)]
struct WireCountry {
    name: Option<WireName>,
    #[serde(default)]
    currencies: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct WireName {
    official: Option<String>,
}

impl From<WireCountry> for LocalCurrency {
    fn from(w: WireCountry) -> Self {
        // currencies keep document order, so the first entry is the primary one
        let (code, symbol) = w
            .currencies
            .into_iter()
            .next()
            .map(|(code, meta)| {
                let symbol = meta
                    .get("symbol")
                    .and_then(serde_json::Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                (code, symbol)
            })
            .unwrap_or_default();
        Self {
            country_name: w.name.and_then(|n| n.official).unwrap_or_default(),
            currency_code: code,
            currency_symbol: symbol,
        }
    }
}
