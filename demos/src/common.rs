use std::sync::Arc;

use rapport::{CatalogConnector, CountryCurrencyLookup, ExchangeRateLookup, RapportError};
use rapport_http::{CurrencyLayerRates, ODataCatalog, RestCountriesLookup};
use rapport_mock::{MockCatalog, MockCountryLookup, MockRateLookup};
use rapport_sql::SqlCatalog;

/// Set to use the in-memory Northwind fixture instead of the network.
pub const USE_MOCK_VAR: &str = "RAPPORT_DEMOS_USE_MOCK";
/// Overrides the OData service root.
pub const ODATA_URL_VAR: &str = "RAPPORT_ODATA_URL";
/// SQLite connection string; selects the SQL catalog instead of OData.
pub const SQL_CONNECTION_VAR: &str = "RAPPORT_SQL_CONNECTION";
/// Access key for the currencylayer API.
pub const ACCESS_KEY_VAR: &str = "CURRENCYLAYER_ACCESS_KEY";

/// Whether the demos run against the mock collaborators.
#[must_use]
pub fn use_mock() -> bool {
    std::env::var_os(USE_MOCK_VAR).is_some()
}

/// Install a fmt subscriber filtered by `RUST_LOG`, e.g. `RUST_LOG=rapport=debug`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Return a catalog connector for the demos.
///
/// # Errors
/// Returns `Configuration` if `RAPPORT_SQL_CONNECTION` is blank or invalid,
/// or if `RAPPORT_ODATA_URL` is not a valid URL.
pub fn get_catalog() -> Result<Arc<dyn CatalogConnector>, RapportError> {
    if use_mock() {
        return Ok(Arc::new(MockCatalog::new()));
    }
    if let Ok(conn) = std::env::var(SQL_CONNECTION_VAR) {
        return Ok(Arc::new(SqlCatalog::new(&conn)?));
    }
    let mut builder = ODataCatalog::builder();
    if let Ok(url) = std::env::var(ODATA_URL_VAR) {
        builder = builder.base_url(url);
    }
    Ok(Arc::new(builder.build()?))
}

/// Return the country and rate lookups for the demos.
///
/// # Errors
/// Returns `Configuration` if no currencylayer access key is set outside mock mode.
pub fn get_lookups()
-> Result<(Arc<dyn CountryCurrencyLookup>, Arc<dyn ExchangeRateLookup>), RapportError> {
    if use_mock() {
        return Ok((
            Arc::new(MockCountryLookup::new()),
            Arc::new(MockRateLookup::new()),
        ));
    }
    let key = std::env::var(ACCESS_KEY_VAR).unwrap_or_default();
    let rates = CurrencyLayerRates::new(key)?;
    let countries = RestCountriesLookup::builder().build()?;
    Ok((Arc::new(countries), Arc::new(rates)))
}
