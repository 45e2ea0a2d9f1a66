//! rapport-http
//!
//! HTTP implementations of the rapport collaborator traits:
//!
//! - [`ODataCatalog`]: paged Northwind product catalog over OData, with
//!   `$filter`/`$orderby`/`$top` pushdown and next-link continuation.
//! - [`RestCountriesLookup`]: country currency metadata from restcountries v3.1.
//! - [`CurrencyLayerRates`]: live exchange rates from currencylayer.
//!
//! Payloads are decoded into wire structs with optional fields and converted
//! into typed records once, right after deserialization.
#![warn(missing_docs)]

mod countries;
mod odata;
mod rates;
mod transport;

pub use countries::{RestCountriesBuilder, RestCountriesLookup};
pub use odata::{ODataCatalog, ODataCatalogBuilder};
pub use rates::{CurrencyLayerBuilder, CurrencyLayerRates};

/// Public Northwind OData v3 service.
pub const NORTHWIND_ODATA_URL: &str = "https://services.odata.org/V3/Northwind/Northwind.svc/";
/// restcountries v3.1 API root.
pub const RESTCOUNTRIES_URL: &str = "https://restcountries.com/v3.1/";
/// currencylayer API root.
pub const CURRENCYLAYER_URL: &str = "http://api.currencylayer.com/";
