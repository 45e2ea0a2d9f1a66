//! Rapport-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod config;
mod currency;
mod error;
mod kind;
mod paging;
mod product;
mod query;
mod reports;

pub use config::{CountryCacheConfig, CountryFetch, RapportConfig};
pub use currency::{CurrencyPair, LocalCurrency, RateTable};
pub use error::RapportError;
pub use kind::ReportKind;
pub use paging::{ContinuationToken, Page};
pub use product::ProductRecord;
pub use query::{CatalogQuery, ProductFilter, ProductOrder};
pub use reports::{LocalPriceLine, Report, ReportLine};

pub use rust_decimal::Decimal;
