//! Rapport builds product reports from a paged catalog source.
//!
//! Overview
//! - Drains every page of a catalog session into one ordered record set.
//! - Evaluates the plain price reports through the pure policies of `rapport_core`.
//! - Enriches current products with the supplier country's currency and a
//!   converted local price, degrading rows whose lookups fail.
//!
//! Key behaviors
//! - Catalog faults are fatal: any failing or timed-out page aborts the report.
//! - Lookup faults are never fatal: a failed country yields empty currency
//!   fields and a failed rate yields a rate of `1`.
//! - Report rows keep source order; enrichment results are joined in
//!   submission order regardless of lookup completion order.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use rapport::Rapport;
//!
//! let rapport = Rapport::builder()
//!     .catalog(Arc::new(rapport_http::ODataCatalog::builder().build()?))
//!     .base_currency("USD")
//!     .build()?;
//!
//! let report = rapport.most_expensive(10).await?;
//! for line in &report {
//!     println!("{}, {}", line.name, line.price);
//! }
//!
//! let local = rapport
//!     .current_products_with_local_price(countries, rates)
//!     .await?;
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod enrich;
mod paging;
mod router;

pub use core::{Rapport, RapportBuilder};
pub use enrich::CurrencyEnrichmentPipeline;
pub use paging::{PagedSource, drain_pages};

pub use rapport_middleware::{
    CountryCacheMiddleware, MemoizedCountryLookup, RateCacheMiddleware, RateTableCache,
    TimeoutMiddleware,
};

pub use rapport_core::{
    CatalogConnector, CatalogQuery, CatalogSession, ContinuationToken, CountryCacheConfig,
    CountryCurrencyLookup, CountryFetch, CurrencyPair, Decimal, ExchangeRateLookup,
    LocalCurrency, LocalPriceLine, Page, ProductFilter, ProductOrder, ProductRecord, RapportConfig,
    RapportError, RateTable, Report, ReportKind, ReportLine, ReportPolicy,
};
