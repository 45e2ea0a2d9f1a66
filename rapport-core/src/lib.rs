//! rapport-core
//!
//! Traits and pure report logic shared across the rapport workspace.
//!
//! - `connector`: the catalog, country-currency and exchange-rate collaborator traits.
//! - `middleware`: wrappers that decorate a collaborator and hand back the same trait object.
//! - `policy`: the filter and aggregation rules behind every plain price report.
//!
#![warn(missing_docs)]

/// Collaborator traits implemented by data source crates.
pub mod connector;
/// Middleware trait implemented by collaborator wrappers.
pub mod middleware;
/// Report policies deriving report variants from a product set.
pub mod policy;

pub use connector::{CatalogConnector, CatalogSession, CountryCurrencyLookup, ExchangeRateLookup};
pub use middleware::Middleware;
pub use policy::ReportPolicy;
pub use rapport_types::*;
