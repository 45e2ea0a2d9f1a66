//! rapport-middleware
//!
//! Wrappers for the lookup collaborators used by currency enrichment.
#![warn(missing_docs)]

mod country;
mod rates;
mod timeout;

pub use crate::country::{CountryCacheMiddleware, MemoizedCountryLookup};
pub use crate::rates::{RateCacheMiddleware, RateTableCache};
pub use crate::timeout::{TimedCountryLookup, TimedRateLookup, TimeoutMiddleware};
