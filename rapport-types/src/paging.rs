//! Page envelopes returned by paged catalog sources.

use serde::{Deserialize, Serialize};

/// Opaque cursor returned by a data source while more pages remain.
///
/// Callers never inspect the contents; they only hand it back to the source
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    /// Wrap a source-specific cursor.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Source-specific cursor contents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One page of records plus the cursor for the next page, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Records yielded by this page, in source order.
    pub records: Vec<T>,
    /// Present while more pages remain.
    pub continuation: Option<ContinuationToken>,
}

impl<T> Page<T> {
    /// A page followed by more pages.
    pub const fn more(records: Vec<T>, token: ContinuationToken) -> Self {
        Self {
            records,
            continuation: Some(token),
        }
    }

    /// The final page.
    pub const fn last(records: Vec<T>) -> Self {
        Self {
            records,
            continuation: None,
        }
    }
}
