//! Report envelopes and row shapes produced by the orchestrator.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product name with its price; the row of every plain price report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLine {
    /// Product name.
    pub name: String,
    /// Unit price, zero when the catalog has none.
    pub price: Decimal,
}

/// A report line enriched with the supplier country's currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalPriceLine {
    /// Product name.
    pub name: String,
    /// Unit price in the base currency.
    pub price: Decimal,
    /// Official supplier country name; empty when it could not be resolved.
    pub country: String,
    /// `price` multiplied by the base→local exchange rate.
    pub local_price: Decimal,
    /// Local currency symbol; empty when it could not be resolved.
    pub currency_symbol: String,
}

/// Ordered, immutable result set produced by one report invocation.
///
/// Rows keep the order in which they were produced; the report never sorts
/// or deduplicates them. An empty report is a successful, empty result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report<T> {
    lines: Vec<T>,
}

impl<T> Default for Report<T> {
    fn default() -> Self {
        Self { lines: Vec::new() }
    }
}

impl<T> Report<T> {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows in production order.
    #[must_use]
    pub fn lines(&self) -> &[T] {
        &self.lines
    }

    /// Consume the report and return its rows.
    #[must_use]
    pub fn into_lines(self) -> Vec<T> {
        self.lines
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the report has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate rows in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.lines.iter()
    }
}

impl<T> From<Vec<T>> for Report<T> {
    fn from(lines: Vec<T>) -> Self {
        Self { lines }
    }
}

impl<T> FromIterator<T> for Report<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<T> IntoIterator for Report<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Report<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
