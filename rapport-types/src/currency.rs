//! Currency metadata and exchange-rate tables returned by lookup collaborators.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency metadata resolved for a country.
///
/// Every field defaults to the empty string; lookups that cannot resolve a
/// field leave it empty rather than failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocalCurrency {
    /// Official country name, e.g. "Federal Republic of Germany".
    pub country_name: String,
    /// ISO currency code, e.g. "EUR".
    pub currency_code: String,
    /// Display symbol, e.g. "€".
    pub currency_symbol: String,
}

/// A `(base, quote)` currency pair used as the exchange-rate key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency converted from.
    pub base: String,
    /// Currency converted to.
    pub quote: String,
}

impl CurrencyPair {
    /// Build a pair from two currency codes.
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    /// Rate-table key: upper-cased `BASE` followed by `QUOTE`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}", self.base, self.quote).to_uppercase()
    }
}

/// Exchange rates for one base currency keyed by `BASE+QUOTE`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RateTable {
    quotes: HashMap<String, Decimal>,
}

impl RateTable {
    /// Empty table; every lookup falls back to `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a rate under an already-concatenated key. Keys are upper-cased.
    pub fn insert(&mut self, key: impl AsRef<str>, rate: Decimal) {
        self.quotes.insert(key.as_ref().to_uppercase(), rate);
    }

    /// Rate converting `base` into `quote`, or `1` when the pair is absent.
    #[must_use]
    pub fn rate(&self, base: &str, quote: &str) -> Decimal {
        self.get(&CurrencyPair::new(base, quote))
            .unwrap_or(Decimal::ONE)
    }

    /// Rate for a pair, if present.
    #[must_use]
    pub fn get(&self, pair: &CurrencyPair) -> Option<Decimal> {
        self.quotes.get(&pair.key()).copied()
    }

    /// Number of quoted pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether the table holds no quotes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Decimal)> for RateTable {
    fn from_iter<I: IntoIterator<Item = (K, Decimal)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (k, v) in iter {
            table.insert(k, v);
        }
        table
    }
}
