// Shared fixtures for the orchestrator tests; each test binary uses a subset.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use rapport::{CatalogConnector, Decimal, LocalCurrency, ProductRecord, Rapport, RateTable};

/// Engine over `catalog` with default configuration.
pub fn rapport_over(catalog: Arc<dyn CatalogConnector>) -> Rapport {
    Rapport::builder().catalog(catalog).build().unwrap()
}

/// Priced record supplied from `country`.
pub fn product(name: &str, price: Decimal, country: &str) -> ProductRecord {
    ProductRecord {
        supplier_country: country.to_string(),
        ..ProductRecord::priced(name, price)
    }
}

/// Priced record in a category.
pub fn in_category(name: &str, price: Decimal, category: u32) -> ProductRecord {
    ProductRecord {
        category_id: Some(category),
        ..ProductRecord::priced(name, price)
    }
}

pub fn currency(country: &str, code: &str, symbol: &str) -> LocalCurrency {
    LocalCurrency {
        country_name: country.to_string(),
        currency_code: code.to_string(),
        currency_symbol: symbol.to_string(),
    }
}

/// USD table with the given `(quote, rate)` entries.
pub fn usd_table(quotes: &[(&str, Decimal)]) -> RateTable {
    quotes
        .iter()
        .map(|(quote, rate)| (format!("USD{quote}"), *rate))
        .collect()
}

pub fn names<T>(lines: &[T], name: impl Fn(&T) -> &str) -> Vec<String> {
    lines.iter().map(|l| name(l).to_string()).collect()
}

pub const fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}
