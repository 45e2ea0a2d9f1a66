use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::reports::ReportLine;

/// Snapshot of one catalog product as read from a data source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product display name.
    pub name: String,
    /// Unit price; `None` when the catalog has no price for the product.
    pub unit_price: Option<Decimal>,
    /// Units currently in stock.
    pub units_in_stock: u32,
    /// Units ordered from the supplier and not yet received.
    pub units_on_order: u32,
    /// Category identifier; `None` groups uncategorized products together.
    pub category_id: Option<u32>,
    /// Supplier country name; empty when the supplier is unknown.
    pub supplier_country: String,
    /// Whether the product is no longer sold.
    pub discontinued: bool,
}

impl ProductRecord {
    /// Minimal priced record, handy for fixtures.
    pub fn priced(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            unit_price: Some(price),
            ..Self::default()
        }
    }

    /// Price used in reports: the unit price, or zero when absent.
    #[must_use]
    pub fn report_price(&self) -> Decimal {
        self.unit_price.unwrap_or(Decimal::ZERO)
    }

    /// Project into a plain report line.
    #[must_use]
    pub fn to_report_line(&self) -> ReportLine {
        ReportLine {
            name: self.name.clone(),
            price: self.report_price(),
        }
    }
}
