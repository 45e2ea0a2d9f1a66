//! Catalog query descriptors.
//!
//! A descriptor is handed to a catalog source, which may translate it into a
//! native query or ignore it. `CatalogQuery::apply` evaluates the same
//! descriptor in memory, and applying it to an already-evaluated result
//! leaves that result unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::product::ProductRecord;

/// Row predicate of a catalog query.
///
/// Rows without a unit price never satisfy a price comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ProductFilter {
    /// Every product.
    #[default]
    All,
    /// Products still on sale.
    NotDiscontinued,
    /// Products with a unit price.
    PricePresent,
    /// Products priced strictly below the bound.
    PriceBelow(Decimal),
    /// Products priced within `[left, right]`, both ends inclusive.
    PriceBetween(Decimal, Decimal),
    /// Priced products with fewer units in stock than on order.
    StockDeficit,
}

impl ProductFilter {
    /// Whether `p` satisfies the predicate.
    #[must_use]
    pub fn matches(&self, p: &ProductRecord) -> bool {
        match *self {
            Self::All => true,
            Self::NotDiscontinued => !p.discontinued,
            Self::PricePresent => p.unit_price.is_some(),
            Self::PriceBelow(bound) => p.unit_price.is_some_and(|price| price < bound),
            Self::PriceBetween(left, right) => p
                .unit_price
                .is_some_and(|price| left <= price && price <= right),
            Self::StockDeficit => {
                p.unit_price.is_some() && p.units_in_stock < p.units_on_order
            }
        }
    }
}

/// Sort key of a catalog query. Sorting is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ProductOrder {
    /// Product name, ascending.
    NameAsc,
    /// Unit price, ascending.
    PriceAsc,
    /// Unit price, descending.
    PriceDesc,
}

/// Filter, sort and limit applied to the product catalog, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogQuery {
    /// Row predicate.
    pub filter: ProductFilter,
    /// Optional sort key.
    pub order: Option<ProductOrder>,
    /// Optional row limit applied after sorting.
    pub take: Option<usize>,
}

impl CatalogQuery {
    /// Query returning the whole catalog in source order.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Query with the given predicate, no ordering and no limit.
    #[must_use]
    pub fn filtered(filter: ProductFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Set the sort key.
    #[must_use]
    pub const fn order_by(mut self, order: ProductOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the row limit.
    #[must_use]
    pub const fn take(mut self, count: usize) -> Self {
        self.take = Some(count);
        self
    }

    /// Evaluate the descriptor over `records`.
    #[must_use]
    pub fn apply(&self, records: Vec<ProductRecord>) -> Vec<ProductRecord> {
        let mut out: Vec<ProductRecord> = records
            .into_iter()
            .filter(|p| self.filter.matches(p))
            .collect();
        match self.order {
            Some(ProductOrder::NameAsc) => out.sort_by(|a, b| a.name.cmp(&b.name)),
            Some(ProductOrder::PriceAsc) => out.sort_by(|a, b| a.unit_price.cmp(&b.unit_price)),
            Some(ProductOrder::PriceDesc) => out.sort_by(|a, b| b.unit_price.cmp(&a.unit_price)),
            None => {}
        }
        if let Some(n) = self.take {
            out.truncate(n);
        }
        out
    }
}
