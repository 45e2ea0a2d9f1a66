use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{CatalogQuery, ProductFilter, ProductOrder, ProductRecord, Report, ReportKind, ReportLine};

/// Filter and aggregation rule behind one plain price report.
///
/// A policy pairs the catalog query pushed down to the source with an
/// in-memory evaluation that runs filter, sort, limit and projection in that
/// order. Evaluation is pure: the same records always produce the same report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ReportPolicy {
    /// Products still on sale, by name.
    CurrentProducts,
    /// The `count` highest-priced products, ties kept in source order.
    MostExpensive {
        /// Number of rows to keep.
        count: usize,
    },
    /// The `count` lowest-priced products, ties kept in source order.
    Cheapest {
        /// Number of rows to keep.
        count: usize,
    },
    /// Products priced strictly below `price`.
    PriceBelow {
        /// Exclusive upper bound.
        price: Decimal,
    },
    /// Products priced within `[left, right]`. A reversed range matches nothing.
    PriceBetween {
        /// Inclusive lower bound.
        left: Decimal,
        /// Inclusive upper bound.
        right: Decimal,
    },
    /// Current products priced above the current products' average.
    AboveAverage,
    /// Priced products with fewer units in stock than on order.
    StockDeficit,
    /// Priced members of the category with the fewest priced members.
    FewestMembersCategory,
    /// Priced members of the category with the smallest price sum.
    MinPriceSumCategory,
}

impl ReportPolicy {
    /// Policy behind a catalogue entry; `None` for reports that need enrichment.
    #[must_use]
    pub const fn for_kind(kind: &ReportKind) -> Option<Self> {
        Some(match *kind {
            ReportKind::CurrentProducts => Self::CurrentProducts,
            ReportKind::MostExpensive(count) => Self::MostExpensive { count },
            ReportKind::PriceBelow(price) => Self::PriceBelow { price },
            ReportKind::PriceBetween(left, right) => Self::PriceBetween { left, right },
            ReportKind::AboveAverage => Self::AboveAverage,
            ReportKind::StockDeficit => Self::StockDeficit,
            ReportKind::Cheapest(count) => Self::Cheapest { count },
            ReportKind::LargestCategory => Self::FewestMembersCategory,
            ReportKind::MostExpensiveCategory => Self::MinPriceSumCategory,
            _ => return None,
        })
    }

    /// Stable label used for logging and request-timeout errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CurrentProducts => "current-products",
            Self::MostExpensive { .. } => "most-expensive-products",
            Self::Cheapest { .. } => "most-cheap-products",
            Self::PriceBelow { .. } => "price-less-then-products",
            Self::PriceBetween { .. } => "price-between-products",
            Self::AboveAverage => "price-above-average-products",
            Self::StockDeficit => "units-in-stock-deficit",
            Self::FewestMembersCategory => "largest-category-products",
            Self::MinPriceSumCategory => "most-expensive-category-products",
        }
    }

    /// Query handed to the catalog source.
    #[must_use]
    pub fn query(&self) -> CatalogQuery {
        match *self {
            Self::CurrentProducts | Self::AboveAverage => {
                CatalogQuery::filtered(ProductFilter::NotDiscontinued)
                    .order_by(ProductOrder::NameAsc)
            }
            Self::MostExpensive { count } => CatalogQuery::filtered(ProductFilter::PricePresent)
                .order_by(ProductOrder::PriceDesc)
                .take(count),
            Self::Cheapest { count } => CatalogQuery::filtered(ProductFilter::PricePresent)
                .order_by(ProductOrder::PriceAsc)
                .take(count),
            Self::PriceBelow { price } => CatalogQuery::filtered(ProductFilter::PriceBelow(price)),
            Self::PriceBetween { left, right } => {
                CatalogQuery::filtered(ProductFilter::PriceBetween(left, right))
            }
            Self::StockDeficit => CatalogQuery::filtered(ProductFilter::StockDeficit),
            Self::FewestMembersCategory | Self::MinPriceSumCategory => {
                CatalogQuery::filtered(ProductFilter::PricePresent)
            }
        }
    }

    /// Evaluate the policy over raw catalog records.
    ///
    /// Runs [`Self::query`] in memory first, then [`Self::evaluate`].
    #[must_use]
    pub fn apply(&self, records: Vec<ProductRecord>) -> Report<ReportLine> {
        self.evaluate(self.query().apply(records))
    }

    /// Aggregate and project rows a source already selected with [`Self::query`].
    ///
    /// Rows are neither filtered nor reordered; the report follows their order.
    #[must_use]
    pub fn evaluate(&self, rows: Vec<ProductRecord>) -> Report<ReportLine> {
        match self {
            Self::AboveAverage => above_average(&rows),
            Self::FewestMembersCategory => {
                let groups = group_by_category(rows);
                groups
                    .into_iter()
                    .min_by_key(|(_, members)| members.len())
                    .map(|(_, members)| project(&members))
                    .unwrap_or_default()
            }
            Self::MinPriceSumCategory => {
                let groups = group_by_category(rows);
                groups
                    .into_iter()
                    .map(|(_, members)| (price_sum(&members).unwrap_or(Decimal::MAX), members))
                    .min_by(|(a, _), (b, _)| a.cmp(b))
                    .map(|(_, members)| project(&members))
                    .unwrap_or_default()
            }
            _ => project(&rows),
        }
    }
}

fn project(rows: &[ProductRecord]) -> Report<ReportLine> {
    rows.iter().map(ProductRecord::to_report_line).collect()
}

fn above_average(rows: &[ProductRecord]) -> Report<ReportLine> {
    if rows.is_empty() {
        return Report::new();
    }
    let average = price_sum(rows)
        .and_then(|total| total.checked_div(Decimal::from(rows.len())))
        .unwrap_or(Decimal::MAX);
    rows.iter()
        .filter(|r| r.report_price() > average)
        .map(ProductRecord::to_report_line)
        .collect()
}

/// Sum of report prices; `None` when it does not fit in a `Decimal`.
fn price_sum(rows: &[ProductRecord]) -> Option<Decimal> {
    rows.iter()
        .map(ProductRecord::report_price)
        .try_fold(Decimal::ZERO, Decimal::checked_add)
}

/// Groups in order of first appearance; members keep their source order.
fn group_by_category(rows: Vec<ProductRecord>) -> Vec<(Option<u32>, Vec<ProductRecord>)> {
    let mut groups: Vec<(Option<u32>, Vec<ProductRecord>)> = Vec::new();
    for row in rows {
        match groups.iter_mut().find(|(key, _)| *key == row.category_id) {
            Some((_, members)) => members.push(row),
            None => groups.push((row.category_id, vec![row])),
        }
    }
    groups
}
