use rapport_core::{Decimal, RapportError, Report, ReportKind, ReportLine, ReportPolicy};

use crate::Rapport;

impl Rapport {
    report_method! {
        /// Products still on sale, ordered by name.
        ///
        /// A catalog that applies queries itself determines the name collation.
        method: current_products(),
        policy: ReportPolicy::CurrentProducts
    }

    report_method! {
        /// The `count` highest-priced products.
        ///
        /// Unpriced products are excluded and equal prices keep catalog order.
        method: most_expensive(count: usize),
        policy: ReportPolicy::MostExpensive { count }
    }

    report_method! {
        /// The `count` lowest-priced products.
        ///
        /// Unpriced products are excluded and equal prices keep catalog order.
        method: cheapest(count: usize),
        policy: ReportPolicy::Cheapest { count }
    }

    report_method! {
        /// Products priced strictly below `price`, in catalog order.
        method: price_below(price: Decimal),
        policy: ReportPolicy::PriceBelow { price }
    }

    report_method! {
        /// Products priced within `[left, right]`, in catalog order.
        ///
        /// The bounds are used as given; `left > right` yields an empty report.
        method: price_between(left: Decimal, right: Decimal),
        policy: ReportPolicy::PriceBetween { left, right }
    }

    report_method! {
        /// Current products priced above the average price of all current products.
        method: above_average(),
        policy: ReportPolicy::AboveAverage
    }

    report_method! {
        /// Priced products with fewer units in stock than on order.
        method: stock_deficit(),
        policy: ReportPolicy::StockDeficit
    }

    report_method! {
        /// Priced members of the category with the fewest priced members.
        ///
        /// Ties go to the category met first in catalog order.
        method: largest_category(),
        policy: ReportPolicy::FewestMembersCategory
    }

    report_method! {
        /// Priced members of the category whose prices sum to the smallest total.
        ///
        /// Ties go to the category met first in catalog order.
        method: most_expensive_category(),
        policy: ReportPolicy::MinPriceSumCategory
    }

    /// Run the plain price report described by `kind`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for reports that need currency lookups; use
    /// [`Rapport::current_products_with_local_price`] for those. Otherwise
    /// fails like the dedicated report method.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "rapport::router", skip(self), fields(report = %kind))
    )]
    pub async fn price_report(&self, kind: ReportKind) -> Result<Report<ReportLine>, RapportError> {
        let policy = ReportPolicy::for_kind(&kind).ok_or_else(|| {
            RapportError::InvalidArg(format!(
                "{} needs currency lookups; use current_products_with_local_price",
                kind.name()
            ))
        })?;
        self.run_policy(policy).await
    }
}
