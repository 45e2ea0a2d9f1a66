#[macro_use]
mod macros;

mod local_prices;
mod prices;

use rapport_core::{RapportError, Report, ReportLine, ReportPolicy};

use crate::Rapport;
use crate::core::with_request_deadline;

impl Rapport {
    /// Fetch the policy's query and evaluate the policy over the records.
    ///
    /// Rows from a connector that applied the query keep their catalog order.
    pub(crate) async fn run_policy(
        &self,
        policy: ReportPolicy,
    ) -> Result<Report<ReportLine>, RapportError> {
        with_request_deadline(policy.name(), self.cfg.request_timeout, async {
            let records = self.fetch_all(&policy.query()).await?;
            if self.catalog.applies_query() {
                Ok(policy.evaluate(records))
            } else {
                Ok(policy.apply(records))
            }
        })
        .await
    }
}
