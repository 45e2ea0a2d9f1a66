use std::time::Duration;

use rapport::{Rapport, ReportKind};
use rapport_demos::common::{get_catalog, get_lookups};
use rapport_demos::render::{heading, local_price_line};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rapport = Rapport::builder()
        .catalog(get_catalog()?)
        .base_currency("USD")
        .lookup_timeout(Duration::from_secs(3))
        .request_timeout(Duration::from_secs(60))
        .build()?;

    // Rows whose lookups fail are still printed, with empty currency fields.
    let (countries, rates) = get_lookups()?;
    let report = rapport
        .current_products_with_local_price(countries, rates)
        .await?;

    println!("{}", heading(&ReportKind::CurrentProductsLocalPrices));
    for line in &report {
        println!("{}", local_price_line(line));
    }
    Ok(())
}
