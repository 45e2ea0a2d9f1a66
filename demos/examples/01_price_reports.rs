use rapport::{Decimal, Rapport, ReportKind};
use rapport_demos::common::get_catalog;
use rapport_demos::render::{heading, price_line};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Catalog (the Northwind fixture when RAPPORT_DEMOS_USE_MOCK is set).
    let rapport = Rapport::builder().catalog(get_catalog()?).build()?;

    // 2. Run a few reports through the typed methods.
    let top = rapport.most_expensive(5).await?;
    println!("{}", heading(&ReportKind::MostExpensive(5)));
    for line in &top {
        println!("{}", price_line(line));
    }

    let (low, high) = (Decimal::from(15), Decimal::from(25));
    let band = rapport.price_between(low, high).await?;
    println!("{}", heading(&ReportKind::PriceBetween(low, high)));
    for line in &band {
        println!("{}", price_line(line));
    }

    // 3. Or parse a command line into a report kind.
    let kind: ReportKind = "units-in-stock-deficit".parse()?;
    println!("{}", heading(&kind));
    for line in &rapport.price_report(kind).await? {
        println!("{}", price_line(line));
    }

    Ok(())
}
