use rapport::{CountryCacheConfig, CountryFetch, Rapport};
use rapport_demos::common::{get_catalog, get_lookups};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Resolve each supplier country once instead of once per product row,
    // and enrich at most four rows at a time.
    let rapport = Rapport::builder()
        .catalog(get_catalog()?)
        .country_fetch(CountryFetch::Memoized)
        .country_cache(CountryCacheConfig {
            max_entries: 64,
            ttl: None,
        })
        .max_concurrent_lookups(4)
        .build()?;

    let (countries, rates) = get_lookups()?;
    let report = rapport
        .current_products_with_local_price(countries, rates)
        .await?;

    let unresolved = report.iter().filter(|l| l.country.is_empty()).count();
    println!(
        "{} products enriched, {unresolved} without a resolved country",
        report.len()
    );
    Ok(())
}
