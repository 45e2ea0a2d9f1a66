use rapport::Rapport;
use rapport_demos::common::{get_catalog, get_lookups};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,rapport=trace,rapport_middleware=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let rapport = Rapport::builder().catalog(get_catalog()?).build()?;

    let report = rapport.current_products().await?;
    tracing::info!(rows = report.len(), "current products");

    let (countries, rates) = get_lookups()?;
    let local = rapport
        .current_products_with_local_price(countries, rates)
        .await?;
    tracing::info!(rows = local.len(), "current products with local price");

    Ok(())
}
