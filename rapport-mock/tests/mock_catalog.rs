use std::sync::Arc;

use rapport_core::{
    CatalogConnector, CatalogQuery, CatalogSession, CountryCurrencyLookup, ExchangeRateLookup,
    ProductFilter, RapportError,
};
use rapport_mock::{MockCatalog, MockCountryLookup, MockRateLookup, fixture_products};
use rust_decimal_macros::dec;

#[tokio::test]
async fn pages_cover_the_whole_query_result() {
    let catalog = Arc::new(MockCatalog::new().page_size(4));
    let query = CatalogQuery::filtered(ProductFilter::NotDiscontinued);
    let expected = query.apply(fixture_products());

    let mut collected = Vec::new();
    {
        let mut session = catalog.open_session().await.unwrap();
        let mut page = session.query(&query).await.unwrap();
        loop {
            assert!(page.records.len() <= 4);
            collected.extend(page.records);
            match page.continuation {
                Some(token) => page = session.resume(&token).await.unwrap(),
                None => break,
            }
        }
    }

    assert_eq!(collected, expected);
    assert_eq!(catalog.sessions_opened(), 1);
    assert_eq!(catalog.sessions_closed(), 1);
}

#[tokio::test]
async fn forced_page_failure_is_a_connector_error() {
    let catalog = MockCatalog::new().page_size(3).fail_on_page(1);
    let mut session = catalog.open_session().await.unwrap();
    let first = session.query(&CatalogQuery::all()).await.unwrap();
    let token = first.continuation.expect("more pages");
    let err = session.resume(&token).await.unwrap_err();
    assert!(matches!(err, RapportError::Connector { .. }));
}

#[tokio::test]
async fn without_pushdown_returns_raw_catalog() {
    let catalog = MockCatalog::new().page_size(100).without_pushdown();
    let mut session = catalog.open_session().await.unwrap();
    let page = session
        .query(&CatalogQuery::filtered(ProductFilter::StockDeficit))
        .await
        .unwrap();
    assert_eq!(page.records.len(), fixture_products().len());
    assert!(page.continuation.is_none());
}

#[tokio::test]
async fn country_and_rate_fixtures_resolve() {
    let countries = MockCountryLookup::new();
    let uk = countries.local_currency("UK").await.unwrap();
    assert_eq!(uk.currency_code, "GBP");
    assert_eq!(uk.currency_symbol, "£");
    assert!(matches!(
        countries.local_currency("Atlantis").await,
        Err(RapportError::NotFound { .. })
    ));
    assert!(countries.local_currency("FAIL").await.is_err());

    let rates = MockRateLookup::new().rates("USD").await.unwrap();
    assert_eq!(rates.rate("USD", "GBP"), dec!(0.79));
    assert!(MockRateLookup::new().rates("EUR").await.is_err());
}

#[test]
fn every_fixture_supplier_country_is_known() {
    let countries = MockCountryLookup::new();
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();
    for p in fixture_products() {
        let lc = rt.block_on(countries.local_currency(&p.supplier_country)).unwrap();
        assert!(!lc.currency_code.is_empty(), "{}", p.supplier_country);
    }
}

#[test]
fn pushdown_is_reported_to_callers() {
    assert!(MockCatalog::new().applies_query());
    assert!(!MockCatalog::new().without_pushdown().applies_query());
}
