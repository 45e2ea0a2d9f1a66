use std::time::Duration;

use httpmock::prelude::*;
use rapport_core::{
    CatalogConnector, CatalogQuery, CatalogSession, ProductFilter, ProductOrder, RapportError,
};
use rapport_http::ODataCatalog;
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn follows_relative_next_link_and_maps_records() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/Northwind.svc/Products")
                .query_param("$expand", "Supplier")
                .query_param("$filter", "Discontinued eq false")
                .query_param("$orderby", "ProductName");
            then.status(200).json_body(json!({
                "value": [
                    {
                        "ProductName": "Chai", "UnitPrice": "18.0000", "UnitsInStock": 39,
                        "UnitsOnOrder": 0, "CategoryID": 1, "Discontinued": false,
                        "Supplier": { "Country": "UK" }
                    },
                    { "ProductName": "Mystery", "UnitPrice": null }
                ],
                "odata.nextLink": "Products?$expand=Supplier&$skiptoken=2"
            }));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/Northwind.svc/Products")
                .query_param("$skiptoken", "2")
                .query_param("$format", "json");
            then.status(200).json_body(json!({
                "value": [{ "ProductName": "Tofu", "UnitPrice": 23.25, "Supplier": { "Country": "Japan" } }]
            }));
        })
        .await;

    let catalog = ODataCatalog::new(&server.url("/Northwind.svc")).unwrap();
    let mut session = catalog.open_session().await.unwrap();
    let query = CatalogQuery::filtered(ProductFilter::NotDiscontinued).order_by(ProductOrder::NameAsc);

    let page = session.query(&query).await.unwrap();
    assert_eq!(page.records.len(), 2);
    assert_eq!(page.records[0].supplier_country, "UK");
    assert_eq!(page.records[0].unit_price, Some(dec!(18)));
    assert_eq!(page.records[0].category_id, Some(1));
    assert_eq!(page.records[1].unit_price, None);
    assert!(page.records[1].supplier_country.is_empty());

    let token = page.continuation.expect("next link");
    let page = session.resume(&token).await.unwrap();
    assert_eq!(page.records[0].name, "Tofu");
    assert_eq!(page.records[0].unit_price, Some(dec!(23.25)));
    assert!(page.continuation.is_none());

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn understands_v4_next_link_and_top() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/svc/Products")
                .query_param("$top", "3")
                .query_param("$orderby", "UnitPrice desc");
            then.status(200).json_body(json!({
                "value": [],
                "@odata.nextLink": "http://elsewhere.invalid/svc/Products?$skiptoken=3"
            }));
        })
        .await;

    let catalog = ODataCatalog::new(&server.url("/svc/")).unwrap();
    let mut session = catalog.open_session().await.unwrap();
    let query = CatalogQuery::filtered(ProductFilter::PricePresent)
        .order_by(ProductOrder::PriceDesc)
        .take(3);
    let page = session.query(&query).await.unwrap();
    assert_eq!(
        page.continuation.unwrap().as_str(),
        "http://elsewhere.invalid/svc/Products?$skiptoken=3"
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn server_errors_map_to_connector_and_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/broken/Products");
            then.status(500);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/missing/Products");
            then.status(404);
        })
        .await;

    let broken = ODataCatalog::new(&server.url("/broken")).unwrap();
    let err = broken
        .open_session()
        .await
        .unwrap()
        .query(&CatalogQuery::all())
        .await
        .unwrap_err();
    assert!(matches!(err, RapportError::Connector { ref connector, .. } if connector == "rapport-odata"));

    let missing = ODataCatalog::new(&server.url("/missing")).unwrap();
    let err = missing
        .open_session()
        .await
        .unwrap()
        .query(&CatalogQuery::all())
        .await
        .unwrap_err();
    assert!(matches!(err, RapportError::NotFound { .. }));
}

#[tokio::test]
async fn client_timeout_maps_to_provider_timeout() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/slow/Products");
            then.status(200).delay(Duration::from_millis(500)).json_body(json!({ "value": [] }));
        })
        .await;

    let catalog = ODataCatalog::builder()
        .base_url(server.url("/slow"))
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let err = catalog
        .open_session()
        .await
        .unwrap()
        .query(&CatalogQuery::all())
        .await
        .unwrap_err();
    assert_eq!(err, RapportError::provider_timeout("rapport-odata", "catalog-page"));
}

#[tokio::test]
async fn pushdown_can_be_disabled() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/raw/Products")
                .query_param("$expand", "Supplier")
                .query_param_missing("$filter");
            then.status(200).json_body(json!({ "value": [] }));
        })
        .await;

    let catalog = ODataCatalog::builder()
        .base_url(server.url("/raw"))
        .pushdown(false)
        .build()
        .unwrap();
    assert!(!catalog.applies_query());
    assert!(ODataCatalog::new("http://localhost/odata/").unwrap().applies_query());
    let page = catalog
        .open_session()
        .await
        .unwrap()
        .query(&CatalogQuery::filtered(ProductFilter::StockDeficit))
        .await
        .unwrap();
    assert!(page.records.is_empty());
    mock.assert_async().await;
}

#[test]
fn unparsable_base_url_is_configuration_error() {
    assert!(matches!(
        ODataCatalog::new("::not a url"),
        Err(RapportError::Configuration(_))
    ));
}
