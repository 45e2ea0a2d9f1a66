use httpmock::prelude::*;
use rapport_core::{ExchangeRateLookup, RapportError};
use rapport_http::CurrencyLayerRates;
use rust_decimal_macros::dec;
use serde_json::json;

fn rates(server: &MockServer) -> CurrencyLayerRates {
    CurrencyLayerRates::builder()
        .base_url(server.url("/"))
        .access_key("secret")
        .build()
        .unwrap()
}

#[tokio::test]
async fn live_quotes_become_a_rate_table() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/live")
                .query_param("access_key", "secret")
                .query_param_missing("source");
            then.status(200).json_body(json!({
                "success": true,
                "source": "USD",
                "quotes": { "USDEUR": 0.5, "USDJPY": 149.5 }
            }));
        })
        .await;

    let table = rates(&server).rates("USD").await.unwrap();
    assert_eq!(table.rate("USD", "EUR"), dec!(0.5));
    assert_eq!(table.rate("usd", "jpy"), dec!(149.5));
    assert_eq!(table.rate("USD", "XXX"), dec!(1));
    mock.assert_async().await;
}

#[tokio::test]
async fn non_usd_base_is_sent_as_source() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/live").query_param("source", "EUR");
            then.status(200)
                .json_body(json!({ "success": true, "quotes": { "EURUSD": 2 } }));
        })
        .await;

    let table = rates(&server).rates("eur").await.unwrap();
    assert_eq!(table.rate("EUR", "USD"), dec!(2));
    mock.assert_async().await;
}

#[tokio::test]
async fn unsuccessful_response_is_connector_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/live");
            then.status(200).json_body(json!({
                "success": false,
                "error": { "code": 101, "info": "invalid access key" }
            }));
        })
        .await;

    let err = rates(&server).rates("USD").await.unwrap_err();
    match err {
        RapportError::Connector { connector, msg } => {
            assert_eq!(connector, "rapport-currencylayer");
            assert!(msg.contains("101"));
        }
        other => panic!("expected connector error, got {other:?}"),
    }
}

#[test]
fn blank_access_key_is_rejected_at_build() {
    for key in ["", "   "] {
        assert!(matches!(
            CurrencyLayerRates::new(key),
            Err(RapportError::Configuration(_))
        ));
    }
}
