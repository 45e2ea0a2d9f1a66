use httpmock::prelude::*;
use rapport_core::{CountryCurrencyLookup, LocalCurrency, RapportError};
use rapport_http::RestCountriesLookup;
use serde_json::json;

fn lookup(server: &MockServer) -> RestCountriesLookup {
    RestCountriesLookup::builder()
        .base_url(server.url("/v3.1"))
        .build()
        .unwrap()
}

#[tokio::test]
async fn takes_official_name_and_first_currency() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v3.1/name/Switzerland");
            then.status(200).json_body(json!([
                {
                    "name": { "common": "Switzerland", "official": "Swiss Confederation" },
                    "currencies": {
                        "CHF": { "name": "Swiss franc", "symbol": "Fr." },
                        "EUR": { "name": "Euro", "symbol": "€" }
                    }
                },
                { "name": { "official": "Ignored" } }
            ]));
        })
        .await;

    let lc = lookup(&server).local_currency("Switzerland").await.unwrap();
    assert_eq!(
        lc,
        LocalCurrency {
            country_name: "Swiss Confederation".into(),
            currency_code: "CHF".into(),
            currency_symbol: "Fr.".into(),
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn missing_fields_default_to_empty() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v3.1/name/Antarctica");
            then.status(200).json_body(json!([{ "name": { "common": "Antarctica" } }]));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v3.1/name/Nowhere");
            then.status(200).json_body(json!([]));
        })
        .await;

    let l = lookup(&server);
    assert_eq!(l.local_currency("Antarctica").await.unwrap(), LocalCurrency::default());
    assert_eq!(l.local_currency("Nowhere").await.unwrap(), LocalCurrency::default());
}

#[tokio::test]
async fn unknown_country_is_not_found() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v3.1/name/Atlantis");
            then.status(404).json_body(json!({ "status": 404, "message": "Not Found" }));
        })
        .await;

    let err = lookup(&server).local_currency("Atlantis").await.unwrap_err();
    assert_eq!(err, RapportError::not_found("country Atlantis"));
}

#[tokio::test]
async fn country_names_are_path_encoded() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/v3.1/name/United%20Kingdom");
            then.status(200).json_body(json!([]));
        })
        .await;

    let _ = lookup(&server).local_currency("United Kingdom").await;
    mock.assert_async().await;
}
