use std::time::Duration;

use rapport_core::{
    CatalogConnector, CatalogQuery, CatalogSession, ContinuationToken, CountryCurrencyLookup,
    ExchangeRateLookup, LocalCurrency, ProductRecord, RapportError,
};
use rapport_mock::{DynamicMockLookup, MockBehavior, ScriptedCatalog};
use rust_decimal_macros::dec;

#[tokio::test]
async fn dynamic_lookup_follows_controller_rules_and_logs_calls() {
    let (lookup, ctrl) = DynamicMockLookup::new_with_controller("dyn");
    let lc = LocalCurrency {
        country_name: "Japan".into(),
        currency_code: "JPY".into(),
        currency_symbol: "¥".into(),
    };
    ctrl.set_country_behavior("Japan", MockBehavior::Return(lc.clone())).await;
    ctrl.set_country_behavior("Nowhere", MockBehavior::Fail(RapportError::connector("dyn", "down")))
        .await;

    assert_eq!(lookup.local_currency("Japan").await.unwrap(), lc);
    assert!(lookup.local_currency("Nowhere").await.is_err());
    assert!(matches!(
        lookup.local_currency("Unset").await,
        Err(RapportError::NotFound { .. })
    ));
    assert!(lookup.rates("USD").await.is_err());

    assert_eq!(ctrl.country_calls().await, ["Japan", "Nowhere", "Unset"]);
    assert_eq!(ctrl.country_call_count("Japan").await, 1);
    assert_eq!(ctrl.rate_calls().await, ["USD"]);
}

#[tokio::test(start_paused = true)]
async fn hang_never_resolves() {
    let (lookup, ctrl) = DynamicMockLookup::new_with_controller("dyn");
    ctrl.set_country_behavior("Slow", MockBehavior::Hang).await;
    let res = tokio::time::timeout(Duration::from_secs(60), lookup.local_currency("Slow")).await;
    assert!(res.is_err());
}

#[tokio::test]
async fn scripted_catalog_replays_steps_and_records_tokens() {
    let rows: Vec<_> = (0..5)
        .map(|i| ProductRecord::priced(format!("p{i}"), dec!(1)))
        .collect();
    let (catalog, handle) = ScriptedCatalog::new_with_handle(ScriptedCatalog::paged(rows, 2));

    {
        let mut session = catalog.open_session().await.unwrap();
        let first = session.query(&CatalogQuery::all()).await.unwrap();
        assert_eq!(first.records.len(), 2);
        let t1 = first.continuation.unwrap();
        let second = session.resume(&t1).await.unwrap();
        let t2 = second.continuation.unwrap();
        let third = session.resume(&t2).await.unwrap();
        assert_eq!(third.records.len(), 1);
        assert!(third.continuation.is_none());
        assert!(matches!(
            session.resume(&t2).await,
            Err(RapportError::Data(_))
        ));
    }

    assert_eq!(
        handle.resumed_tokens().await,
        [
            ContinuationToken::new("page-1"),
            ContinuationToken::new("page-2"),
            ContinuationToken::new("page-2"),
        ]
    );
    assert_eq!(handle.queries().await, [CatalogQuery::all()]);
    assert_eq!(handle.sessions_opened(), 1);
    assert_eq!(handle.sessions_closed(), 1);
}
