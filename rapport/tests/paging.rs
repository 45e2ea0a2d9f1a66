mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{ms, rapport_over};
use proptest::prelude::*;
use rapport::{ContinuationToken, Page, ProductRecord, Rapport, RapportError};
use rapport_mock::{MockBehavior, MockCatalog, ScriptedCatalog};
use rust_decimal_macros::dec;

/// Names counting down, so any reordering shows up in the output.
fn reverse_numbered(n: usize) -> Vec<ProductRecord> {
    (0..n)
        .map(|i| ProductRecord::priced(format!("p{:03}", n - i), dec!(1)))
        .collect()
}

proptest! {
    #[test]
    fn paging_concatenates_every_page_in_order(n in 0usize..40, page_size in 1usize..8) {
        let rt = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        rt.block_on(async {
            let records = reverse_numbered(n);
            let (catalog, handle) = ScriptedCatalog::applying_query_with_handle(
                ScriptedCatalog::paged(records.clone(), page_size),
            );
            let rapport = rapport_over(catalog);

            let report = rapport.current_products().await.unwrap();
            let got: Vec<String> = report.into_iter().map(|l| l.name).collect();
            let want: Vec<String> = records.into_iter().map(|r| r.name).collect();
            prop_assert_eq!(got, want);

            let pages = n.div_ceil(page_size).max(1);
            let resumed: Vec<String> = handle
                .resumed_tokens()
                .await
                .iter()
                .map(|t| t.as_str().to_string())
                .collect();
            let expected: Vec<String> = (1..pages).map(|i| format!("page-{i}")).collect();
            prop_assert_eq!(resumed, expected);
            prop_assert_eq!(handle.sessions_opened(), 1);
            prop_assert_eq!(handle.sessions_closed(), 1);
            Ok(())
        })?;
    }
}

#[tokio::test]
async fn one_session_per_report_released_after_success() {
    let catalog = Arc::new(MockCatalog::new().page_size(4));
    let rapport = rapport_over(catalog.clone());

    rapport.current_products().await.unwrap();
    rapport.most_expensive(3).await.unwrap();

    assert_eq!(catalog.sessions_opened(), 2);
    assert_eq!(catalog.sessions_closed(), 2);
}

#[tokio::test]
async fn failing_page_aborts_report_and_releases_session() {
    let catalog = Arc::new(MockCatalog::new().fail_on_page(2));
    let rapport = rapport_over(catalog.clone());

    let err = rapport.current_products().await.unwrap_err();
    assert!(matches!(
        err,
        RapportError::Connector { ref connector, .. } if connector == "rapport-mock"
    ));
    assert_eq!(catalog.sessions_opened(), 1);
    assert_eq!(catalog.sessions_closed(), 1);
}

#[tokio::test(start_paused = true)]
async fn slow_page_is_a_provider_timeout() {
    let (catalog, handle) = ScriptedCatalog::new_with_handle(vec![
        MockBehavior::Return(Page::more(
            vec![ProductRecord::priced("first", dec!(1))],
            ContinuationToken::new("page-1"),
        )),
        MockBehavior::Hang,
    ]);
    let rapport = Rapport::builder()
        .catalog(catalog)
        .provider_timeout(ms(250))
        .build()
        .unwrap();

    let err = rapport.current_products().await.unwrap_err();
    assert_eq!(
        err,
        RapportError::provider_timeout("rapport-scripted", "catalog-page")
    );
    assert_eq!(handle.sessions_closed(), 1);
}

#[tokio::test]
async fn foreign_page_errors_are_tagged_with_the_connector() {
    let (catalog, _handle) = ScriptedCatalog::new_with_handle(vec![MockBehavior::Fail(
        RapportError::Other("socket closed".into()),
    )]);
    let rapport = rapport_over(catalog);

    let err = rapport.stock_deficit().await.unwrap_err();
    assert_eq!(
        err,
        RapportError::connector("rapport-scripted", "unknown error: socket closed")
    );
}

#[tokio::test]
async fn data_errors_pass_through_untagged() {
    let (catalog, _handle) = ScriptedCatalog::new_with_handle(vec![MockBehavior::Return(
        Page::more(Vec::new(), ContinuationToken::new("page-1")),
    )]);
    let rapport = rapport_over(catalog);

    let err = rapport.current_products().await.unwrap_err();
    assert!(matches!(err, RapportError::Data(_)));
}

#[tokio::test(start_paused = true)]
async fn request_deadline_bounds_the_whole_report() {
    let page = |name: &str, next: &str| {
        MockBehavior::Delay(
            Duration::from_secs(2),
            Page::more(
                vec![ProductRecord::priced(name, dec!(1))],
                ContinuationToken::new(next),
            ),
        )
    };
    let (catalog, handle) = ScriptedCatalog::new_with_handle(vec![
        page("a", "page-1"),
        page("b", "page-2"),
        page("c", "page-3"),
    ]);
    let rapport = Rapport::builder()
        .catalog(catalog)
        .provider_timeout(Duration::from_secs(3))
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap();

    let err = rapport.above_average().await.unwrap_err();
    assert_eq!(
        err,
        RapportError::request_timeout("price-above-average-products")
    );
    assert_eq!(handle.sessions_closed(), 1);
}
