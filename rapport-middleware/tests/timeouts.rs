use std::sync::Arc;
use std::time::Duration;

use rapport_core::{CountryCurrencyLookup, ExchangeRateLookup, Middleware, RapportError};
use rapport_middleware::{TimedCountryLookup, TimeoutMiddleware};
use rapport_mock::{DynamicMockLookup, MockBehavior};

#[tokio::test(start_paused = true)]
async fn hanging_country_lookup_times_out_with_connector_name() {
    let (raw, ctrl) = DynamicMockLookup::new_with_controller("slow-countries");
    ctrl.set_country_behavior("Japan", MockBehavior::Hang).await;
    let timed = TimedCountryLookup::new(raw, Duration::from_millis(100));

    let err = timed.local_currency("Japan").await.unwrap_err();
    assert_eq!(
        err,
        RapportError::provider_timeout("slow-countries", "country-currency")
    );
    assert!(err.is_timeout());
}

#[tokio::test(start_paused = true)]
async fn timeout_middleware_wraps_rate_lookups() {
    let (raw, ctrl) = DynamicMockLookup::new_with_controller("slow-rates");
    ctrl.set_rates_behavior("USD", MockBehavior::Hang).await;
    let raw: Arc<dyn ExchangeRateLookup> = raw;
    let mw = Box::new(TimeoutMiddleware::new(Duration::from_secs(1)));
    let timed = Middleware::<dyn ExchangeRateLookup>::apply(mw, raw);

    let err = timed.rates("USD").await.unwrap_err();
    assert!(matches!(
        err,
        RapportError::ProviderTimeout { ref capability, .. } if capability == "exchange-rates"
    ));
}

#[tokio::test(start_paused = true)]
async fn fast_lookups_pass_through() {
    let (raw, ctrl) = DynamicMockLookup::new_with_controller("dyn");
    ctrl.set_country_behavior(
        "Spain",
        MockBehavior::Delay(Duration::from_millis(10), Default::default()),
    )
    .await;
    let raw: Arc<dyn CountryCurrencyLookup> = raw;
    let timed =
        Middleware::<dyn CountryCurrencyLookup>::apply(Box::new(TimeoutMiddleware::new(Duration::from_secs(1))), raw);
    assert!(timed.local_currency("Spain").await.is_ok());
}
