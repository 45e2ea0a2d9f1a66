use std::sync::Arc;
use std::time::Duration;

use rapport::{CountryFetch, Rapport, RapportConfig, RapportError};
use rapport_mock::MockCatalog;

fn is_configuration<T>(r: Result<T, RapportError>) -> bool {
    matches!(r, Err(RapportError::Configuration(_)))
}

#[test]
fn missing_catalog_is_rejected() {
    assert!(is_configuration(Rapport::builder().build()));
}

#[test]
fn invalid_settings_are_rejected_before_any_io() {
    let catalog = || Arc::new(MockCatalog::new());
    assert!(is_configuration(
        Rapport::builder().catalog(catalog()).base_currency("  ").build()
    ));
    assert!(is_configuration(
        Rapport::builder()
            .catalog(catalog())
            .provider_timeout(Duration::ZERO)
            .build()
    ));
    assert!(is_configuration(
        Rapport::builder()
            .catalog(catalog())
            .lookup_timeout(Duration::ZERO)
            .build()
    ));
    assert!(is_configuration(
        Rapport::builder()
            .catalog(catalog())
            .request_timeout(Duration::ZERO)
            .build()
    ));
    assert!(is_configuration(
        Rapport::builder()
            .catalog(catalog())
            .max_concurrent_lookups(0)
            .build()
    ));
}

#[test]
fn defaults_and_normalization() {
    let rapport = Rapport::builder()
        .catalog(Arc::new(MockCatalog::new()))
        .base_currency(" usd ")
        .build()
        .unwrap();
    let cfg = rapport.config();
    assert_eq!(cfg.base_currency, "USD");
    assert_eq!(cfg.provider_timeout, Duration::from_secs(5));
    assert_eq!(cfg.lookup_timeout, Duration::from_secs(5));
    assert_eq!(cfg.request_timeout, None);
    assert_eq!(cfg.country_fetch, CountryFetch::PerRow);
    assert_eq!(cfg.max_concurrent_lookups, None);
    assert_eq!(rapport.catalog_name(), "rapport-mock");
}

#[test]
fn whole_config_can_be_supplied() {
    let cfg = RapportConfig {
        country_fetch: CountryFetch::Memoized,
        max_concurrent_lookups: Some(4),
        ..RapportConfig::default()
    };
    let rapport = Rapport::builder()
        .config(cfg)
        .catalog(Arc::new(MockCatalog::new()))
        .build()
        .unwrap();
    assert_eq!(rapport.config().country_fetch, CountryFetch::Memoized);
    assert_eq!(rapport.config().max_concurrent_lookups, Some(4));
}
