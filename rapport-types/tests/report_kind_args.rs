use rapport_types::{RapportError, ReportKind};
use rust_decimal_macros::dec;

#[test]
fn parses_every_catalogue_name() {
    for name in ReportKind::NAMES {
        let args: Vec<&str> = match name {
            "price-between-products" => vec![name, "1", "2"],
            "most-expensive-products" | "most-cheap-products" | "price-less-then-products" => {
                vec![name, "3"]
            }
            _ => vec![name],
        };
        let kind = ReportKind::from_args(&args).expect("known report");
        assert_eq!(kind.name(), name);
    }
}

#[test]
fn names_match_case_insensitively() {
    let kind = ReportKind::from_args(&["Most-Expensive-Products", "4"]).unwrap();
    assert_eq!(kind, ReportKind::MostExpensive(4));
}

#[test]
fn rejects_negative_and_malformed_arguments() {
    for args in [
        vec!["most-expensive-products", "-1"],
        vec!["most-cheap-products", "many"],
        vec!["price-less-then-products", "-2.5"],
        vec!["price-between-products", "1", "x"],
        vec!["price-between-products", "1"],
        vec!["most-cheap-products"],
        vec!["no-such-report"],
    ] {
        let err = ReportKind::from_args(&args).unwrap_err();
        assert!(matches!(err, RapportError::InvalidArg(_)), "{args:?} -> {err:?}");
        assert!(!err.is_transport());
    }
    assert!(ReportKind::from_args::<&str>(&[]).is_err());
}

#[test]
fn reversed_range_is_accepted() {
    let kind: ReportKind = "price-between-products 30 10".parse().unwrap();
    assert_eq!(kind, ReportKind::PriceBetween(dec!(30), dec!(10)));
    assert_eq!(kind.to_string(), "price-between-products 30 10");
}

#[test]
fn only_local_price_report_needs_currency() {
    let with: Vec<_> = ReportKind::NAMES
        .iter()
        .filter_map(|n| ReportKind::from_args(&[*n, "1", "2"]).ok())
        .filter(ReportKind::needs_currency)
        .collect();
    assert_eq!(with, [ReportKind::CurrentProductsLocalPrices]);
}
