use rapport_core::RateTable;
use rust_decimal::Decimal;

const USD_QUOTES: &[(&str, &str)] = &[
    ("USDAUD", "1.52"),
    ("USDEUR", "0.92"),
    ("USDGBP", "0.79"),
    ("USDJPY", "149.50"),
    ("USDSEK", "10.45"),
    ("USDUSD", "1"),
];

pub fn for_base(base: &str) -> Option<RateTable> {
    if !base.eq_ignore_ascii_case("USD") {
        return None;
    }
    Some(
        USD_QUOTES
            .iter()
            .filter_map(|(k, v)| v.parse::<Decimal>().ok().map(|rate| (*k, rate)))
            .collect(),
    )
}
