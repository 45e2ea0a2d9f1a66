use rapport_core::LocalCurrency;

fn lc(country_name: &str, code: &str, symbol: &str) -> LocalCurrency {
    LocalCurrency {
        country_name: country_name.to_string(),
        currency_code: code.to_string(),
        currency_symbol: symbol.to_string(),
    }
}

pub fn by_country(country: &str) -> Option<LocalCurrency> {
    match country.to_ascii_lowercase().as_str() {
        "uk" => Some(lc(
            "United Kingdom of Great Britain and Northern Ireland",
            "GBP",
            "£",
        )),
        "usa" => Some(lc("United States of America", "USD", "$")),
        "japan" => Some(lc("Japan", "JPY", "¥")),
        "spain" => Some(lc("Kingdom of Spain", "EUR", "€")),
        "australia" => Some(lc("Commonwealth of Australia", "AUD", "$")),
        "sweden" => Some(lc("Kingdom of Sweden", "SEK", "kr")),
        "germany" => Some(lc("Federal Republic of Germany", "EUR", "€")),
        _ => None,
    }
}
