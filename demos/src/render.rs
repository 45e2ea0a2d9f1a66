//! Console rendering of report rows.

use rapport::{LocalPriceLine, ReportKind, ReportLine};

/// Heading printed before the rows of a report.
#[must_use]
pub fn heading(kind: &ReportKind) -> String {
    format!("Report - {}", kind.header())
}

/// `name, price`
#[must_use]
pub fn price_line(line: &ReportLine) -> String {
    format!("{}, {}", line.name, line.price)
}

/// `name, price$, country, local_price symbol`
#[must_use]
pub fn local_price_line(line: &LocalPriceLine) -> String {
    format!(
        "{}, {}$, {}, {}{}",
        line.name, line.price, line.country, line.local_price, line.currency_symbol
    )
}

/// Usage text listing every report name.
#[must_use]
pub fn usage() -> String {
    let mut out = String::from("usage: reporting-app <report> [args]\n\nreports:\n");
    for name in ReportKind::NAMES {
        let args = match name {
            "most-expensive-products" | "most-cheap-products" => " <count>",
            "price-less-then-products" => " <price>",
            "price-between-products" => " <left> <right>",
            _ => "",
        };
        out.push_str("  ");
        out.push_str(name);
        out.push_str(args);
        out.push('\n');
    }
    out
}
