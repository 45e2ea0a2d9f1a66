//! Report catalogue keyed by command names.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RapportError;

/// One report of the catalogue together with its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ReportKind {
    /// `current-products`
    CurrentProducts,
    /// `most-expensive-products <count>`
    MostExpensive(usize),
    /// `price-less-then-products <price>`
    PriceBelow(Decimal),
    /// `price-between-products <left> <right>`
    PriceBetween(Decimal, Decimal),
    /// `price-above-average-products`
    AboveAverage,
    /// `units-in-stock-deficit`
    StockDeficit,
    /// `most-cheap-products <count>`
    Cheapest(usize),
    /// `largest-category-products`
    LargestCategory,
    /// `most-expensive-category-products`
    MostExpensiveCategory,
    /// `current-products-local-prices`
    CurrentProductsLocalPrices,
}

impl ReportKind {
    /// Every command name, in catalogue order.
    pub const NAMES: [&'static str; 10] = [
        "current-products",
        "most-expensive-products",
        "price-less-then-products",
        "price-between-products",
        "price-above-average-products",
        "units-in-stock-deficit",
        "most-cheap-products",
        "largest-category-products",
        "most-expensive-category-products",
        "current-products-local-prices",
    ];

    /// Parse a command name followed by its arguments.
    ///
    /// Names match case-insensitively. Extra trailing arguments are ignored.
    ///
    /// # Errors
    /// Returns `InvalidArg` for an unknown report name, a missing argument,
    /// or a count or price that is malformed or negative.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, RapportError> {
        let Some((name, rest)) = args.split_first() else {
            return Err(RapportError::InvalidArg("missing report name".into()));
        };
        let name = name.as_ref().to_ascii_lowercase();
        let arg = |i: usize| -> Result<&str, RapportError> {
            rest.get(i).map(AsRef::as_ref).ok_or_else(|| {
                RapportError::InvalidArg(format!("{name}: missing argument {}", i + 1))
            })
        };

        Ok(match name.as_str() {
            "current-products" => Self::CurrentProducts,
            "most-expensive-products" => Self::MostExpensive(parse_count(arg(0)?)?),
            "price-less-then-products" => Self::PriceBelow(parse_price(arg(0)?)?),
            "price-between-products" => {
                Self::PriceBetween(parse_price(arg(0)?)?, parse_price(arg(1)?)?)
            }
            "price-above-average-products" => Self::AboveAverage,
            "units-in-stock-deficit" => Self::StockDeficit,
            "most-cheap-products" => Self::Cheapest(parse_count(arg(0)?)?),
            "largest-category-products" => Self::LargestCategory,
            "most-expensive-category-products" => Self::MostExpensiveCategory,
            "current-products-local-prices" => Self::CurrentProductsLocalPrices,
            other => {
                return Err(RapportError::InvalidArg(format!("unknown report: {other}")));
            }
        })
    }

    /// Command name of this report.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CurrentProducts => Self::NAMES[0],
            Self::MostExpensive(_) => Self::NAMES[1],
            Self::PriceBelow(_) => Self::NAMES[2],
            Self::PriceBetween(..) => Self::NAMES[3],
            Self::AboveAverage => Self::NAMES[4],
            Self::StockDeficit => Self::NAMES[5],
            Self::Cheapest(_) => Self::NAMES[6],
            Self::LargestCategory => Self::NAMES[7],
            Self::MostExpensiveCategory => Self::NAMES[8],
            Self::CurrentProductsLocalPrices => Self::NAMES[9],
        }
    }

    /// Console heading printed above the report rows.
    #[must_use]
    pub fn header(&self) -> String {
        match self {
            Self::CurrentProducts => "current products:".to_string(),
            Self::MostExpensive(n) => format!("{n} most expensive products:"),
            Self::PriceBelow(p) => format!("products with price less than {p}:"),
            Self::PriceBetween(l, r) => format!("Products with price between {l} and {r}:"),
            Self::AboveAverage => "Products with price above average:".to_string(),
            Self::StockDeficit => "Deficit products:".to_string(),
            Self::Cheapest(n) => format!("{n} most cheap products:"),
            Self::LargestCategory => "Products in largest category:".to_string(),
            Self::MostExpensiveCategory => "Products in most expensive category:".to_string(),
            Self::CurrentProductsLocalPrices => "current products with local price:".to_string(),
        }
    }

    /// Whether the report needs the currency lookups.
    #[must_use]
    pub const fn needs_currency(&self) -> bool {
        matches!(self, Self::CurrentProductsLocalPrices)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Self::MostExpensive(n) | Self::Cheapest(n) => write!(f, " {n}"),
            Self::PriceBelow(p) => write!(f, " {p}"),
            Self::PriceBetween(l, r) => write!(f, " {l} {r}"),
            _ => Ok(()),
        }
    }
}

impl FromStr for ReportKind {
    type Err = RapportError;

    /// Parse a whitespace-separated command line such as `most-cheap-products 5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        Self::from_args(&parts)
    }
}

fn parse_count(raw: &str) -> Result<usize, RapportError> {
    let trimmed = raw.trim();
    if trimmed.starts_with('-') {
        return Err(RapportError::InvalidArg(format!(
            "count must not be negative: {trimmed}"
        )));
    }
    trimmed
        .parse::<usize>()
        .map_err(|e| RapportError::InvalidArg(format!("invalid count '{trimmed}': {e}")))
}

fn parse_price(raw: &str) -> Result<Decimal, RapportError> {
    let trimmed = raw.trim();
    let price = Decimal::from_str(trimmed)
        .map_err(|e| RapportError::InvalidArg(format!("invalid price '{trimmed}': {e}")))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(RapportError::InvalidArg(format!(
            "price must not be negative: {trimmed}"
        )));
    }
    Ok(price)
}
