use std::str::FromStr;

use rapport_core::{CatalogQuery, ProductFilter, ProductOrder, ProductRecord, RapportError};
use rust_decimal::Decimal;
use sqlx::sqlite::{Sqlite, SqliteConnection, SqliteRow};
use sqlx::{QueryBuilder, Row};

use crate::SqlCatalog;

const SELECT: &str = "SELECT p.ProductName, CAST(p.UnitPrice AS TEXT) AS UnitPrice, \
     p.UnitsInStock, p.UnitsOnOrder, p.CategoryID, p.Discontinued, s.Country \
     FROM Products p LEFT JOIN Suppliers s ON s.SupplierID = p.SupplierID";

/// Build the statement reading `limit` rows of `query` starting at `offset`.
///
/// Rows are always ordered with `ProductID` as the last key, so consecutive
/// pages never overlap and equal sort keys keep table order.
pub(crate) fn select_page(
    query: &CatalogQuery,
    limit: usize,
    offset: usize,
) -> Result<QueryBuilder<'static, Sqlite>, RapportError> {
    let mut qb = QueryBuilder::new(SELECT);
    push_filter(&mut qb, query.filter)?;
    qb.push(" ORDER BY ")
        .push(order_clause(query.order)?)
        .push(" LIMIT ")
        .push_bind(as_i64(limit))
        .push(" OFFSET ")
        .push_bind(as_i64(offset));
    Ok(qb)
}

fn push_filter(
    qb: &mut QueryBuilder<'static, Sqlite>,
    filter: ProductFilter,
) -> Result<(), RapportError> {
    // prices bind as text; the column's numeric affinity converts them before comparing
    match filter {
        ProductFilter::All => {}
        ProductFilter::NotDiscontinued => {
            qb.push(" WHERE COALESCE(p.Discontinued, 0) = 0");
        }
        ProductFilter::PricePresent => {
            qb.push(" WHERE p.UnitPrice IS NOT NULL");
        }
        ProductFilter::PriceBelow(bound) => {
            qb.push(" WHERE p.UnitPrice < ").push_bind(bound.to_string());
        }
        ProductFilter::PriceBetween(left, right) => {
            qb.push(" WHERE p.UnitPrice >= ")
                .push_bind(left.to_string())
                .push(" AND p.UnitPrice <= ")
                .push_bind(right.to_string());
        }
        ProductFilter::StockDeficit => {
            qb.push(
                " WHERE p.UnitPrice IS NOT NULL \
                 AND COALESCE(p.UnitsInStock, 0) < COALESCE(p.UnitsOnOrder, 0)",
            );
        }
        other => {
            return Err(RapportError::InvalidArg(format!(
                "{}: unsupported filter {other:?}",
                SqlCatalog::NAME
            )));
        }
    }
    Ok(())
}

fn order_clause(order: Option<ProductOrder>) -> Result<&'static str, RapportError> {
    Ok(match order {
        None => "p.ProductID",
        Some(ProductOrder::NameAsc) => "p.ProductName, p.ProductID",
        Some(ProductOrder::PriceAsc) => "p.UnitPrice, p.ProductID",
        Some(ProductOrder::PriceDesc) => "p.UnitPrice DESC, p.ProductID",
        Some(other) => {
            return Err(RapportError::InvalidArg(format!(
                "{}: unsupported order {other:?}",
                SqlCatalog::NAME
            )));
        }
    })
}

fn as_i64(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Run the page statement on `conn` and decode every row.
pub(crate) async fn fetch_rows(
    conn: &mut SqliteConnection,
    query: &CatalogQuery,
    limit: usize,
    offset: usize,
) -> Result<Vec<ProductRecord>, RapportError> {
    let mut qb = select_page(query, limit, offset)?;
    #[cfg(feature = "tracing")]
    tracing::debug!(connector = SqlCatalog::NAME, sql = qb.sql(), limit, offset, "SELECT");
    let rows = qb
        .build()
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| RapportError::connector(SqlCatalog::NAME, format!("catalog-page: {e}")))?;
    rows.iter().map(record_from_row).collect()
}

fn data_err(column: &str, e: impl std::fmt::Display) -> RapportError {
    RapportError::Data(format!("{}: column {column}: {e}", SqlCatalog::NAME))
}

fn column<T>(row: &SqliteRow, name: &str) -> Result<Option<T>, RapportError>
where
    T: for<'r> sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get::<Option<T>, _>(name).map_err(|e| data_err(name, e))
}

fn count(row: &SqliteRow, name: &str) -> Result<Option<u32>, RapportError> {
    column::<i64>(row, name)?
        .map(|v| u32::try_from(v).map_err(|e| data_err(name, e)))
        .transpose()
}

fn price(row: &SqliteRow) -> Result<Option<Decimal>, RapportError> {
    column::<String>(row, "UnitPrice")?
        .map(|raw| {
            Decimal::from_str(&raw)
                .or_else(|_| Decimal::from_scientific(&raw))
                .map_err(|e| data_err("UnitPrice", e))
        })
        .transpose()
}

fn record_from_row(row: &SqliteRow) -> Result<ProductRecord, RapportError> {
    Ok(ProductRecord {
        name: column::<String>(row, "ProductName")?.unwrap_or_default(),
        unit_price: price(row)?,
        units_in_stock: count(row, "UnitsInStock")?.unwrap_or_default(),
        units_on_order: count(row, "UnitsOnOrder")?.unwrap_or_default(),
        category_id: count(row, "CategoryID")?,
        supplier_country: column::<String>(row, "Country")?.unwrap_or_default(),
        discontinued: column::<i64>(row, "Discontinued")?.is_some_and(|v| v != 0),
    })
}
