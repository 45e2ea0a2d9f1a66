use std::str::FromStr;

use async_trait::async_trait;
use rapport_core::{
    CatalogConnector, CatalogQuery, CatalogSession, ContinuationToken, Page, ProductRecord,
    RapportError,
};
use sqlx::Connection;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};

use crate::sql::fetch_rows;

/// Product catalog stored in a Northwind SQLite database.
///
/// The connection string is checked when the catalog is built; the database
/// itself is first touched when a session opens. Sessions open the database
/// read-only and translate every query descriptor into SQL.
#[derive(Debug, Clone)]
pub struct SqlCatalog {
    options: SqliteConnectOptions,
    page_size: usize,
}

impl SqlCatalog {
    /// Connector name used in error tagging.
    pub const NAME: &'static str = "rapport-sql";

    /// Rows per page unless configured otherwise.
    pub const DEFAULT_PAGE_SIZE: usize = 20;

    /// Builder with no connection string set.
    #[must_use]
    pub fn builder() -> SqlCatalogBuilder {
        SqlCatalogBuilder::default()
    }

    /// Catalog over `connection_string`, e.g. `sqlite://northwind.db`.
    ///
    /// # Errors
    /// Returns `Configuration` if the connection string is blank or invalid.
    pub fn new(connection_string: &str) -> Result<Self, RapportError> {
        Self::builder().connection_string(connection_string).build()
    }
}

/// Builder for [`SqlCatalog`].
#[derive(Debug, Default)]
pub struct SqlCatalogBuilder {
    connection_string: Option<String>,
    page_size: Option<usize>,
}

impl SqlCatalogBuilder {
    /// SQLite connection string, e.g. `sqlite://northwind.db`.
    #[must_use]
    pub fn connection_string(mut self, raw: impl Into<String>) -> Self {
        self.connection_string = Some(raw.into());
        self
    }

    /// Rows per page; zero is treated as one.
    #[must_use]
    pub const fn page_size(mut self, n: usize) -> Self {
        self.page_size = Some(n);
        self
    }

    /// Build the catalog.
    ///
    /// # Errors
    /// Returns `Configuration` if the connection string is missing, blank or
    /// cannot be parsed.
    pub fn build(self) -> Result<SqlCatalog, RapportError> {
        let raw = self
            .connection_string
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                RapportError::configuration(format!(
                    "{}: connection string is required",
                    SqlCatalog::NAME
                ))
            })?;
        let options = SqliteConnectOptions::from_str(raw)
            .map_err(|e| {
                RapportError::configuration(format!(
                    "{}: invalid connection string: {e}",
                    SqlCatalog::NAME
                ))
            })?
            .read_only(true);
        Ok(SqlCatalog {
            options,
            page_size: self
                .page_size
                .unwrap_or(SqlCatalog::DEFAULT_PAGE_SIZE)
                .max(1),
        })
    }
}

#[async_trait]
impl CatalogConnector for SqlCatalog {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "SQLite"
    }

    fn applies_query(&self) -> bool {
        true
    }

    async fn open_session(&self) -> Result<Box<dyn CatalogSession>, RapportError> {
        let conn = SqliteConnection::connect_with(&self.options)
            .await
            .map_err(|e| RapportError::connector(Self::NAME, format!("catalog-session: {e}")))?;
        #[cfg(feature = "tracing")]
        tracing::debug!(connector = Self::NAME, "connection opened");
        Ok(Box::new(SqlSession {
            conn,
            page_size: self.page_size,
            query: None,
        }))
    }
}

/// One connection serving one report. Dropping it closes the connection.
struct SqlSession {
    conn: SqliteConnection,
    page_size: usize,
    query: Option<CatalogQuery>,
}

impl SqlSession {
    async fn page_at(&mut self, offset: usize) -> Result<Page<ProductRecord>, RapportError> {
        let query = self.query.as_ref().ok_or_else(|| {
            RapportError::Data(format!("{}: resume called before query", SqlCatalog::NAME))
        })?;
        let limit = query
            .take
            .map_or(self.page_size, |take| self.page_size.min(take.saturating_sub(offset)));
        if limit == 0 {
            return Ok(Page::last(Vec::new()));
        }

        // one extra row tells whether another page follows
        let mut records = fetch_rows(&mut self.conn, query, limit + 1, offset).await?;
        let next = offset + limit;
        if records.len() > limit && query.take.is_none_or(|take| next < take) {
            records.truncate(limit);
            Ok(Page::more(records, ContinuationToken::new(next.to_string())))
        } else {
            records.truncate(limit);
            Ok(Page::last(records))
        }
    }
}

#[async_trait]
impl CatalogSession for SqlSession {
    async fn query(&mut self, query: &CatalogQuery) -> Result<Page<ProductRecord>, RapportError> {
        self.query = Some(query.clone());
        self.page_at(0).await
    }

    async fn resume(
        &mut self,
        token: &ContinuationToken,
    ) -> Result<Page<ProductRecord>, RapportError> {
        let offset = token.as_str().parse::<usize>().map_err(|_| {
            RapportError::Data(format!(
                "{}: invalid continuation token '{}'",
                SqlCatalog::NAME,
                token.as_str()
            ))
        })?;
        self.page_at(offset).await
    }
}
