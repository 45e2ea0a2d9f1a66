use std::time::Duration;

use async_trait::async_trait;
use rapport_core::{
    CatalogQuery, CatalogSession, ContinuationToken, Page, ProductRecord, RapportError,
};

use crate::core::{Rapport, tag_err};

const SESSION_CAPABILITY: &str = "catalog-session";
const PAGE_CAPABILITY: &str = "catalog-page";

/// A source that yields records one page at a time.
#[async_trait]
pub trait PagedSource<T>: Send {
    /// Fetch the first page.
    async fn first_page(&mut self) -> Result<Page<T>, RapportError>;

    /// Fetch the page identified by a continuation token.
    async fn next_page(&mut self, token: &ContinuationToken) -> Result<Page<T>, RapportError>;
}

/// Concatenate every page of `source` in fetch order.
///
/// Resumes once per returned token and stops at the first page without one.
/// The first failing fetch aborts the drain and its error is returned as is.
///
/// # Errors
/// Propagates the error of the first page fetch that fails.
pub async fn drain_pages<T, S>(source: &mut S) -> Result<Vec<T>, RapportError>
where
    T: Send,
    S: PagedSource<T> + ?Sized,
{
    let mut out = Vec::new();
    let mut page = source.first_page().await?;
    loop {
        let Page {
            records,
            continuation,
        } = page;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            records = records.len(),
            more = continuation.is_some(),
            "catalog page"
        );
        out.extend(records);
        match continuation {
            Some(token) => page = source.next_page(&token).await?,
            None => return Ok(out),
        }
    }
}

/// One catalog session executing one query, with a timeout on every page.
struct CatalogPages<'a> {
    session: &'a mut dyn CatalogSession,
    query: &'a CatalogQuery,
    connector: &'static str,
    timeout: Duration,
}

#[async_trait]
impl PagedSource<ProductRecord> for CatalogPages<'_> {
    async fn first_page(&mut self) -> Result<Page<ProductRecord>, RapportError> {
        let fut = self.session.query(self.query);
        Rapport::provider_call_with_timeout(self.connector, PAGE_CAPABILITY, self.timeout, fut)
            .await
            .map_err(|e| tag_err(self.connector, e))
    }

    async fn next_page(
        &mut self,
        token: &ContinuationToken,
    ) -> Result<Page<ProductRecord>, RapportError> {
        let fut = self.session.resume(token);
        Rapport::provider_call_with_timeout(self.connector, PAGE_CAPABILITY, self.timeout, fut)
            .await
            .map_err(|e| tag_err(self.connector, e))
    }
}

impl Rapport {
    /// Run `query` against the catalog and return every record of every page.
    ///
    /// A fresh session is opened for the call and dropped before it returns,
    /// on success and on failure alike.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "rapport::paging::fetch_all",
            skip(self),
            fields(connector = self.catalog.name()),
        )
    )]
    pub(crate) async fn fetch_all(
        &self,
        query: &CatalogQuery,
    ) -> Result<Vec<ProductRecord>, RapportError> {
        let connector = self.catalog.name();
        let timeout = self.cfg.provider_timeout;
        let mut session = Self::provider_call_with_timeout(
            connector,
            SESSION_CAPABILITY,
            timeout,
            self.catalog.open_session(),
        )
        .await
        .map_err(|e| tag_err(connector, e))?;

        let mut pages = CatalogPages {
            session: session.as_mut(),
            query,
            connector,
            timeout,
        };
        drain_pages(&mut pages).await
    }
}
