use std::fmt::Write as _;
use std::time::Duration;

use async_trait::async_trait;
use rapport_core::{
    CatalogConnector, CatalogQuery, CatalogSession, ContinuationToken, Page, ProductFilter,
    ProductOrder, ProductRecord, RapportError,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use url::Url;

use crate::NORTHWIND_ODATA_URL;
use crate::transport::{build_client, get_json, parse_base};

const CAPABILITY: &str = "catalog-page";

/// Product catalog served by a Northwind OData endpoint.
///
/// Each session issues `GET Products?$expand=Supplier` and follows the
/// service's next links. With pushdown enabled the query descriptor is
/// translated into `$filter`, `$orderby` and `$top`.
#[derive(Clone)]
pub struct ODataCatalog {
    client: reqwest::Client,
    base: Url,
    pushdown: bool,
}

impl ODataCatalog {
    /// Connector name used in error tagging.
    pub const NAME: &'static str = "rapport-odata";

    /// Builder preset with the public Northwind service.
    #[must_use]
    pub fn builder() -> ODataCatalogBuilder {
        ODataCatalogBuilder::default()
    }

    /// Catalog at `base_url` with default settings.
    ///
    /// # Errors
    /// Returns `Configuration` if the URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self, RapportError> {
        Self::builder().base_url(base_url).build()
    }

    fn products_url(&self, query: &CatalogQuery) -> Result<Url, RapportError> {
        let mut url = self
            .base
            .join("Products")
            .map_err(|e| RapportError::configuration(format!("{}: {e}", Self::NAME)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("$expand", "Supplier");
            if self.pushdown {
                if let Some(filter) = filter_expr(query.filter) {
                    pairs.append_pair("$filter", &filter);
                }
                if let Some(order) = query.order.and_then(order_expr) {
                    pairs.append_pair("$orderby", order);
                }
                if let Some(top) = query.take {
                    pairs.append_pair("$top", &top.to_string());
                }
            }
            pairs.append_pair("$format", "json");
        }
        Ok(url)
    }

    fn next_url(&self, token: &ContinuationToken) -> Result<Url, RapportError> {
        let mut url = self.base.join(token.as_str()).map_err(|e| {
            RapportError::Data(format!("{}: invalid next link '{}': {e}", Self::NAME, token.as_str()))
        })?;
        if !url.query_pairs().any(|(k, _)| k == "$format") {
            url.query_pairs_mut().append_pair("$format", "json");
        }
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Page<ProductRecord>, RapportError> {
        let feed: ODataFeed = get_json(&self.client, url, Self::NAME, CAPABILITY, || {
            "Products entity set".to_string()
        })
        .await?;
        Ok(feed.into_page())
    }
}

/// Builder for [`ODataCatalog`].
pub struct ODataCatalogBuilder {
    base_url: String,
    timeout: Option<Duration>,
    pushdown: bool,
    client: Option<reqwest::Client>,
}

impl Default for ODataCatalogBuilder {
    fn default() -> Self {
        Self {
            base_url: NORTHWIND_ODATA_URL.to_string(),
            timeout: None,
            pushdown: true,
            client: None,
        }
    }
}

impl ODataCatalogBuilder {
    /// Service root, e.g. `https://services.odata.org/V3/Northwind/Northwind.svc`.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// HTTP client timeout applied to every request.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Whether to translate query descriptors into OData options (default `true`).
    #[must_use]
    pub const fn pushdown(mut self, enabled: bool) -> Self {
        self.pushdown = enabled;
        self
    }

    /// Use a preconfigured HTTP client; `timeout` is then ignored.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the catalog.
    ///
    /// # Errors
    /// Returns `Configuration` for an unparsable base URL or client setup failure.
    pub fn build(self) -> Result<ODataCatalog, RapportError> {
        let base = parse_base(ODataCatalog::NAME, &self.base_url)?;
        let client = match self.client {
            Some(c) => c,
            None => build_client(ODataCatalog::NAME, self.timeout)?,
        };
        Ok(ODataCatalog {
            client,
            base,
            pushdown: self.pushdown,
        })
    }
}

#[async_trait]
impl CatalogConnector for ODataCatalog {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn vendor(&self) -> &'static str {
        "OData"
    }

    fn applies_query(&self) -> bool {
        self.pushdown
    }

    async fn open_session(&self) -> Result<Box<dyn CatalogSession>, RapportError> {
        Ok(Box::new(ODataSession {
            catalog: self.clone(),
        }))
    }
}

struct ODataSession {
    catalog: ODataCatalog,
}

#[async_trait]
impl CatalogSession for ODataSession {
    async fn query(&mut self, query: &CatalogQuery) -> Result<Page<ProductRecord>, RapportError> {
        let url = self.catalog.products_url(query)?;
        self.catalog.fetch(url).await
    }

    async fn resume(
        &mut self,
        token: &ContinuationToken,
    ) -> Result<Page<ProductRecord>, RapportError> {
        let url = self.catalog.next_url(token)?;
        self.catalog.fetch(url).await
    }
}

fn decimal_literal(d: Decimal) -> String {
    format!("{d}M")
}

fn filter_expr(filter: ProductFilter) -> Option<String> {
    let mut out = String::new();
    match filter {
        ProductFilter::NotDiscontinued => out.push_str("Discontinued eq false"),
        ProductFilter::PricePresent => out.push_str("UnitPrice ne null"),
        ProductFilter::PriceBelow(x) => {
            let _ = write!(out, "UnitPrice lt {}", decimal_literal(x));
        }
        ProductFilter::PriceBetween(l, r) => {
            let _ = write!(
                out,
                "UnitPrice ge {} and UnitPrice le {}",
                decimal_literal(l),
                decimal_literal(r)
            );
        }
        ProductFilter::StockDeficit => {
            out.push_str("UnitPrice ne null and UnitsInStock lt UnitsOnOrder");
        }
        _ => return None,
    }
    Some(out)
}

const fn order_expr(order: ProductOrder) -> Option<&'static str> {
    match order {
        ProductOrder::NameAsc => Some("ProductName"),
        ProductOrder::PriceAsc => Some("UnitPrice"),
        ProductOrder::PriceDesc => Some("UnitPrice desc"),
        _ => None,
    }
}

#[derive(Deserialize)]
struct ODataFeed {
    #[serde(default)]
    value: Vec<WireProduct>,
    #[serde(rename = "odata.nextLink")]
    next_link: Option<String>,
    #[serde(rename = "@odata.nextLink")]
    at_next_link: Option<String>,
    d: Option<VerboseFeed>,
}

#[derive(Deserialize)]
struct VerboseFeed {
    #[serde(default)]
    results: Vec<WireProduct>,
    #[serde(rename = "__next")]
    next: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireProduct {
    product_name: Option<String>,
    unit_price: Option<Decimal>,
    units_in_stock: Option<u32>,
    units_on_order: Option<u32>,
    #[serde(rename = "CategoryID")]
    category_id: Option<u32>,
    discontinued: Option<bool>,
    supplier: Option<WireSupplier>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct WireSupplier {
    country: Option<String>,
}

impl From<WireProduct> for ProductRecord {
    fn from(w: WireProduct) -> Self {
        Self {
            name: w.product_name.unwrap_or_default(),
            unit_price: w.unit_price,
            units_in_stock: w.units_in_stock.unwrap_or_default(),
            units_on_order: w.units_on_order.unwrap_or_default(),
            category_id: w.category_id,
            supplier_country: w.supplier.and_then(|s| s.country).unwrap_or_default(),
            discontinued: w.discontinued.unwrap_or_default(),
        }
    }
}

impl ODataFeed {
    fn into_page(self) -> Page<ProductRecord> {
        let (wire, next) = match self.d {
            Some(verbose) if self.value.is_empty() => (verbose.results, verbose.next),
            _ => (self.value, self.next_link.or(self.at_next_link)),
        };
        let records = wire.into_iter().map(ProductRecord::from).collect();
        match next.filter(|link| !link.is_empty()) {
            Some(link) => Page::more(records, ContinuationToken::new(link)),
            None => Page::last(records),
        }
    }
}
