use std::time::Duration;

use rapport_core::RapportError;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

/// Parse a base URL, forcing a trailing slash so relative joins keep the last segment.
pub(crate) fn parse_base(connector: &str, raw: &str) -> Result<Url, RapportError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RapportError::configuration(format!("{connector}: base URL is empty")));
    }
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&with_slash).map_err(|e| {
        RapportError::configuration(format!("{connector}: invalid base URL '{trimmed}': {e}"))
    })
}

pub(crate) fn build_client(
    connector: &str,
    timeout: Option<Duration>,
) -> Result<reqwest::Client, RapportError> {
    let mut builder = reqwest::Client::builder();
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder
        .build()
        .map_err(|e| RapportError::configuration(format!("{connector}: http client: {e}")))
}

fn map_reqwest_err(e: &reqwest::Error, connector: &str, capability: &str) -> RapportError {
    if e.is_timeout() {
        RapportError::provider_timeout(connector, capability)
    } else if e.is_decode() {
        RapportError::Data(format!("{connector}: malformed {capability} payload: {e}"))
    } else {
        RapportError::connector(connector, format!("{capability}: {e}"))
    }
}

/// GET `url` and decode the JSON body.
///
/// 404 maps to `NotFound { what }`, other non-success statuses to
/// `Connector`, client timeouts to `ProviderTimeout`.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: Url,
    connector: &'static str,
    capability: &'static str,
    what: impl FnOnce() -> String,
) -> Result<T, RapportError> {
    #[cfg(feature = "tracing")]
    tracing::debug!(connector, capability, url = %redact(&url), "GET");
    let resp = client
        .get(url)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| map_reqwest_err(&e, connector, capability))?;
    let status = resp.status();
    if status == StatusCode::NOT_FOUND {
        return Err(RapportError::not_found(what()));
    }
    if !status.is_success() {
        return Err(RapportError::connector(
            connector,
            format!("{capability}: HTTP {status}"),
        ));
    }
    resp.json::<T>()
        .await
        .map_err(|e| map_reqwest_err(&e, connector, capability))
}

#[cfg(feature = "tracing")]
fn redact(url: &Url) -> String {
    let mut shown = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "access_key" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    if pairs.is_empty() {
        return shown.to_string();
    }
    shown.query_pairs_mut().clear().extend_pairs(pairs);
    shown.to_string()
}
