//! HTTP clients for the remote catalogs.

pub mod deezer;
pub mod jikan;
pub mod open_opus;

pub use deezer::DeezerClient;
pub use jikan::JikanClient;
pub use open_opus::OpenOpusClient;

use application::catalog::CatalogError;
use log::debug;
use reqwest::{Client, RequestBuilder};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::time::Duration;

const USER_AGENT: &str = concat!("hobbyhub/", env!("CARGO_PKG_VERSION"));
/// Longest slice of an error body kept in an error message.
const BODY_EXCERPT: usize = 200;

pub(crate) fn build_client(timeout_secs: u64) -> Result<Client, CatalogError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| CatalogError::RemoteUnavailable(e.to_string()))
}

/// Sends the request and returns the body of a successful response.
pub(crate) async fn fetch_body(request: RequestBuilder) -> Result<String, CatalogError> {
    let response = request
        .send()
        .await
        .map_err(|e| CatalogError::RemoteUnavailable(e.to_string()))?;
    let status = response.status();
    debug!("{} -> {}", response.url(), status);
    let body = response
        .text()
        .await
        .map_err(|e| CatalogError::RemoteUnavailable(e.to_string()))?;
    if !status.is_success() {
        return Err(CatalogError::UnexpectedStatus(status.as_u16(), excerpt(&body)));
    }
    Ok(body)
}

pub(crate) fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, CatalogError> {
    serde_json::from_str(body).map_err(|e| CatalogError::Malformed(e.to_string()))
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT).collect()
}

/// Accepts an id sent either as a JSON number or as a numeric string.
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}
