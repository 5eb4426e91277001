use super::{build_client, fetch_body, flexible_id, parse_json};
use crate::config::CatalogConfig;
use application::catalog::{CatalogError, ClassicalCatalog};
use async_trait::async_trait;
use model::catalog::CatalogWork;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Deserialize)]
struct WorksResponse {
    #[serde(default)]
    works: Vec<OpusWork>,
}

#[derive(Deserialize)]
struct OpusWork {
    #[serde(deserialize_with = "flexible_id")]
    id: i64,
    title: String,
    #[serde(default)]
    genre: String,
    composer: OpusComposer,
}

#[derive(Deserialize)]
struct OpusComposer {
    #[serde(deserialize_with = "flexible_id")]
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    complete_name: String,
}

#[derive(Deserialize)]
struct ComposersResponse {
    #[serde(default)]
    composers: Vec<OpusComposerPortrait>,
}

#[derive(Deserialize)]
struct OpusComposerPortrait {
    #[serde(deserialize_with = "flexible_id")]
    id: i64,
    #[serde(default)]
    portrait: Option<String>,
}

impl From<OpusWork> for CatalogWork {
    fn from(work: OpusWork) -> Self {
        let composer_name = if work.composer.complete_name.is_empty() {
            work.composer.name
        } else {
            work.composer.complete_name
        };
        CatalogWork {
            id: work.id,
            title: work.title,
            genre: work.genre,
            composer_id: work.composer.id,
            composer_name,
        }
    }
}

fn parse_works(body: &str) -> Result<Vec<CatalogWork>, CatalogError> {
    let response: WorksResponse = parse_json(body)?;
    Ok(response.works.into_iter().map(CatalogWork::from).collect())
}

fn parse_portraits(body: &str) -> Result<HashMap<i64, String>, CatalogError> {
    let response: ComposersResponse = parse_json(body)?;
    Ok(response
        .composers
        .into_iter()
        .filter_map(|c| match c.portrait {
            Some(url) if !url.is_empty() => Some((c.id, url)),
            _ => None,
        })
        .collect())
}

/// Classical catalog backed by the Open Opus API.
pub struct OpenOpusClient {
    client: Client,
    base_url: String,
}

impl OpenOpusClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            base_url: config.open_opus_base_url.clone(),
        })
    }
}

#[async_trait]
impl ClassicalCatalog for OpenOpusClient {
    async fn random_works(&self) -> Result<Vec<CatalogWork>, CatalogError> {
        let url = format!("{}dyn/work/random", self.base_url);
        let body = fetch_body(self.client.post(url)).await?;
        parse_works(&body)
    }

    async fn composer_portraits(
        &self,
        composer_ids: &[i64],
    ) -> Result<HashMap<i64, String>, CatalogError> {
        if composer_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let ids: Vec<String> = composer_ids.iter().map(|id| id.to_string()).collect();
        let url = format!("{}composer/list/ids/{}.json", self.base_url, ids.join(","));
        let body = fetch_body(self.client.get(url)).await?;
        parse_portraits(&body)
    }
}
