use super::{build_client, fetch_body, parse_json};
use crate::config::CatalogConfig;
use application::catalog::{CatalogError, MangaCatalog};
use async_trait::async_trait;
use model::catalog::CatalogManga;
use reqwest::Client;
use serde::Deserialize;

#[derive(Deserialize)]
struct JikanResponse {
    #[serde(default)]
    data: Vec<JikanManga>,
}

#[derive(Deserialize)]
struct JikanManga {
    mal_id: i64,
    #[serde(default)]
    title: String,
    title_english: Option<String>,
    images: Option<JikanImages>,
    #[serde(rename = "type")]
    kind: Option<String>,
    chapters: Option<i32>,
    volumes: Option<i32>,
    status: Option<String>,
    published: Option<JikanPublished>,
    score: Option<f64>,
    synopsis: Option<String>,
    #[serde(default)]
    authors: Vec<JikanNamed>,
    #[serde(default)]
    genres: Vec<JikanNamed>,
}

#[derive(Deserialize)]
struct JikanImages {
    jpg: Option<JikanImage>,
}

#[derive(Deserialize)]
struct JikanImage {
    image_url: Option<String>,
    large_image_url: Option<String>,
}

#[derive(Deserialize)]
struct JikanPublished {
    from: Option<String>,
    to: Option<String>,
}

#[derive(Deserialize)]
struct JikanNamed {
    name: String,
}

impl From<JikanManga> for CatalogManga {
    fn from(manga: JikanManga) -> Self {
        let image_url = manga
            .images
            .and_then(|i| i.jpg)
            .and_then(|jpg| jpg.large_image_url.or(jpg.image_url))
            .unwrap_or_default();
        let (published_from, published_to) = match manga.published {
            Some(p) => (p.from, p.to),
            None => (None, None),
        };
        CatalogManga {
            mal_id: manga.mal_id,
            title: manga.title,
            title_english: manga.title_english,
            image_url,
            kind: manga.kind,
            status: manga.status,
            chapters: manga.chapters,
            volumes: manga.volumes,
            score: manga.score,
            synopsis: manga.synopsis,
            published_from,
            published_to,
            authors: manga.authors.into_iter().map(|a| a.name).collect(),
            genres: manga.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}

fn parse_mangas(body: &str) -> Result<Vec<CatalogManga>, CatalogError> {
    let response: JikanResponse = parse_json(body)?;
    Ok(response.data.into_iter().map(CatalogManga::from).collect())
}

/// Manga catalog backed by the Jikan API.
pub struct JikanClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl JikanClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            base_url: config.jikan_base_url.clone(),
            page_size: config.page_size,
        })
    }
}

#[async_trait]
impl MangaCatalog for JikanClient {
    async fn top_mangas(&self, page: u32) -> Result<Vec<CatalogManga>, CatalogError> {
        let url = format!("{}top/manga", self.base_url);
        let request = self.client.get(url).query(&[
            ("page", page.to_string()),
            ("limit", self.page_size.to_string()),
        ]);
        parse_mangas(&fetch_body(request).await?)
    }

    async fn search_mangas(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<CatalogManga>, CatalogError> {
        let url = format!("{}manga", self.base_url);
        let request = self.client.get(url).query(&[
            ("q", query.to_string()),
            ("page", page.to_string()),
            ("limit", self.page_size.to_string()),
        ]);
        parse_mangas(&fetch_body(request).await?)
    }
}
