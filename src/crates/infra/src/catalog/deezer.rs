use super::{build_client, fetch_body, parse_json};
use crate::config::CatalogConfig;
use application::catalog::{CatalogError, MusicCatalog, SearchField};
use async_trait::async_trait;
use domain::value::TrackId;
use model::catalog::{CatalogAlbum, CatalogArtist, CatalogTrack, SearchPage};
use reqwest::Client;
use serde::Deserialize;

#[derive(Deserialize)]
struct DeezerArtist {
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    picture_medium: Option<String>,
    #[serde(default)]
    nb_fan: i32,
}

#[derive(Deserialize)]
struct DeezerAlbum {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    cover_medium: Option<String>,
    #[serde(default)]
    nb_tracks: i32,
}

#[derive(Deserialize)]
struct DeezerTrack {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    rank: i32,
    #[serde(default)]
    duration: i32,
    artist: DeezerArtist,
    album: DeezerAlbum,
}

#[derive(Deserialize)]
struct DeezerList<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    total: u32,
}

#[derive(Deserialize)]
struct DeezerChart {
    tracks: DeezerList<DeezerTrack>,
}

/// Deezer reports failures as `{"error": {...}}` with status 200.
#[derive(Deserialize)]
struct DeezerErrorEnvelope {
    error: DeezerErrorBody,
}

#[derive(Deserialize)]
struct DeezerErrorBody {
    #[serde(default, rename = "type")]
    kind: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: i32,
}

impl From<DeezerTrack> for CatalogTrack {
    fn from(track: DeezerTrack) -> Self {
        CatalogTrack {
            id: track.id,
            title: track.title,
            rank: track.rank,
            duration_secs: track.duration,
            artist: CatalogArtist {
                id: track.artist.id,
                name: track.artist.name,
                picture_url: track.artist.picture_medium.unwrap_or_default(),
                fan_count: track.artist.nb_fan,
            },
            album: CatalogAlbum {
                id: track.album.id,
                title: track.album.title,
                cover_url: track.album.cover_medium.unwrap_or_default(),
                track_count: track.album.nb_tracks,
            },
        }
    }
}

fn check_error(body: &str) -> Result<(), CatalogError> {
    if let Ok(envelope) = serde_json::from_str::<DeezerErrorEnvelope>(body) {
        let e = envelope.error;
        return Err(CatalogError::UnexpectedStatus(
            200,
            format!("{} {}: {}", e.kind, e.code, e.message),
        ));
    }
    Ok(())
}

fn parse_chart(body: &str) -> Result<Vec<CatalogTrack>, CatalogError> {
    check_error(body)?;
    let chart: DeezerChart = parse_json(body)?;
    Ok(chart.tracks.data.into_iter().map(CatalogTrack::from).collect())
}

fn parse_search(body: &str, page: u32, page_size: u32) -> Result<SearchPage<CatalogTrack>, CatalogError> {
    check_error(body)?;
    let list: DeezerList<DeezerTrack> = parse_json(body)?;
    let items = list.data.into_iter().map(CatalogTrack::from).collect();
    Ok(SearchPage::new(items, page, page_size, list.total))
}

/// Offset of the first result on `page`. Widened so the last page numbers cannot overflow.
fn search_index(page: u32, page_size: u32) -> u64 {
    u64::from(page.saturating_sub(1)) * u64::from(page_size)
}

fn parse_track(body: &str) -> Result<CatalogTrack, CatalogError> {
    check_error(body)?;
    let track: DeezerTrack = parse_json(body)?;
    Ok(track.into())
}

/// Music catalog backed by the Deezer API.
pub struct DeezerClient {
    client: Client,
    base_url: String,
    page_size: u32,
}

impl DeezerClient {
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        Ok(Self {
            client: build_client(config.timeout_secs)?,
            base_url: config.deezer_base_url.clone(),
            page_size: config.page_size,
        })
    }
}

#[async_trait]
impl MusicCatalog for DeezerClient {
    async fn chart_tracks(&self) -> Result<Vec<CatalogTrack>, CatalogError> {
        let url = format!("{}chart", self.base_url);
        let body = fetch_body(self.client.get(url)).await?;
        parse_chart(&body)
    }

    async fn search_tracks(
        &self,
        query: &str,
        field: SearchField,
        page: u32,
    ) -> Result<SearchPage<CatalogTrack>, CatalogError> {
        let url = format!("{}search/track", self.base_url);
        let q = format!("{}:\"{}\"", field.api_value(), query);
        let index = search_index(page, self.page_size);
        let request = self.client.get(url).query(&[
            ("q", q),
            ("index", index.to_string()),
            ("limit", self.page_size.to_string()),
        ]);
        let body = fetch_body(request).await?;
        parse_search(&body, page, self.page_size)
    }

    async fn track(&self, id: TrackId) -> Result<CatalogTrack, CatalogError> {
        let url = format!("{}track/{}", self.base_url, id);
        let body = fetch_body(self.client.get(url)).await?;
        parse_track(&body)
    }
}
