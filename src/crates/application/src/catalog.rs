//! Interfaces of the remote catalogs. Implementations live in `infra::catalog`.

use async_trait::async_trait;
use domain::value::TrackId;
use model::catalog::{CatalogManga, CatalogTrack, CatalogWork, SearchPage};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Items per page for every paged catalog endpoint.
pub const PAGE_SIZE: u32 = 20;

/// Why a remote catalog call failed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Catalog unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("Catalog responded with status {0}: {1}")]
    UnexpectedStatus(u16, String),
    #[error("Malformed catalog response: {0}")]
    Malformed(String),
}

/// Which field a music search matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Track,
    Album,
    Artist,
}

impl SearchField {
    pub fn api_value(&self) -> &'static str {
        match self {
            SearchField::Track => "track",
            SearchField::Album => "album",
            SearchField::Artist => "artist",
        }
    }
}

impl FromStr for SearchField {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "track" | "name" => Ok(SearchField::Track),
            "album" => Ok(SearchField::Album),
            "artist" => Ok(SearchField::Artist),
            other => Err(format!("unknown search field: {}", other)),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.api_value())
    }
}

#[async_trait]
pub trait MusicCatalog: Send + Sync {
    async fn chart_tracks(&self) -> Result<Vec<CatalogTrack>, CatalogError>;
    /// `page` starts at 1.
    async fn search_tracks(
        &self,
        query: &str,
        field: SearchField,
        page: u32,
    ) -> Result<SearchPage<CatalogTrack>, CatalogError>;
    async fn track(&self, id: TrackId) -> Result<CatalogTrack, CatalogError>;
}

#[async_trait]
pub trait ClassicalCatalog: Send + Sync {
    async fn random_works(&self) -> Result<Vec<CatalogWork>, CatalogError>;
    /// Portrait URL per composer id. Composers without a portrait are absent from the map.
    async fn composer_portraits(
        &self,
        composer_ids: &[i64],
    ) -> Result<HashMap<i64, String>, CatalogError>;
}

#[async_trait]
pub trait MangaCatalog: Send + Sync {
    async fn top_mangas(&self, page: u32) -> Result<Vec<CatalogManga>, CatalogError>;
    async fn search_mangas(&self, query: &str, page: u32)
        -> Result<Vec<CatalogManga>, CatalogError>;
}
