use crate::value::{AlbumId, ArtistId, TrackId};
use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by album stores.
#[derive(Error, Debug)]
pub enum AlbumError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("Duplicate album: {0}")]
    DuplicateKey(AlbumId),
    #[error("Artist {0} does not exist")]
    MissingArtist(ArtistId),
}

/// Album shared by every favorite track it contains.
#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub id: AlbumId,
    pub title: String,
    pub cover_url: String,
    pub artist_id: ArtistId,
    pub track_count: i32,
}

impl Album {
    pub fn new(
        id: AlbumId,
        title: String,
        cover_url: String,
        artist_id: ArtistId,
        track_count: i32,
    ) -> Self {
        Self {
            id,
            title,
            cover_url,
            artist_id,
            track_count,
        }
    }
}

/// Storage of albums, keyed by the catalog album id.
#[async_trait]
pub trait AlbumRepository: Send + Sync {
    async fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, AlbumError>;
    /// Insert or replace, keyed by the external id. The artist must already exist.
    async fn save(&self, album: Album) -> Result<Album, AlbumError>;
    /// Deletes the album together with its tracks. Returns the ids of the removed tracks,
    /// `None` when there is no such album.
    async fn delete_cascade(&self, id: AlbumId) -> Result<Option<Vec<TrackId>>, AlbumError>;
    async fn delete(&self, id: AlbumId) -> Result<bool, AlbumError> {
        Ok(self.delete_cascade(id).await?.is_some())
    }
    async fn list_all(&self) -> Result<Vec<Album>, AlbumError>;
    async fn list_ids(&self) -> Result<HashSet<AlbumId>, AlbumError>;
}
