use crate::value::{ArtistId, TrackId};
use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by artist stores.
#[derive(Error, Debug)]
pub enum ArtistError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("Duplicate artist: {0}")]
    DuplicateKey(ArtistId),
}

/// Artist referenced by at least one favorite track or album.
#[derive(Debug, Clone, PartialEq)]
pub struct Artist {
    pub id: ArtistId,
    pub name: String,
    pub picture_url: String,
    pub fan_count: i32,
}

impl Artist {
    pub fn new(id: ArtistId, name: String, picture_url: String, fan_count: i32) -> Self {
        Self {
            id,
            name,
            picture_url,
            fan_count,
        }
    }
}

/// Storage of artists, keyed by the catalog artist id.
#[async_trait]
pub trait ArtistRepository: Send + Sync {
    async fn find_by_id(&self, id: ArtistId) -> Result<Option<Artist>, ArtistError>;
    /// Insert or replace, keyed by the external id.
    async fn save(&self, artist: Artist) -> Result<Artist, ArtistError>;
    /// Deletes the artist together with its albums and tracks in one write. Returns the
    /// ids of the removed tracks, `None` when there is no such artist.
    async fn delete_cascade(&self, id: ArtistId) -> Result<Option<Vec<TrackId>>, ArtistError>;
    async fn delete(&self, id: ArtistId) -> Result<bool, ArtistError> {
        Ok(self.delete_cascade(id).await?.is_some())
    }
    async fn list_all(&self) -> Result<Vec<Artist>, ArtistError>;
    async fn list_ids(&self) -> Result<HashSet<ArtistId>, ArtistError>;
}
