use crate::event::DomainEvent;
use crate::value::{AlbumId, ArtistId, TrackId};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by track stores.
#[derive(Error, Debug)]
pub enum TrackError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("Duplicate track: {0}")]
    DuplicateKey(TrackId),
    #[error("Track {0} references missing artist {1}")]
    MissingArtist(TrackId, ArtistId),
    #[error("Track {0} references missing album {1}")]
    MissingAlbum(TrackId, AlbumId),
}

/// Changes to the set of favorite tracks.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackEvent {
    Favorited {
        track_id: TrackId,
        artist_id: ArtistId,
        album_id: AlbumId,
    },
    Unfavorited {
        track_id: TrackId,
    },
}

impl DomainEvent for TrackEvent {
    fn aggregate_id(&self) -> i64 {
        match self {
            TrackEvent::Favorited { track_id, .. } => track_id.as_i64(),
            TrackEvent::Unfavorited { track_id } => track_id.as_i64(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            TrackEvent::Favorited { .. } => "track_favorited",
            TrackEvent::Unfavorited { .. } => "track_unfavorited",
        }
    }
}

/// A favorite track. The row existing is what makes the track a favorite.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub duration_secs: i32,
    pub rank: i32,
    pub artist_id: ArtistId,
    pub album_id: AlbumId,
    pub cover_url: String,
    pub favorited_at: NaiveDateTime,
    pub pending_events: Vec<TrackEvent>,
}

impl Track {
    pub fn favorite(
        id: TrackId,
        title: String,
        duration_secs: i32,
        rank: i32,
        artist_id: ArtistId,
        album_id: AlbumId,
        cover_url: String,
    ) -> Self {
        let mut track = Self {
            id,
            title,
            duration_secs,
            rank,
            artist_id,
            album_id,
            cover_url,
            favorited_at: Utc::now().naive_utc(),
            pending_events: Vec::new(),
        };
        track.pending_events.push(TrackEvent::Favorited {
            track_id: id,
            artist_id,
            album_id,
        });
        track
    }

    pub fn unfavorite(&mut self) {
        self.pending_events
            .push(TrackEvent::Unfavorited { track_id: self.id });
    }

    pub fn pop_events(&mut self) -> Vec<TrackEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

/// Storage of favorite tracks. A stored track is a favorite.
#[async_trait]
pub trait TrackRepository: Send + Sync {
    async fn find_by_id(&self, id: TrackId) -> Result<Option<Track>, TrackError>;
    /// Insert or replace, keyed by the external id. Artist and album must already exist.
    async fn save(&self, track: Track) -> Result<Track, TrackError>;
    /// Removes the track only; its artist and album stay.
    async fn delete(&self, id: TrackId) -> Result<bool, TrackError>;
    /// Ordered by `favorited_at`, then id.
    async fn list_all(&self) -> Result<Vec<Track>, TrackError>;
    async fn list_ids(&self) -> Result<HashSet<TrackId>, TrackError>;
}
