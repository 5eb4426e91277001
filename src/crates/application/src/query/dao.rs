use crate::query::QueryError;
use async_trait::async_trait;
use model::favorite_track::FavoriteTrack;

/// Read side of favorite tracks joined with their artist and album.
#[async_trait]
pub trait FavoriteTrackDao: Send + Sync {
    /// Favorite tracks joined with artist name and album title, oldest favorite first.
    async fn list_favorite_tracks(&self) -> Result<Vec<FavoriteTrack>, QueryError>;
}
