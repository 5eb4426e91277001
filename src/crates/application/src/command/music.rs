use super::shared::{KeyedLocks, ToggleOutcome};
use crate::context::AppContext;
use crate::error::AppError;
use crate::event::event_bus::{publish_all, EventBus};
use crate::query::dao::FavoriteTrackDao;
use domain::album::{Album, AlbumRepository};
use domain::artist::{Artist, ArtistRepository};
use domain::track::{Track, TrackEvent, TrackRepository};
use domain::value::{AlbumId, ArtistId, TrackId};
use log::{debug, info};
use model::catalog::CatalogTrack;
use model::favorite_track::FavoriteTrack;
use std::sync::Arc;

/// Writes favorite tracks together with their artist and album.
///
/// Every write on a track id holds that id's lock, so two toggles of the same
/// track never interleave their read and write.
pub struct FavoriteTrackService<B: EventBus> {
    artist_repository: Arc<dyn ArtistRepository>,
    album_repository: Arc<dyn AlbumRepository>,
    track_repository: Arc<dyn TrackRepository>,
    favorite_track_dao: Arc<dyn FavoriteTrackDao>,
    locks: KeyedLocks,
    event_bus: Arc<B>,
}

impl<B: EventBus> FavoriteTrackService<B> {
    pub fn new(
        artist_repository: Arc<dyn ArtistRepository>,
        album_repository: Arc<dyn AlbumRepository>,
        track_repository: Arc<dyn TrackRepository>,
        favorite_track_dao: Arc<dyn FavoriteTrackDao>,
        event_bus: Arc<B>,
    ) -> Self {
        Self {
            artist_repository,
            album_repository,
            track_repository,
            favorite_track_dao,
            locks: KeyedLocks::new(),
            event_bus,
        }
    }

    /// Favorites the track if it is not stored, removes it otherwise.
    pub async fn toggle_favorite(
        &self,
        ctx: &AppContext,
        track: &CatalogTrack,
    ) -> Result<ToggleOutcome<FavoriteTrack>, AppError> {
        let _guard = self.locks.lock(track.id).await;
        let favorited = match self.track_repository.find_by_id(TrackId::from(track.id)).await? {
            Some(existing) => {
                self.remove_locked(ctx, existing).await?;
                false
            }
            None => {
                self.insert_locked(ctx, track).await?;
                true
            }
        };
        let favorites = self.favorite_track_dao.list_favorite_tracks().await?;
        Ok(ToggleOutcome {
            favorited,
            favorites,
        })
    }

    /// Returns false when the track already was a favorite. Nothing is written then.
    pub async fn add_favorite(
        &self,
        ctx: &AppContext,
        track: &CatalogTrack,
    ) -> Result<bool, AppError> {
        let _guard = self.locks.lock(track.id).await;
        if self
            .track_repository
            .find_by_id(TrackId::from(track.id))
            .await?
            .is_some()
        {
            debug!("Track {} already favorite", track.id);
            return Ok(false);
        }
        self.insert_locked(ctx, track).await?;
        Ok(true)
    }

    /// Returns false when the track was not a favorite.
    pub async fn remove_favorite(
        &self,
        ctx: &AppContext,
        track_id: TrackId,
    ) -> Result<bool, AppError> {
        let _guard = self.locks.lock(track_id.as_i64()).await;
        match self.track_repository.find_by_id(track_id).await? {
            Some(existing) => {
                self.remove_locked(ctx, existing).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Deletes the artist with all of its albums and tracks. Returns the removed track ids.
    pub async fn delete_artist(
        &self,
        ctx: &AppContext,
        artist_id: ArtistId,
    ) -> Result<Vec<TrackId>, AppError> {
        let Some(removed) = self.artist_repository.delete_cascade(artist_id).await? else {
            return Err(AppError::AggregateNotFound(
                "Artist".to_string(),
                artist_id.to_string(),
            ));
        };
        info!(
            "Deleted artist {} with {} favorite tracks",
            artist_id,
            removed.len()
        );
        self.publish_removed(ctx, &removed).await?;
        Ok(removed)
    }

    /// Deletes the album with all of its tracks. The artist stays.
    pub async fn delete_album(
        &self,
        ctx: &AppContext,
        album_id: AlbumId,
    ) -> Result<Vec<TrackId>, AppError> {
        let Some(removed) = self.album_repository.delete_cascade(album_id).await? else {
            return Err(AppError::AggregateNotFound(
                "Album".to_string(),
                album_id.to_string(),
            ));
        };
        info!(
            "Deleted album {} with {} favorite tracks",
            album_id,
            removed.len()
        );
        self.publish_removed(ctx, &removed).await?;
        Ok(removed)
    }

    // ids come from the delete itself, so tracks favorited meanwhile are not missed
    async fn publish_removed(&self, ctx: &AppContext, removed: &[TrackId]) -> Result<(), AppError> {
        let events: Vec<TrackEvent> = removed
            .iter()
            .map(|&track_id| TrackEvent::Unfavorited { track_id })
            .collect();
        publish_all(self.event_bus.as_ref(), ctx, events).await
    }

    async fn insert_locked(&self, ctx: &AppContext, track: &CatalogTrack) -> Result<(), AppError> {
        let artist_id = ArtistId::from(track.artist.id);
        let album_id = AlbumId::from(track.album.id);

        // parents first, the track row references both. Stored parents are never rewritten.
        if self.artist_repository.find_by_id(artist_id).await?.is_none() {
            debug!("Creating artist {} for track {}", artist_id, track.id);
            self.artist_repository
                .save(Artist::new(
                    artist_id,
                    track.artist.name.clone(),
                    track.artist.picture_url.clone(),
                    track.artist.fan_count,
                ))
                .await?;
        }
        if self.album_repository.find_by_id(album_id).await?.is_none() {
            debug!("Creating album {} for track {}", album_id, track.id);
            self.album_repository
                .save(Album::new(
                    album_id,
                    track.album.title.clone(),
                    track.album.cover_url.clone(),
                    artist_id,
                    track.album.track_count,
                ))
                .await?;
        }

        let mut entity = Track::favorite(
            TrackId::from(track.id),
            track.title.clone(),
            track.duration_secs,
            track.rank,
            artist_id,
            album_id,
            track.album.cover_url.clone(),
        );
        let events = entity.pop_events();
        self.track_repository.save(entity).await?;
        publish_all(self.event_bus.as_ref(), ctx, events).await?;
        info!("Track {} added to favorites", track.id);
        Ok(())
    }

    async fn remove_locked(&self, ctx: &AppContext, mut track: Track) -> Result<(), AppError> {
        self.track_repository.delete(track.id).await?;
        track.unfavorite();
        publish_all(self.event_bus.as_ref(), ctx, track.pop_events()).await?;
        info!("Track {} removed from favorites", track.id);
        Ok(())
    }
}
