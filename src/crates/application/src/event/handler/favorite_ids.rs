use crate::error::AppError;
use crate::event::event_bus::{EventEnvelope, Handler};
use domain::manga::{MangaEvent, MangaRepository};
use domain::track::{TrackEvent, TrackRepository};
use log::{debug, error};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;

/// Keeps the current favorite id sets in memory and pushes every change to subscribers.
///
/// The sets are re-read from the stores on each event, so a missed or reordered event
/// never leaves a stale snapshot behind.
pub struct FavoriteIdsProjector {
    track_repository: Arc<dyn TrackRepository>,
    manga_repository: Arc<dyn MangaRepository>,
    track_ids: watch::Sender<HashSet<i64>>,
    manga_ids: watch::Sender<HashSet<i64>>,
}

impl FavoriteIdsProjector {
    pub fn new(
        track_repository: Arc<dyn TrackRepository>,
        manga_repository: Arc<dyn MangaRepository>,
    ) -> Self {
        let (track_ids, _) = watch::channel(HashSet::new());
        let (manga_ids, _) = watch::channel(HashSet::new());
        Self {
            track_repository,
            manga_repository,
            track_ids,
            manga_ids,
        }
    }

    pub async fn refresh_all(&self) -> Result<(), AppError> {
        self.refresh_tracks().await?;
        self.refresh_mangas().await
    }

    pub async fn refresh_tracks(&self) -> Result<(), AppError> {
        let ids = self.track_repository.list_ids().await?;
        let ids: HashSet<i64> = ids.into_iter().map(|id| id.as_i64()).collect();
        debug!("Favorite track ids refreshed: {} ids", ids.len());
        self.track_ids.send_replace(ids);
        Ok(())
    }

    pub async fn refresh_mangas(&self) -> Result<(), AppError> {
        let ids = self.manga_repository.list_ids().await?;
        let ids: HashSet<i64> = ids.into_iter().map(|id| id.as_i64()).collect();
        debug!("Favorite manga ids refreshed: {} ids", ids.len());
        self.manga_ids.send_replace(ids);
        Ok(())
    }

    pub fn subscribe_tracks(&self) -> watch::Receiver<HashSet<i64>> {
        self.track_ids.subscribe()
    }

    pub fn subscribe_mangas(&self) -> watch::Receiver<HashSet<i64>> {
        self.manga_ids.subscribe()
    }

    pub fn favorite_track_ids(&self) -> HashSet<i64> {
        self.track_ids.borrow().clone()
    }

    pub fn favorite_manga_ids(&self) -> HashSet<i64> {
        self.manga_ids.borrow().clone()
    }
}

#[async_trait::async_trait]
impl Handler<TrackEvent> for FavoriteIdsProjector {
    async fn handle(&self, envelope: &EventEnvelope<TrackEvent>) {
        if let Err(e) = self.refresh_tracks().await {
            error!(
                "Failed to refresh favorite tracks after {} on {}: {}",
                envelope.name, envelope.aggregate_id, e
            );
        }
    }
}

#[async_trait::async_trait]
impl Handler<MangaEvent> for FavoriteIdsProjector {
    async fn handle(&self, envelope: &EventEnvelope<MangaEvent>) {
        if let Err(e) = self.refresh_mangas().await {
            error!(
                "Failed to refresh favorite mangas after {} on {}: {}",
                envelope.name, envelope.aggregate_id, e
            );
        }
    }
}
