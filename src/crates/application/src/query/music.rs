use crate::catalog::{MusicCatalog, SearchField};
use crate::error::AppError;
use crate::query::dao::FavoriteTrackDao;
use crate::query::QueryError;
use crate::reconcile::{flag_favorites, Reconciled};
use domain::track::TrackRepository;
use log::warn;
use model::catalog::CatalogTrack;
use model::favorite_track::FavoriteTrack;
use model::flagged::Flagged;
use std::collections::HashSet;
use std::sync::Arc;

async fn favorite_track_ids(
    track_repository: &dyn TrackRepository,
) -> Result<HashSet<i64>, AppError> {
    let ids = track_repository.list_ids().await?;
    Ok(ids.into_iter().map(|id| id.as_i64()).collect())
}

/// Chart tracks with their favorite flag.
#[derive(Clone)]
pub struct GetTopTracks {
    catalog: Arc<dyn MusicCatalog>,
    track_repository: Arc<dyn TrackRepository>,
}

impl GetTopTracks {
    pub fn new(catalog: Arc<dyn MusicCatalog>, track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            catalog,
            track_repository,
        }
    }

    pub async fn handle(&self) -> Result<Reconciled<Flagged<CatalogTrack>>, AppError> {
        let favorite_ids = favorite_track_ids(self.track_repository.as_ref()).await?;
        match self.catalog.chart_tracks().await {
            Ok(tracks) => Ok(Reconciled::complete(flag_favorites(tracks, &favorite_ids))),
            Err(e) => {
                warn!("Chart unavailable: {}", e);
                Ok(Reconciled::degraded(Vec::new(), e))
            }
        }
    }
}

/// Track search by title, album or artist with favorite flags.
#[derive(Clone)]
pub struct SearchTracks {
    catalog: Arc<dyn MusicCatalog>,
    track_repository: Arc<dyn TrackRepository>,
}

impl SearchTracks {
    pub fn new(catalog: Arc<dyn MusicCatalog>, track_repository: Arc<dyn TrackRepository>) -> Self {
        Self {
            catalog,
            track_repository,
        }
    }

    /// `page` starts at 1. `next_page` on the result is set while the catalog reports more.
    pub async fn handle(
        &self,
        query: &str,
        field: SearchField,
        page: u32,
    ) -> Result<Reconciled<Flagged<CatalogTrack>>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QueryError::InvalidInput("search query is empty".to_string()).into());
        }
        if page == 0 {
            return Err(QueryError::InvalidInput("page starts at 1".to_string()).into());
        }

        let favorite_ids = favorite_track_ids(self.track_repository.as_ref()).await?;
        match self.catalog.search_tracks(query, field, page).await {
            Ok(result) => {
                let next_page = page.checked_add(1).filter(|_| result.has_more);
                Ok(
                    Reconciled::complete(flag_favorites(result.items, &favorite_ids))
                        .with_next_page(next_page),
                )
            }
            Err(e) => {
                warn!("Search for {:?} by {} failed: {}", query, field, e);
                Ok(Reconciled::degraded(Vec::new(), e))
            }
        }
    }
}

/// Saved tracks with artist and album, no catalog call.
#[derive(Clone)]
pub struct GetFavoriteTracks {
    favorite_track_dao: Arc<dyn FavoriteTrackDao>,
}

impl GetFavoriteTracks {
    pub fn new(favorite_track_dao: Arc<dyn FavoriteTrackDao>) -> Self {
        Self { favorite_track_dao }
    }

    pub async fn handle(&self) -> Result<Vec<FavoriteTrack>, QueryError> {
        self.favorite_track_dao.list_favorite_tracks().await
    }
}
