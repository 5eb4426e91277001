use super::shared::{KeyedLocks, ToggleOutcome};
use crate::context::AppContext;
use crate::error::AppError;
use crate::event::event_bus::{publish_all, EventBus};
use domain::manga::{FavoriteManga, MangaError, MangaRepository};
use domain::value::MalId;
use log::{debug, info};
use model::catalog::CatalogManga;
use std::sync::Arc;

/// Writes favorite mangas. Writes on one `mal_id` are serialized.
pub struct FavoriteMangaService<B: EventBus> {
    manga_repository: Arc<dyn MangaRepository>,
    locks: KeyedLocks,
    event_bus: Arc<B>,
}

impl<B: EventBus> FavoriteMangaService<B> {
    pub fn new(manga_repository: Arc<dyn MangaRepository>, event_bus: Arc<B>) -> Self {
        Self {
            manga_repository,
            locks: KeyedLocks::new(),
            event_bus,
        }
    }

    pub async fn toggle_favorite(
        &self,
        ctx: &AppContext,
        manga: &CatalogManga,
    ) -> Result<ToggleOutcome<FavoriteManga>, AppError> {
        let mal_id = MalId::from(manga.mal_id);
        let _guard = self.locks.lock(manga.mal_id).await;
        let favorited = match self.manga_repository.find_by_mal_id(mal_id).await? {
            Some(existing) => {
                self.remove_locked(ctx, existing).await?;
                false
            }
            None => {
                self.upsert_locked(ctx, manga, true).await?;
                true
            }
        };
        let favorites = self.manga_repository.list_all().await?;
        Ok(ToggleOutcome {
            favorited,
            favorites,
        })
    }

    /// Stores the manga, refreshing the details of an existing favorite in place.
    pub async fn add_favorite(
        &self,
        ctx: &AppContext,
        manga: &CatalogManga,
    ) -> Result<FavoriteManga, AppError> {
        let _guard = self.locks.lock(manga.mal_id).await;
        let is_new = self
            .manga_repository
            .find_by_mal_id(MalId::from(manga.mal_id))
            .await?
            .is_none();
        self.upsert_locked(ctx, manga, is_new).await
    }

    pub async fn remove_favorite(&self, ctx: &AppContext, mal_id: MalId) -> Result<bool, AppError> {
        let _guard = self.locks.lock(mal_id.as_i64()).await;
        match self.manga_repository.find_by_mal_id(mal_id).await? {
            Some(existing) => {
                self.remove_locked(ctx, existing).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn is_favorite(&self, mal_id: MalId) -> Result<bool, AppError> {
        Ok(self.manga_repository.find_by_mal_id(mal_id).await?.is_some())
    }

    async fn upsert_locked(
        &self,
        ctx: &AppContext,
        manga: &CatalogManga,
        is_new: bool,
    ) -> Result<FavoriteManga, AppError> {
        let mut entity = to_favorite(manga)?;
        if is_new {
            entity.mark_favorited();
        }
        let events = entity.pop_events();
        let saved = self.manga_repository.save(entity).await?;
        publish_all(self.event_bus.as_ref(), ctx, events).await?;
        if is_new {
            info!("Manga {} added to favorites", manga.mal_id);
        } else {
            debug!("Manga {} refreshed", manga.mal_id);
        }
        Ok(saved)
    }

    async fn remove_locked(&self, ctx: &AppContext, mut manga: FavoriteManga) -> Result<(), AppError> {
        self.manga_repository.delete_by_mal_id(manga.mal_id).await?;
        manga.mark_unfavorited();
        publish_all(self.event_bus.as_ref(), ctx, manga.pop_events()).await?;
        info!("Manga {} removed from favorites", manga.mal_id);
        Ok(())
    }
}

fn encode_names(names: &[String]) -> Result<Option<String>, MangaError> {
    if names.is_empty() {
        return Ok(None);
    }
    serde_json::to_string(names)
        .map(Some)
        .map_err(|e| MangaError::SerializationError(e.to_string()))
}

fn to_favorite(manga: &CatalogManga) -> Result<FavoriteManga, MangaError> {
    let mut entity = FavoriteManga::new(
        MalId::from(manga.mal_id),
        manga.title.clone(),
        manga.image_url.clone(),
    );
    entity.title_english = manga.title_english.clone();
    entity.kind = manga.kind.clone();
    entity.status = manga.status.clone();
    entity.chapters = manga.chapters;
    entity.volumes = manga.volumes;
    entity.score = manga.score;
    entity.synopsis = manga.synopsis.clone();
    entity.published_from = manga.published_from.clone();
    entity.published_to = manga.published_to.clone();
    entity.authors = encode_names(&manga.authors)?;
    entity.genres = encode_names(&manga.genres)?;
    Ok(entity)
}
