use crate::catalog::MangaCatalog;
use crate::error::AppError;
use crate::query::QueryError;
use crate::reconcile::{flag_favorites, merge_remote, Reconciled};
use domain::manga::{FavoriteManga, MangaRepository};
use log::warn;
use model::catalog::CatalogManga;
use model::flagged::Flagged;
use std::collections::HashSet;
use std::sync::Arc;

fn by_title(a: &CatalogManga, b: &CatalogManga) -> std::cmp::Ordering {
    a.title.cmp(&b.title)
}

/// Top mangas. The first page starts with the local favorites by title; later pages
/// leave out anything already shown there.
#[derive(Clone)]
pub struct GetTopMangas {
    catalog: Arc<dyn MangaCatalog>,
    manga_repository: Arc<dyn MangaRepository>,
}

impl GetTopMangas {
    pub fn new(catalog: Arc<dyn MangaCatalog>, manga_repository: Arc<dyn MangaRepository>) -> Self {
        Self {
            catalog,
            manga_repository,
        }
    }

    pub async fn handle(&self, page: u32) -> Result<Reconciled<Flagged<CatalogManga>>, AppError> {
        if page == 0 {
            return Err(QueryError::InvalidInput("page starts at 1".to_string()).into());
        }
        let saved = self.manga_repository.list_all().await?;
        let local: Vec<CatalogManga> = saved.iter().map(CatalogManga::from).collect();
        let favorite_ids: HashSet<i64> = local.iter().map(|m| m.mal_id).collect();

        let remote = self.catalog.top_mangas(page).await;
        if let Err(e) = &remote {
            warn!("Top mangas page {} unavailable: {}", page, e);
        }

        let merged = if page == 1 {
            merge_remote(local, remote, by_title)
        } else {
            let remote = remote.map(|items| {
                items
                    .into_iter()
                    .filter(|m| !favorite_ids.contains(&m.mal_id))
                    .collect::<Vec<_>>()
            });
            merge_remote(Vec::new(), remote, by_title)
        };
        let next_page = page.checked_add(1).filter(|_| !merged.is_degraded());
        Ok(merged
            .map(|m| {
                let is_favorite = favorite_ids.contains(&m.mal_id);
                Flagged::new(m, is_favorite)
            })
            .with_next_page(next_page))
    }
}

/// Manga search with favorite flags. Pages continue while results come back.
#[derive(Clone)]
pub struct SearchMangas {
    catalog: Arc<dyn MangaCatalog>,
    manga_repository: Arc<dyn MangaRepository>,
}

impl SearchMangas {
    pub fn new(catalog: Arc<dyn MangaCatalog>, manga_repository: Arc<dyn MangaRepository>) -> Self {
        Self {
            catalog,
            manga_repository,
        }
    }

    pub async fn handle(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Reconciled<Flagged<CatalogManga>>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(QueryError::InvalidInput("search query is empty".to_string()).into());
        }
        if page == 0 {
            return Err(QueryError::InvalidInput("page starts at 1".to_string()).into());
        }
        let favorite_ids: HashSet<i64> = self
            .manga_repository
            .list_ids()
            .await?
            .into_iter()
            .map(|id| id.as_i64())
            .collect();

        match self.catalog.search_mangas(query, page).await {
            Ok(items) => {
                let next_page = page.checked_add(1).filter(|_| !items.is_empty());
                Ok(Reconciled::complete(flag_favorites(items, &favorite_ids))
                    .with_next_page(next_page))
            }
            Err(e) => {
                warn!("Manga search for {:?} failed: {}", query, e);
                Ok(Reconciled::degraded(Vec::new(), e))
            }
        }
    }
}

/// Saved mangas only, no catalog call.
#[derive(Clone)]
pub struct GetFavoriteMangas {
    manga_repository: Arc<dyn MangaRepository>,
}

impl GetFavoriteMangas {
    pub fn new(manga_repository: Arc<dyn MangaRepository>) -> Self {
        Self { manga_repository }
    }

    /// Ordered by title.
    pub async fn handle(&self) -> Result<Vec<FavoriteManga>, AppError> {
        Ok(self.manga_repository.list_all().await?)
    }
}
