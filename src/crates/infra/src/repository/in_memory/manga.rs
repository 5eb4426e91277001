use async_trait::async_trait;
use dashmap::DashMap;
use domain::manga::{FavoriteManga, MangaError, MangaRepository};
use domain::value::MalId;
use std::collections::HashSet;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct InMemoryMangaRepository {
    store: Arc<DashMap<MalId, FavoriteManga>>,
    last_local_id: Arc<AtomicI64>,
}

impl InMemoryMangaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MangaRepository for InMemoryMangaRepository {
    async fn find_by_mal_id(&self, mal_id: MalId) -> Result<Option<FavoriteManga>, MangaError> {
        Ok(self.store.get(&mal_id).map(|v| v.clone()))
    }

    async fn save(&self, mut manga: FavoriteManga) -> Result<FavoriteManga, MangaError> {
        manga.pending_events.clear();
        let mut entry = self.store.entry(manga.mal_id).or_insert_with(|| {
            let mut fresh = manga.clone();
            fresh.local_id = self.last_local_id.fetch_add(1, Ordering::SeqCst) + 1;
            fresh
        });
        manga.local_id = entry.local_id;
        *entry = manga.clone();
        Ok(manga)
    }

    async fn delete_by_mal_id(&self, mal_id: MalId) -> Result<bool, MangaError> {
        Ok(self.store.remove(&mal_id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<FavoriteManga>, MangaError> {
        let mut mangas: Vec<FavoriteManga> = self.store.iter().map(|e| e.value().clone()).collect();
        mangas.sort_by(|a, b| a.title.cmp(&b.title).then(a.mal_id.cmp(&b.mal_id)));
        Ok(mangas)
    }

    async fn list_ids(&self) -> Result<HashSet<MalId>, MangaError> {
        Ok(self.store.iter().map(|e| *e.key()).collect())
    }
}
