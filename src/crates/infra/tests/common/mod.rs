#![allow(dead_code)]

use application::catalog::{
    CatalogError, ClassicalCatalog, MangaCatalog, MusicCatalog, SearchField,
};
use application::command::classical::ClassicalWorkService;
use application::command::manga::FavoriteMangaService;
use application::command::music::FavoriteTrackService;
use application::event::handler::favorite_ids::FavoriteIdsProjector;
use application::event::handler::registry::register_handlers;
use async_trait::async_trait;
use domain::classical_work::ClassicalWork;
use domain::value::{TrackId, WorkId};
use infra::db;
use infra::event_bus::in_memory::InMemoryEventBus;
use infra::repository::Repositories;
use migration::{Migrator, MigratorTrait};
use model::catalog::{
    CatalogAlbum, CatalogArtist, CatalogManga, CatalogTrack, CatalogWork, SearchPage,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub fn unavailable() -> CatalogError {
    CatalogError::RemoteUnavailable("connection refused".to_string())
}

// ---------- fixtures ----------

pub fn catalog_track(id: i64, artist_id: i64, album_id: i64) -> CatalogTrack {
    CatalogTrack {
        id,
        title: format!("Track {}", id),
        rank: 1000 - id as i32,
        duration_secs: 180,
        artist: CatalogArtist {
            id: artist_id,
            name: format!("Artist {}", artist_id),
            picture_url: format!("https://cdn.test/artist/{}.jpg", artist_id),
            fan_count: 42,
        },
        album: CatalogAlbum {
            id: album_id,
            title: format!("Album {}", album_id),
            cover_url: format!("https://cdn.test/album/{}.jpg", album_id),
            track_count: 12,
        },
    }
}

pub fn catalog_work(id: i64, title: &str, composer_id: i64) -> CatalogWork {
    CatalogWork {
        id,
        title: title.to_string(),
        genre: "Orchestral".to_string(),
        composer_id,
        composer_name: format!("Composer {}", composer_id),
    }
}

pub fn classical_work(id: i64, title: &str, rating: i32) -> ClassicalWork {
    let mut work = ClassicalWork::new(
        WorkId::from(id),
        title.to_string(),
        "Johann Sebastian Bach".to_string(),
        None,
        "Keyboard".to_string(),
    );
    work.rating = rating;
    work
}

pub fn catalog_manga(mal_id: i64, title: &str) -> CatalogManga {
    CatalogManga {
        mal_id,
        title: title.to_string(),
        title_english: None,
        image_url: format!("https://cdn.test/manga/{}.jpg", mal_id),
        kind: Some("Manga".to_string()),
        status: Some("Publishing".to_string()),
        chapters: None,
        volumes: Some(10),
        score: Some(8.5),
        synopsis: None,
        published_from: Some("1989-08-25".to_string()),
        published_to: None,
        authors: vec!["Miura, Kentarou".to_string()],
        genres: vec!["Action".to_string(), "Drama".to_string()],
    }
}

// ---------- fake catalogs ----------

pub struct FakeMusicCatalog {
    chart: Vec<CatalogTrack>,
    searchable: Vec<CatalogTrack>,
    page_size: u32,
    failing: AtomicBool,
}

impl FakeMusicCatalog {
    pub fn new(chart: Vec<CatalogTrack>) -> Self {
        Self {
            searchable: chart.clone(),
            chart,
            page_size: 2,
            failing: AtomicBool::new(false),
        }
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(())
    }
}

#[async_trait]
impl MusicCatalog for FakeMusicCatalog {
    async fn chart_tracks(&self) -> Result<Vec<CatalogTrack>, CatalogError> {
        self.check()?;
        Ok(self.chart.clone())
    }

    async fn search_tracks(
        &self,
        query: &str,
        field: SearchField,
        page: u32,
    ) -> Result<SearchPage<CatalogTrack>, CatalogError> {
        self.check()?;
        let needle = query.to_lowercase();
        let matches: Vec<CatalogTrack> = self
            .searchable
            .iter()
            .filter(|t| {
                let haystack = match field {
                    SearchField::Track => &t.title,
                    SearchField::Album => &t.album.title,
                    SearchField::Artist => &t.artist.name,
                };
                haystack.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        let total = matches.len() as u32;
        let items = matches
            .into_iter()
            .skip((page as usize - 1) * self.page_size as usize)
            .take(self.page_size as usize)
            .collect();
        Ok(SearchPage::new(items, page, self.page_size, total))
    }

    async fn track(&self, id: TrackId) -> Result<CatalogTrack, CatalogError> {
        self.check()?;
        self.searchable
            .iter()
            .find(|t| t.id == id.as_i64())
            .cloned()
            .ok_or_else(|| CatalogError::UnexpectedStatus(404, format!("no track {}", id)))
    }
}

pub struct FakeClassicalCatalog {
    works: Vec<CatalogWork>,
    portraits: HashMap<i64, String>,
    works_failing: AtomicBool,
    portraits_failing: AtomicBool,
    portrait_requests: Mutex<Vec<Vec<i64>>>,
}

impl FakeClassicalCatalog {
    pub fn new(works: Vec<CatalogWork>, portraits: HashMap<i64, String>) -> Self {
        Self {
            works,
            portraits,
            works_failing: AtomicBool::new(false),
            portraits_failing: AtomicBool::new(false),
            portrait_requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_works(&self, failing: bool) {
        self.works_failing.store(failing, Ordering::SeqCst);
    }

    pub fn fail_portraits(&self, failing: bool) {
        self.portraits_failing.store(failing, Ordering::SeqCst);
    }

    pub fn portrait_requests(&self) -> Vec<Vec<i64>> {
        self.portrait_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClassicalCatalog for FakeClassicalCatalog {
    async fn random_works(&self) -> Result<Vec<CatalogWork>, CatalogError> {
        if self.works_failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.works.clone())
    }

    async fn composer_portraits(
        &self,
        composer_ids: &[i64],
    ) -> Result<HashMap<i64, String>, CatalogError> {
        self.portrait_requests
            .lock()
            .unwrap()
            .push(composer_ids.to_vec());
        if self.portraits_failing.load(Ordering::SeqCst) {
            return Err(CatalogError::Malformed("expected value".to_string()));
        }
        Ok(composer_ids
            .iter()
            .filter_map(|id| self.portraits.get(id).map(|url| (*id, url.clone())))
            .collect())
    }
}

pub struct FakeMangaCatalog {
    pages: Vec<Vec<CatalogManga>>,
    failing: AtomicBool,
}

impl FakeMangaCatalog {
    pub fn new(pages: Vec<Vec<CatalogManga>>) -> Self {
        Self {
            pages,
            failing: AtomicBool::new(false),
        }
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl MangaCatalog for FakeMangaCatalog {
    async fn top_mangas(&self, page: u32) -> Result<Vec<CatalogManga>, CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self
            .pages
            .get((page - 1) as usize)
            .cloned()
            .unwrap_or_default())
    }

    async fn search_mangas(
        &self,
        query: &str,
        page: u32,
    ) -> Result<Vec<CatalogManga>, CatalogError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        if page > 1 {
            return Ok(Vec::new());
        }
        let needle = query.to_lowercase();
        Ok(self
            .pages
            .iter()
            .flatten()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }
}

// ---------- stores ----------

pub async fn sqlite_repositories() -> Repositories {
    let db = db::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Repositories::sqlite(db)
}

/// Both store implementations, labelled for assertion messages.
pub async fn all_stores() -> Vec<(&'static str, Repositories)> {
    vec![
        ("in_memory", Repositories::in_memory()),
        ("sqlite", sqlite_repositories().await),
    ]
}

/// Services wired the way the binary wires them.
pub struct Harness {
    pub repos: Repositories,
    pub favorite_ids: Arc<FavoriteIdsProjector>,
    pub tracks: FavoriteTrackService<InMemoryEventBus>,
    pub mangas: FavoriteMangaService<InMemoryEventBus>,
    pub works: ClassicalWorkService<InMemoryEventBus>,
}

impl Harness {
    pub async fn new(repos: Repositories) -> Self {
        let favorite_ids = Arc::new(FavoriteIdsProjector::new(
            repos.track.clone(),
            repos.manga.clone(),
        ));
        favorite_ids.refresh_all().await.unwrap();

        let mut bus = InMemoryEventBus::new();
        register_handlers(&mut bus, favorite_ids.clone()).await;
        let bus = Arc::new(bus);

        Self {
            tracks: FavoriteTrackService::new(
                repos.artist.clone(),
                repos.album.clone(),
                repos.track.clone(),
                repos.favorite_track_dao.clone(),
                bus.clone(),
            ),
            mangas: FavoriteMangaService::new(repos.manga.clone(), bus.clone()),
            works: ClassicalWorkService::new(repos.classical_work.clone(), bus),
            favorite_ids,
            repos,
        }
    }
}
