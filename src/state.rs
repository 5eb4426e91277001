use anyhow::Context;
use application::catalog::{ClassicalCatalog, MangaCatalog, MusicCatalog};
use application::command::classical::ClassicalWorkService;
use application::command::manga::FavoriteMangaService;
use application::command::music::FavoriteTrackService;
use application::event::handler::favorite_ids::FavoriteIdsProjector;
use application::event::handler::registry::register_handlers;
use infra::catalog::deezer::DeezerClient;
use infra::catalog::jikan::JikanClient;
use infra::catalog::open_opus::OpenOpusClient;
use infra::config::AppConfigImpl;
use infra::event_bus::in_memory::InMemoryEventBus;
use infra::repository::Repositories;
use log::info;
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;

/// Everything a command needs, built once at startup.
pub struct AppState {
    pub repos: Repositories,
    pub music_catalog: Arc<dyn MusicCatalog>,
    pub classical_catalog: Arc<dyn ClassicalCatalog>,
    pub manga_catalog: Arc<dyn MangaCatalog>,
    pub tracks: FavoriteTrackService<InMemoryEventBus>,
    pub mangas: FavoriteMangaService<InMemoryEventBus>,
    pub works: ClassicalWorkService<InMemoryEventBus>,
}

impl AppState {
    /// Opens the configured store. SQLite databases are migrated to the latest schema first.
    pub async fn init_store(app_cfg: &AppConfigImpl) -> anyhow::Result<Repositories> {
        if app_cfg.uses_in_memory_store() {
            info!("Using the in-memory store, nothing will be kept after exit");
            return Ok(Repositories::in_memory());
        }
        let db_url = app_cfg.database_url();
        let db = infra::db::connect(&db_url)
            .await
            .with_context(|| format!("failed to open database {}", db_url))?;
        Migrator::up(&db, None)
            .await
            .context("failed to migrate database")?;
        Ok(Repositories::sqlite(db))
    }

    pub async fn new(app_cfg: &AppConfigImpl, repos: Repositories) -> anyhow::Result<Self> {
        let catalog_cfg = app_cfg.catalog();
        let music_catalog: Arc<dyn MusicCatalog> =
            Arc::new(DeezerClient::new(&catalog_cfg)?);
        let classical_catalog: Arc<dyn ClassicalCatalog> =
            Arc::new(OpenOpusClient::new(&catalog_cfg)?);
        let manga_catalog: Arc<dyn MangaCatalog> =
            Arc::new(JikanClient::new(&catalog_cfg)?);

        let favorite_ids = Arc::new(FavoriteIdsProjector::new(
            repos.track.clone(),
            repos.manga.clone(),
        ));
        favorite_ids.refresh_all().await?;

        let mut event_bus = InMemoryEventBus::new();
        register_handlers(&mut event_bus, favorite_ids.clone()).await;
        let event_bus = Arc::new(event_bus);

        Ok(Self {
            tracks: FavoriteTrackService::new(
                repos.artist.clone(),
                repos.album.clone(),
                repos.track.clone(),
                repos.favorite_track_dao.clone(),
                event_bus.clone(),
            ),
            mangas: FavoriteMangaService::new(repos.manga.clone(), event_bus.clone()),
            works: ClassicalWorkService::new(repos.classical_work.clone(), event_bus),
            repos,
            music_catalog,
            classical_catalog,
            manga_catalog,
        })
    }
}
