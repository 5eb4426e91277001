pub mod in_memory;
pub mod sqlite;

use application::query::dao::FavoriteTrackDao;
use domain::album::AlbumRepository;
use domain::artist::ArtistRepository;
use domain::classical_work::ClassicalWorkRepository;
use domain::manga::MangaRepository;
use domain::track::TrackRepository;
use in_memory::classical_work::InMemoryClassicalWorkRepository;
use in_memory::manga::InMemoryMangaRepository;
use in_memory::music::InMemoryMusicStore;
use sea_orm::DatabaseConnection;
use sqlite::command::album::AlbumRepositoryImpl;
use sqlite::command::artist::ArtistRepositoryImpl;
use sqlite::command::classical_work::ClassicalWorkRepositoryImpl;
use sqlite::command::manga::MangaRepositoryImpl;
use sqlite::command::track::TrackRepositoryImpl;
use sqlite::query::favorite_track::FavoriteTrackDaoImpl;
use std::sync::Arc;

/// Every store the application needs, backed by one implementation.
#[derive(Clone)]
pub struct Repositories {
    pub artist: Arc<dyn ArtistRepository>,
    pub album: Arc<dyn AlbumRepository>,
    pub track: Arc<dyn TrackRepository>,
    pub favorite_track_dao: Arc<dyn FavoriteTrackDao>,
    pub classical_work: Arc<dyn ClassicalWorkRepository>,
    pub manga: Arc<dyn MangaRepository>,
}

impl Repositories {
    pub fn sqlite(db: DatabaseConnection) -> Self {
        Self {
            artist: Arc::new(ArtistRepositoryImpl::new(db.clone())),
            album: Arc::new(AlbumRepositoryImpl::new(db.clone())),
            track: Arc::new(TrackRepositoryImpl::new(db.clone())),
            favorite_track_dao: Arc::new(FavoriteTrackDaoImpl::new(db.clone())),
            classical_work: Arc::new(ClassicalWorkRepositoryImpl::new(db.clone())),
            manga: Arc::new(MangaRepositoryImpl::new(db)),
        }
    }

    pub fn in_memory() -> Self {
        let music = InMemoryMusicStore::new();
        Self {
            artist: Arc::new(music.clone()),
            album: Arc::new(music.clone()),
            track: Arc::new(music.clone()),
            favorite_track_dao: Arc::new(music),
            classical_work: Arc::new(InMemoryClassicalWorkRepository::new()),
            manga: Arc::new(InMemoryMangaRepository::new()),
        }
    }
}
