mod common;

use application::command::music::FavoriteTrackService;
use application::context::AppContext;
use application::error::AppError;
use async_trait::async_trait;
use common::{all_stores, catalog_track};
use domain::album::{Album, AlbumError, AlbumRepository};
use domain::artist::{Artist, ArtistError, ArtistRepository};
use domain::track::{Track, TrackError, TrackRepository};
use domain::value::{AlbumId, ArtistId, TrackId};
use infra::event_bus::in_memory::InMemoryEventBus;
use infra::repository::Repositories;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

type WriteLog = Arc<Mutex<Vec<String>>>;

/// Album store whose writes always fail.
struct BrokenAlbums(Arc<dyn AlbumRepository>);

#[async_trait]
impl AlbumRepository for BrokenAlbums {
    async fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, AlbumError> {
        self.0.find_by_id(id).await
    }

    async fn save(&self, _album: Album) -> Result<Album, AlbumError> {
        Err(AlbumError::DbErr("disk I/O error".to_string()))
    }

    async fn delete_cascade(&self, id: AlbumId) -> Result<Option<Vec<TrackId>>, AlbumError> {
        self.0.delete_cascade(id).await
    }

    async fn list_all(&self) -> Result<Vec<Album>, AlbumError> {
        self.0.list_all().await
    }

    async fn list_ids(&self) -> Result<HashSet<AlbumId>, AlbumError> {
        self.0.list_ids().await
    }
}

struct LoggedArtists(Arc<dyn ArtistRepository>, WriteLog);

#[async_trait]
impl ArtistRepository for LoggedArtists {
    async fn find_by_id(&self, id: ArtistId) -> Result<Option<Artist>, ArtistError> {
        self.0.find_by_id(id).await
    }

    async fn save(&self, artist: Artist) -> Result<Artist, ArtistError> {
        self.1.lock().unwrap().push(format!("artist {}", artist.id));
        self.0.save(artist).await
    }

    async fn delete_cascade(&self, id: ArtistId) -> Result<Option<Vec<TrackId>>, ArtistError> {
        self.0.delete_cascade(id).await
    }

    async fn list_all(&self) -> Result<Vec<Artist>, ArtistError> {
        self.0.list_all().await
    }

    async fn list_ids(&self) -> Result<HashSet<ArtistId>, ArtistError> {
        self.0.list_ids().await
    }
}

struct LoggedAlbums(Arc<dyn AlbumRepository>, WriteLog);

#[async_trait]
impl AlbumRepository for LoggedAlbums {
    async fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, AlbumError> {
        self.0.find_by_id(id).await
    }

    async fn save(&self, album: Album) -> Result<Album, AlbumError> {
        self.1.lock().unwrap().push(format!("album {}", album.id));
        self.0.save(album).await
    }

    async fn delete_cascade(&self, id: AlbumId) -> Result<Option<Vec<TrackId>>, AlbumError> {
        self.0.delete_cascade(id).await
    }

    async fn list_all(&self) -> Result<Vec<Album>, AlbumError> {
        self.0.list_all().await
    }

    async fn list_ids(&self) -> Result<HashSet<AlbumId>, AlbumError> {
        self.0.list_ids().await
    }
}

struct LoggedTracks(Arc<dyn TrackRepository>, WriteLog);

#[async_trait]
impl TrackRepository for LoggedTracks {
    async fn find_by_id(&self, id: TrackId) -> Result<Option<Track>, TrackError> {
        self.0.find_by_id(id).await
    }

    async fn save(&self, track: Track) -> Result<Track, TrackError> {
        self.1.lock().unwrap().push(format!("track {}", track.id));
        self.0.save(track).await
    }

    async fn delete(&self, id: TrackId) -> Result<bool, TrackError> {
        self.0.delete(id).await
    }

    async fn list_all(&self) -> Result<Vec<Track>, TrackError> {
        self.0.list_all().await
    }

    async fn list_ids(&self) -> Result<HashSet<TrackId>, TrackError> {
        self.0.list_ids().await
    }
}

fn service(
    repos: &Repositories,
    artist: Arc<dyn ArtistRepository>,
    album: Arc<dyn AlbumRepository>,
    track: Arc<dyn TrackRepository>,
) -> FavoriteTrackService<InMemoryEventBus> {
    FavoriteTrackService::new(
        artist,
        album,
        track,
        repos.favorite_track_dao.clone(),
        Arc::new(InMemoryEventBus::new()),
    )
}

#[tokio::test]
async fn test_failed_album_write_leaves_no_track() {
    for (store, repos) in all_stores().await {
        let tracks = service(
            &repos,
            repos.artist.clone(),
            Arc::new(BrokenAlbums(repos.album.clone())),
            repos.track.clone(),
        );

        let result = tracks
            .toggle_favorite(&AppContext::new(), &catalog_track(1, 10, 20))
            .await;

        assert!(
            matches!(result, Err(AppError::AlbumError(AlbumError::DbErr(_)))),
            "{store}: {:?}",
            result.map(|o| o.favorited)
        );
        assert!(repos.track.list_ids().await.unwrap().is_empty(), "{store}");
        assert!(repos.album.list_ids().await.unwrap().is_empty(), "{store}");
        assert!(repos.favorite_track_dao.list_favorite_tracks().await.unwrap().is_empty(), "{store}");
    }
}

#[tokio::test]
async fn test_parents_are_written_once_and_before_the_track() {
    for (store, repos) in all_stores().await {
        let log: WriteLog = Arc::default();
        let tracks = service(
            &repos,
            Arc::new(LoggedArtists(repos.artist.clone(), log.clone())),
            Arc::new(LoggedAlbums(repos.album.clone(), log.clone())),
            Arc::new(LoggedTracks(repos.track.clone(), log.clone())),
        );
        let ctx = AppContext::new();

        tracks.toggle_favorite(&ctx, &catalog_track(1, 10, 20)).await.unwrap();
        tracks.toggle_favorite(&ctx, &catalog_track(2, 10, 20)).await.unwrap();
        tracks.add_favorite(&ctx, &catalog_track(3, 10, 21)).await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["artist 10", "album 20", "track 1", "track 2", "album 21", "track 3"],
            "{store}"
        );
        assert_eq!(repos.artist.list_all().await.unwrap().len(), 1, "{store}");
        assert_eq!(repos.album.list_all().await.unwrap().len(), 2, "{store}");
    }
}
