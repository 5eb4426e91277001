use application::query::dao::FavoriteTrackDao;
use application::query::QueryError;
use async_trait::async_trait;
use dashmap::DashMap;
use domain::album::{Album, AlbumError, AlbumRepository};
use domain::artist::{Artist, ArtistError, ArtistRepository};
use domain::track::{Track, TrackError, TrackRepository};
use domain::value::{AlbumId, ArtistId, TrackId};
use model::favorite_track::FavoriteTrack;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

/// Artists, albums and tracks in one store, so parent checks and cascades see a
/// single consistent state. Implements all three repositories and the favorites DAO.
#[derive(Clone, Default)]
pub struct InMemoryMusicStore {
    artists: Arc<DashMap<ArtistId, Artist>>,
    albums: Arc<DashMap<AlbumId, Album>>,
    tracks: Arc<DashMap<TrackId, Track>>,
    // held by every write that touches more than one map
    write_lock: Arc<Mutex<()>>,
}

impl InMemoryMusicStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|e| e.into_inner())
    }

    // caller holds the write guard
    fn remove_tracks(&self, remove: impl Fn(&Track) -> bool) -> Vec<TrackId> {
        let mut removed = Vec::new();
        self.tracks.retain(|id, t| {
            if remove(t) {
                removed.push(*id);
                false
            } else {
                true
            }
        });
        removed.sort();
        removed
    }

    fn sorted_tracks(&self) -> Vec<Track> {
        let mut tracks: Vec<Track> = self.tracks.iter().map(|e| e.value().clone()).collect();
        tracks.sort_by(|a, b| a.favorited_at.cmp(&b.favorited_at).then(a.id.cmp(&b.id)));
        tracks
    }
}

#[async_trait]
impl ArtistRepository for InMemoryMusicStore {
    async fn find_by_id(&self, id: ArtistId) -> Result<Option<Artist>, ArtistError> {
        Ok(self.artists.get(&id).map(|v| v.clone()))
    }

    async fn save(&self, artist: Artist) -> Result<Artist, ArtistError> {
        self.artists.insert(artist.id, artist.clone());
        Ok(artist)
    }

    async fn delete_cascade(&self, id: ArtistId) -> Result<Option<Vec<TrackId>>, ArtistError> {
        let _guard = self.write_guard();
        if self.artists.remove(&id).is_none() {
            return Ok(None);
        }
        let removed = self.remove_tracks(|t| t.artist_id == id);
        self.albums.retain(|_, a| a.artist_id != id);
        Ok(Some(removed))
    }

    async fn list_all(&self) -> Result<Vec<Artist>, ArtistError> {
        let mut artists: Vec<Artist> = self.artists.iter().map(|e| e.value().clone()).collect();
        artists.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(artists)
    }

    async fn list_ids(&self) -> Result<HashSet<ArtistId>, ArtistError> {
        Ok(self.artists.iter().map(|e| *e.key()).collect())
    }
}

#[async_trait]
impl AlbumRepository for InMemoryMusicStore {
    async fn find_by_id(&self, id: AlbumId) -> Result<Option<Album>, AlbumError> {
        Ok(self.albums.get(&id).map(|v| v.clone()))
    }

    async fn save(&self, album: Album) -> Result<Album, AlbumError> {
        let _guard = self.write_guard();
        if !self.artists.contains_key(&album.artist_id) {
            return Err(AlbumError::MissingArtist(album.artist_id));
        }
        self.albums.insert(album.id, album.clone());
        Ok(album)
    }

    async fn delete_cascade(&self, id: AlbumId) -> Result<Option<Vec<TrackId>>, AlbumError> {
        let _guard = self.write_guard();
        if self.albums.remove(&id).is_none() {
            return Ok(None);
        }
        Ok(Some(self.remove_tracks(|t| t.album_id == id)))
    }

    async fn list_all(&self) -> Result<Vec<Album>, AlbumError> {
        let mut albums: Vec<Album> = self.albums.iter().map(|e| e.value().clone()).collect();
        albums.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(albums)
    }

    async fn list_ids(&self) -> Result<HashSet<AlbumId>, AlbumError> {
        Ok(self.albums.iter().map(|e| *e.key()).collect())
    }
}

#[async_trait]
impl TrackRepository for InMemoryMusicStore {
    async fn find_by_id(&self, id: TrackId) -> Result<Option<Track>, TrackError> {
        Ok(self.tracks.get(&id).map(|v| v.clone()))
    }

    async fn save(&self, mut track: Track) -> Result<Track, TrackError> {
        let _guard = self.write_guard();
        if !self.artists.contains_key(&track.artist_id) {
            return Err(TrackError::MissingArtist(track.id, track.artist_id));
        }
        if !self.albums.contains_key(&track.album_id) {
            return Err(TrackError::MissingAlbum(track.id, track.album_id));
        }
        track.pending_events.clear();
        self.tracks.insert(track.id, track.clone());
        Ok(track)
    }

    async fn delete(&self, id: TrackId) -> Result<bool, TrackError> {
        Ok(self.tracks.remove(&id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<Track>, TrackError> {
        Ok(self.sorted_tracks())
    }

    async fn list_ids(&self) -> Result<HashSet<TrackId>, TrackError> {
        Ok(self.tracks.iter().map(|e| *e.key()).collect())
    }
}

#[async_trait]
impl FavoriteTrackDao for InMemoryMusicStore {
    async fn list_favorite_tracks(&self) -> Result<Vec<FavoriteTrack>, QueryError> {
        let favorites = self
            .sorted_tracks()
            .into_iter()
            .filter_map(|track| {
                let artist = self.artists.get(&track.artist_id)?;
                let album = self.albums.get(&track.album_id)?;
                Some(FavoriteTrack {
                    track_id: track.id.as_i64(),
                    title: track.title,
                    artist_name: artist.name.clone(),
                    album_title: album.title.clone(),
                    cover_url: track.cover_url,
                })
            })
            .collect();
        Ok(favorites)
    }
}
