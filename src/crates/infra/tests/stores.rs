mod common;

use chrono::{Duration, Utc};
use common::{all_stores, classical_work};
use domain::album::{Album, AlbumError};
use domain::artist::Artist;
use domain::manga::FavoriteManga;
use domain::track::{Track, TrackError};
use domain::value::{AlbumId, ArtistId, MalId, TrackId, WorkId};

fn artist(id: i64, name: &str) -> Artist {
    Artist::new(ArtistId::from(id), name.to_string(), String::new(), 0)
}

fn album(id: i64, artist_id: i64, title: &str) -> Album {
    Album::new(
        AlbumId::from(id),
        title.to_string(),
        String::new(),
        ArtistId::from(artist_id),
        10,
    )
}

fn track(id: i64, artist_id: i64, album_id: i64) -> Track {
    Track::favorite(
        TrackId::from(id),
        format!("Track {}", id),
        200,
        0,
        ArtistId::from(artist_id),
        AlbumId::from(album_id),
        String::new(),
    )
}

#[tokio::test]
async fn test_children_need_their_parents() {
    for (store, repos) in all_stores().await {
        let album_result = repos.album.save(album(20, 10, "Homework")).await;
        assert!(
            matches!(album_result, Err(AlbumError::MissingArtist(_))),
            "{store}: {album_result:?}"
        );

        let track_result = repos.track.save(track(1, 10, 20)).await;
        assert!(
            matches!(track_result, Err(TrackError::MissingArtist(_, _))),
            "{store}: {track_result:?}"
        );

        repos.artist.save(artist(10, "Daft Punk")).await.unwrap();
        let track_result = repos.track.save(track(1, 10, 20)).await;
        assert!(
            matches!(track_result, Err(TrackError::MissingAlbum(_, _))),
            "{store}: {track_result:?}"
        );
        assert!(repos.track.list_ids().await.unwrap().is_empty(), "{store}");
    }
}

#[tokio::test]
async fn test_save_replaces_by_external_id() {
    for (store, repos) in all_stores().await {
        repos.artist.save(artist(10, "Daft Punk")).await.unwrap();
        repos.artist.save(artist(10, "Daft Punk (FR)")).await.unwrap();

        let artists = repos.artist.list_all().await.unwrap();
        assert_eq!(artists.len(), 1, "{store}");
        assert_eq!(artists[0].name, "Daft Punk (FR)", "{store}");
    }
}

#[tokio::test]
async fn test_replacing_an_artist_keeps_its_tracks() {
    for (store, repos) in all_stores().await {
        repos.artist.save(artist(10, "Daft Punk")).await.unwrap();
        repos.album.save(album(20, 10, "Homework")).await.unwrap();
        repos.track.save(track(1, 10, 20)).await.unwrap();

        repos.artist.save(artist(10, "Daft Punk")).await.unwrap();
        repos.album.save(album(20, 10, "Homework")).await.unwrap();

        assert_eq!(repos.track.list_ids().await.unwrap().len(), 1, "{store}");
    }
}

#[tokio::test]
async fn test_track_delete_leaves_parents() {
    for (store, repos) in all_stores().await {
        repos.artist.save(artist(10, "Daft Punk")).await.unwrap();
        repos.album.save(album(20, 10, "Homework")).await.unwrap();
        repos.track.save(track(1, 10, 20)).await.unwrap();

        assert!(repos.track.delete(TrackId::from(1)).await.unwrap(), "{store}");
        assert!(!repos.track.delete(TrackId::from(1)).await.unwrap(), "{store}");
        assert_eq!(repos.artist.list_all().await.unwrap().len(), 1, "{store}");
        assert_eq!(repos.album.list_all().await.unwrap().len(), 1, "{store}");
    }
}

#[tokio::test]
async fn test_cascade_delete_returns_removed_tracks() {
    for (store, repos) in all_stores().await {
        repos.artist.save(artist(10, "Daft Punk")).await.unwrap();
        repos.artist.save(artist(11, "Justice")).await.unwrap();
        repos.album.save(album(20, 10, "Homework")).await.unwrap();
        repos.album.save(album(21, 10, "Discovery")).await.unwrap();
        repos.album.save(album(30, 11, "Cross")).await.unwrap();
        for t in [track(2, 10, 21), track(1, 10, 20), track(3, 11, 30)] {
            repos.track.save(t).await.unwrap();
        }

        let removed = repos.artist.delete_cascade(ArtistId::from(10)).await.unwrap();
        assert_eq!(removed, Some(vec![TrackId::from(1), TrackId::from(2)]), "{store}");
        assert_eq!(repos.artist.delete_cascade(ArtistId::from(10)).await.unwrap(), None, "{store}");

        repos.album.save(album(31, 11, "Audio, Video, Disco")).await.unwrap();
        let empty = repos.album.delete_cascade(AlbumId::from(31)).await.unwrap();
        assert_eq!(empty, Some(Vec::new()), "{store}");
        assert_eq!(repos.album.delete_cascade(AlbumId::from(31)).await.unwrap(), None, "{store}");

        let left: Vec<TrackId> = repos.track.list_all().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(left, vec![TrackId::from(3)], "{store}");
    }
}

#[tokio::test]
async fn test_album_delete_cascades_to_tracks_only() {
    for (store, repos) in all_stores().await {
        repos.artist.save(artist(10, "Daft Punk")).await.unwrap();
        repos.album.save(album(20, 10, "Homework")).await.unwrap();
        repos.album.save(album(21, 10, "Discovery")).await.unwrap();
        repos.track.save(track(1, 10, 20)).await.unwrap();
        repos.track.save(track(2, 10, 21)).await.unwrap();

        assert!(repos.album.delete(AlbumId::from(20)).await.unwrap(), "{store}");

        let left: Vec<TrackId> = repos.track.list_all().await.unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(left, vec![TrackId::from(2)], "{store}");
        assert!(repos.artist.find_by_id(ArtistId::from(10)).await.unwrap().is_some(), "{store}");
        assert!(!repos.album.delete(AlbumId::from(20)).await.unwrap(), "{store}");
    }
}

#[tokio::test]
async fn test_listing_order() {
    for (store, repos) in all_stores().await {
        repos.artist.save(artist(2, "Bonobo")).await.unwrap();
        repos.artist.save(artist(1, "Caribou")).await.unwrap();
        repos.artist.save(artist(3, "Air")).await.unwrap();
        let names: Vec<String> = repos.artist.list_all().await.unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Air", "Bonobo", "Caribou"], "{store}");

        repos.album.save(album(20, 1, "Swim")).await.unwrap();
        repos.album.save(album(21, 1, "Andorra")).await.unwrap();
        let titles: Vec<String> = repos.album.list_all().await.unwrap().into_iter().map(|a| a.title).collect();
        assert_eq!(titles, vec!["Andorra", "Swim"], "{store}");

        let mut later = track(5, 1, 20);
        later.favorited_at = Utc::now().naive_utc();
        let mut earlier = track(6, 1, 21);
        earlier.favorited_at = later.favorited_at - Duration::seconds(60);
        repos.track.save(later).await.unwrap();
        repos.track.save(earlier).await.unwrap();
        let ids: Vec<i64> = repos.track.list_all().await.unwrap().into_iter().map(|t| t.id.as_i64()).collect();
        assert_eq!(ids, vec![6, 5], "{store}");

        for (id, rating) in [(1, 2), (2, 5), (3, 0), (4, 5)] {
            repos.classical_work.save(classical_work(id, "Work", rating)).await.unwrap();
        }
        let works: Vec<(i64, i32)> = repos
            .classical_work
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|w| (w.id.as_i64(), w.rating))
            .collect();
        assert_eq!(works, vec![(2, 5), (4, 5), (1, 2), (3, 0)], "{store}");
    }
}

#[tokio::test]
async fn test_classical_work_round_trip() {
    for (store, repos) in all_stores().await {
        let mut work = classical_work(9, "Goldberg Variations", 4);
        work.composer_picture = Some("https://cdn.test/bach.jpg".to_string());
        repos.classical_work.save(work.clone()).await.unwrap();

        let found = repos.classical_work.find_by_id(WorkId::from(9)).await.unwrap().unwrap();
        assert_eq!(found, work, "{store}");
        assert!(repos.classical_work.delete(WorkId::from(9)).await.unwrap(), "{store}");
        assert!(repos.classical_work.find_by_id(WorkId::from(9)).await.unwrap().is_none(), "{store}");
    }
}

#[tokio::test]
async fn test_manga_upsert_keeps_local_id() {
    for (store, repos) in all_stores().await {
        let first = repos
            .manga
            .save(FavoriteManga::new(MalId::from(11), "Akira".to_string(), "a.jpg".to_string()))
            .await
            .unwrap();
        let other = repos
            .manga
            .save(FavoriteManga::new(MalId::from(12), "Blame!".to_string(), "b.jpg".to_string()))
            .await
            .unwrap();
        assert_ne!(first.local_id, other.local_id, "{store}");

        let mut renamed = FavoriteManga::new(MalId::from(11), "AKIRA".to_string(), "a2.jpg".to_string());
        renamed.chapters = Some(120);
        let again = repos.manga.save(renamed).await.unwrap();

        assert_eq!(again.local_id, first.local_id, "{store}");
        assert_eq!(again.chapters, Some(120), "{store}");
        assert_eq!(repos.manga.list_ids().await.unwrap().len(), 2, "{store}");
        assert!(repos.manga.delete_by_mal_id(MalId::from(11)).await.unwrap(), "{store}");
        assert!(!repos.manga.delete_by_mal_id(MalId::from(11)).await.unwrap(), "{store}");
    }
}
