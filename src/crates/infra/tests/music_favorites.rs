mod common;

use application::catalog::{CatalogError, SearchField};
use application::context::AppContext;
use application::error::AppError;
use application::query::music::{GetFavoriteTracks, GetTopTracks, SearchTracks};
use application::query::QueryError;
use common::{all_stores, catalog_track, FakeMusicCatalog, Harness};
use domain::artist::Artist;
use domain::value::{AlbumId, ArtistId, TrackId};
use std::collections::HashSet;
use std::sync::Arc;

fn ids(set: HashSet<TrackId>) -> Vec<i64> {
    let mut ids: Vec<i64> = set.into_iter().map(|id| id.as_i64()).collect();
    ids.sort();
    ids
}

#[tokio::test]
async fn test_toggle_creates_parents_and_untoggle_keeps_them() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let ctx = AppContext::new();
        let track = catalog_track(1, 10, 20);

        let added = h.tracks.toggle_favorite(&ctx, &track).await.unwrap();
        assert!(added.favorited, "{store}");
        assert_eq!(added.favorites.len(), 1, "{store}");
        assert_eq!(added.favorites[0].artist_name, "Artist 10", "{store}");
        assert_eq!(added.favorites[0].album_title, "Album 20", "{store}");
        assert!(h.repos.artist.find_by_id(ArtistId::from(10)).await.unwrap().is_some());
        assert!(h.repos.album.find_by_id(AlbumId::from(20)).await.unwrap().is_some());

        let removed = h.tracks.toggle_favorite(&ctx, &track).await.unwrap();
        assert!(!removed.favorited, "{store}");
        assert!(removed.favorites.is_empty(), "{store}");
        assert!(h.repos.track.list_ids().await.unwrap().is_empty(), "{store}");
        assert!(h.repos.artist.find_by_id(ArtistId::from(10)).await.unwrap().is_some(), "{store}");
        assert!(h.repos.album.find_by_id(AlbumId::from(20)).await.unwrap().is_some(), "{store}");
    }
}

#[tokio::test]
async fn test_tracks_share_one_artist_and_album_row() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let ctx = AppContext::new();

        h.tracks.toggle_favorite(&ctx, &catalog_track(1, 10, 20)).await.unwrap();
        h.tracks.toggle_favorite(&ctx, &catalog_track(2, 10, 20)).await.unwrap();

        assert_eq!(h.repos.artist.list_all().await.unwrap().len(), 1, "{store}");
        assert_eq!(h.repos.album.list_all().await.unwrap().len(), 1, "{store}");
        assert_eq!(ids(h.repos.track.list_ids().await.unwrap()), vec![1, 2], "{store}");
    }
}

#[tokio::test]
async fn test_add_favorite_twice_writes_once() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let ctx = AppContext::new();
        let track = catalog_track(7, 10, 20);

        assert!(h.tracks.add_favorite(&ctx, &track).await.unwrap(), "{store}");
        let first = h.repos.track.find_by_id(TrackId::from(7)).await.unwrap().unwrap();
        assert!(!h.tracks.add_favorite(&ctx, &track).await.unwrap(), "{store}");
        let second = h.repos.track.find_by_id(TrackId::from(7)).await.unwrap().unwrap();

        assert_eq!(first.favorited_at, second.favorited_at, "{store}");
        assert_eq!(h.repos.track.list_all().await.unwrap().len(), 1, "{store}");
    }
}

#[tokio::test]
async fn test_stored_artist_is_not_rewritten() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        h.repos
            .artist
            .save(Artist::new(
                ArtistId::from(10),
                "Original Name".to_string(),
                "https://cdn.test/old.jpg".to_string(),
                1,
            ))
            .await
            .unwrap();

        h.tracks
            .add_favorite(&AppContext::new(), &catalog_track(1, 10, 20))
            .await
            .unwrap();

        let artist = h.repos.artist.find_by_id(ArtistId::from(10)).await.unwrap().unwrap();
        assert_eq!(artist.name, "Original Name", "{store}");
        assert_eq!(artist.fan_count, 1, "{store}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_adds_of_one_track_store_one_row() {
    for (store, repos) in all_stores().await {
        let h = Arc::new(Harness::new(repos).await);
        let track = catalog_track(3, 10, 20);

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let h = h.clone();
                let track = track.clone();
                tokio::spawn(async move { h.tracks.add_favorite(&AppContext::new(), &track).await })
            })
            .collect();
        let mut created = 0;
        for task in tasks {
            if task.await.unwrap().unwrap() {
                created += 1;
            }
        }

        assert_eq!(created, 1, "{store}");
        assert_eq!(h.repos.track.list_all().await.unwrap().len(), 1, "{store}");
        assert_eq!(h.repos.artist.list_all().await.unwrap().len(), 1, "{store}");
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_toggles_alternate() {
    for (store, repos) in all_stores().await {
        let h = Arc::new(Harness::new(repos).await);
        let track = catalog_track(4, 10, 20);

        let tasks: Vec<_> = (0..4)
            .map(|_| {
                let h = h.clone();
                let track = track.clone();
                tokio::spawn(async move { h.tracks.toggle_favorite(&AppContext::new(), &track).await })
            })
            .collect();
        let mut favorited = 0;
        for task in tasks {
            if task.await.unwrap().unwrap().favorited {
                favorited += 1;
            }
        }

        // an even number of serialized toggles ends where it started
        assert_eq!(favorited, 2, "{store}");
        assert!(h.repos.track.list_ids().await.unwrap().is_empty(), "{store}");
    }
}

#[tokio::test]
async fn test_delete_artist_cascades_to_albums_and_tracks() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let ctx = AppContext::new();
        for track in [catalog_track(1, 10, 20), catalog_track(2, 10, 21), catalog_track(3, 11, 30)] {
            h.tracks.add_favorite(&ctx, &track).await.unwrap();
        }

        let mut removed: Vec<i64> = h
            .tracks
            .delete_artist(&ctx, ArtistId::from(10))
            .await
            .unwrap()
            .into_iter()
            .map(|id| id.as_i64())
            .collect();
        removed.sort();

        assert_eq!(removed, vec![1, 2], "{store}");
        assert_eq!(ids(h.repos.track.list_ids().await.unwrap()), vec![3], "{store}");
        let albums = h.repos.album.list_ids().await.unwrap();
        assert_eq!(albums, HashSet::from([AlbumId::from(30)]), "{store}");
        assert_eq!(
            h.repos.artist.list_ids().await.unwrap(),
            HashSet::from([ArtistId::from(11)]),
            "{store}"
        );
        assert_eq!(h.favorite_ids.favorite_track_ids(), HashSet::from([3]), "{store}");
    }
}

#[tokio::test]
async fn test_cascade_clears_favorite_ids() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let ctx = AppContext::new();
        h.tracks.add_favorite(&ctx, &catalog_track(1, 10, 20)).await.unwrap();
        h.tracks.add_favorite(&ctx, &catalog_track(2, 10, 21)).await.unwrap();
        let mut rx = h.favorite_ids.subscribe_tracks();
        assert_eq!(*rx.borrow_and_update(), HashSet::from([1, 2]), "{store}");

        h.tracks.delete_album(&ctx, AlbumId::from(21)).await.unwrap();
        assert!(rx.has_changed().unwrap(), "{store}");
        assert_eq!(*rx.borrow_and_update(), HashSet::from([1]), "{store}");

        h.tracks.delete_artist(&ctx, ArtistId::from(10)).await.unwrap();
        assert!(rx.borrow_and_update().is_empty(), "{store}");
    }
}

#[tokio::test]
async fn test_delete_album_keeps_artist() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let ctx = AppContext::new();
        h.tracks.add_favorite(&ctx, &catalog_track(1, 10, 20)).await.unwrap();
        h.tracks.add_favorite(&ctx, &catalog_track(2, 10, 21)).await.unwrap();

        let removed = h.tracks.delete_album(&ctx, AlbumId::from(20)).await.unwrap();

        assert_eq!(removed, vec![TrackId::from(1)], "{store}");
        assert_eq!(ids(h.repos.track.list_ids().await.unwrap()), vec![2], "{store}");
        assert!(h.repos.artist.find_by_id(ArtistId::from(10)).await.unwrap().is_some(), "{store}");
    }
}

#[tokio::test]
async fn test_delete_unknown_artist_is_not_found() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let result = h.tracks.delete_artist(&AppContext::new(), ArtistId::from(99)).await;
        assert!(
            matches!(result, Err(AppError::AggregateNotFound(_, _))),
            "{store}: {result:?}"
        );
    }
}

#[tokio::test]
async fn test_remove_favorite_reports_whether_it_existed() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let ctx = AppContext::new();
        h.tracks.add_favorite(&ctx, &catalog_track(1, 10, 20)).await.unwrap();

        assert!(h.tracks.remove_favorite(&ctx, TrackId::from(1)).await.unwrap(), "{store}");
        assert!(!h.tracks.remove_favorite(&ctx, TrackId::from(1)).await.unwrap(), "{store}");
    }
}

#[tokio::test]
async fn test_chart_flags_favorites_in_remote_order() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let chart = vec![catalog_track(3, 10, 20), catalog_track(1, 11, 21), catalog_track(2, 12, 22)];
        let catalog = Arc::new(FakeMusicCatalog::new(chart));
        h.tracks.add_favorite(&AppContext::new(), &catalog_track(1, 11, 21)).await.unwrap();

        let result = GetTopTracks::new(catalog, h.repos.track.clone())
            .handle()
            .await
            .unwrap();

        assert!(!result.is_degraded(), "{store}");
        let shown: Vec<(i64, bool)> = result.items.iter().map(|f| (f.item.id, f.is_favorite)).collect();
        assert_eq!(shown, vec![(3, false), (1, true), (2, false)], "{store}");
    }
}

#[tokio::test]
async fn test_chart_failure_is_reported_not_raised() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let catalog = Arc::new(FakeMusicCatalog::new(vec![catalog_track(1, 10, 20)]));
        catalog.fail(true);

        let result = GetTopTracks::new(catalog, h.repos.track.clone())
            .handle()
            .await
            .unwrap();

        assert!(result.items.is_empty(), "{store}");
        assert!(
            matches!(result.remote_error, Some(CatalogError::RemoteUnavailable(_))),
            "{store}"
        );
    }
}

#[tokio::test]
async fn test_search_pages_through_results() {
    let repos = common::sqlite_repositories().await;
    let tracks = vec![catalog_track(1, 10, 20), catalog_track(2, 10, 21), catalog_track(3, 10, 22), catalog_track(4, 11, 23)];
    let search = SearchTracks::new(Arc::new(FakeMusicCatalog::new(tracks)), repos.track.clone());

    let first = search.handle("artist 10", SearchField::Artist, 1).await.unwrap();
    assert_eq!(first.items.len(), 2);
    assert_eq!(first.next_page, Some(2));

    let second = search.handle("artist 10", SearchField::Artist, 2).await.unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].item.id, 3);
    assert_eq!(second.next_page, None);
}

#[tokio::test]
async fn test_search_on_the_last_page_number() {
    let repos = common::sqlite_repositories().await;
    let catalog = Arc::new(FakeMusicCatalog::new(vec![catalog_track(1, 10, 20)]));
    let search = SearchTracks::new(catalog.clone(), repos.track.clone());

    let result = search.handle("track", SearchField::Track, u32::MAX).await.unwrap();
    assert!(result.items.is_empty());
    assert_eq!(result.next_page, None);

    catalog.fail(true);
    let result = search.handle("track", SearchField::Track, u32::MAX).await.unwrap();
    assert!(result.is_degraded());
    assert_eq!(result.next_page, None);
}

#[tokio::test]
async fn test_search_rejects_blank_query() {
    let repos = common::sqlite_repositories().await;
    let search = SearchTracks::new(Arc::new(FakeMusicCatalog::new(Vec::new())), repos.track.clone());

    let result = search.handle("   ", SearchField::Track, 1).await;
    assert!(matches!(
        result,
        Err(AppError::QueryError(QueryError::InvalidInput(_)))
    ));
    let result = search.handle("x", SearchField::Track, 0).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_favorite_ids_follow_toggles() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let ctx = AppContext::new();
        let mut rx = h.favorite_ids.subscribe_tracks();
        assert!(rx.borrow_and_update().is_empty(), "{store}");

        h.tracks.toggle_favorite(&ctx, &catalog_track(5, 10, 20)).await.unwrap();
        assert!(rx.has_changed().unwrap(), "{store}");
        assert_eq!(*rx.borrow_and_update(), HashSet::from([5]), "{store}");

        h.tracks.toggle_favorite(&ctx, &catalog_track(5, 10, 20)).await.unwrap();
        assert!(rx.borrow_and_update().is_empty(), "{store}");
    }
}

#[tokio::test]
async fn test_favorite_tracks_are_listed_in_favorite_order() {
    for (store, repos) in all_stores().await {
        let h = Harness::new(repos).await;
        let ctx = AppContext::new();
        h.tracks.add_favorite(&ctx, &catalog_track(9, 10, 20)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        h.tracks.add_favorite(&ctx, &catalog_track(2, 11, 21)).await.unwrap();

        let favorites = GetFavoriteTracks::new(h.repos.favorite_track_dao.clone())
            .handle()
            .await
            .unwrap();

        let shown: Vec<i64> = favorites.iter().map(|f| f.track_id).collect();
        assert_eq!(shown, vec![9, 2], "{store}");
        assert_eq!(favorites[1].artist_name, "Artist 11", "{store}");
        assert_eq!(favorites[1].cover_url, "https://cdn.test/album/21.jpg", "{store}");
    }
}
