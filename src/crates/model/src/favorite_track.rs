use serde::Serialize;

/// Favorite track joined with its artist and album, as shown on the favorites screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FavoriteTrack {
    pub track_id: i64,
    pub title: String,
    pub artist_name: String,
    pub album_title: String,
    pub cover_url: String,
}
