use domain::manga::FavoriteManga;
use serde::Serialize;

/// Artist as embedded in a catalog track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogArtist {
    pub id: i64,
    pub name: String,
    pub picture_url: String,
    pub fan_count: i32,
}

/// Album as embedded in a catalog track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogAlbum {
    pub id: i64,
    pub title: String,
    pub cover_url: String,
    pub track_count: i32,
}

/// A track as returned by the music catalog, carrying its artist and album.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogTrack {
    pub id: i64,
    pub title: String,
    pub rank: i32,
    pub duration_secs: i32,
    pub artist: CatalogArtist,
    pub album: CatalogAlbum,
}

/// Classical work from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogWork {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub composer_id: i64,
    pub composer_name: String,
}

/// Manga from the catalog. Author and genre names are already flattened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogManga {
    pub mal_id: i64,
    pub title: String,
    pub title_english: Option<String>,
    pub image_url: String,
    pub kind: Option<String>,
    pub status: Option<String>,
    pub chapters: Option<i32>,
    pub volumes: Option<i32>,
    pub score: Option<f64>,
    pub synopsis: Option<String>,
    pub published_from: Option<String>,
    pub published_to: Option<String>,
    pub authors: Vec<String>,
    pub genres: Vec<String>,
}

impl From<&FavoriteManga> for CatalogManga {
    fn from(manga: &FavoriteManga) -> Self {
        Self {
            mal_id: manga.mal_id.as_i64(),
            title: manga.title.clone(),
            title_english: manga.title_english.clone(),
            image_url: manga.image_url.clone(),
            kind: manga.kind.clone(),
            status: manga.status.clone(),
            chapters: manga.chapters,
            volumes: manga.volumes,
            score: manga.score,
            synopsis: manga.synopsis.clone(),
            published_from: manga.published_from.clone(),
            published_to: manga.published_to.clone(),
            authors: decode_names(manga.authors.as_deref()),
            genres: decode_names(manga.genres.as_deref()),
        }
    }
}

fn decode_names(blob: Option<&str>) -> Vec<String> {
    match blob {
        Some(s) => serde_json::from_str(s).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed name list {:?}: {}", s, e);
            Vec::new()
        }),
        None => Vec::new(),
    }
}

/// One page of search results plus the total reported by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total: u32,
    pub has_more: bool,
}

impl<T> SearchPage<T> {
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total: u32) -> Self {
        Self {
            items,
            page,
            total,
            has_more: page.saturating_mul(page_size) < total,
        }
    }
}
