use crate::event::DomainEvent;
use crate::value::MalId;
use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by manga stores.
#[derive(Error, Debug)]
pub enum MangaError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("Duplicate manga: {0}")]
    DuplicateKey(MalId),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Changes to the set of favorite mangas.
#[derive(Debug, Clone, PartialEq)]
pub enum MangaEvent {
    Favorited { mal_id: MalId },
    Unfavorited { mal_id: MalId },
}

impl DomainEvent for MangaEvent {
    fn aggregate_id(&self) -> i64 {
        match self {
            MangaEvent::Favorited { mal_id } => mal_id.as_i64(),
            MangaEvent::Unfavorited { mal_id } => mal_id.as_i64(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            MangaEvent::Favorited { .. } => "manga_favorited",
            MangaEvent::Unfavorited { .. } => "manga_unfavorited",
        }
    }
}

/// Manga saved as a favorite.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteManga {
    /// Local surrogate key, 0 until the row is stored.
    pub local_id: i64,
    pub mal_id: MalId,
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
    /// JSON array of author names
    pub authors: Option<String>,
    /// JSON array of genre names
    pub genres: Option<String>,
    pub pending_events: Vec<MangaEvent>,
}

impl FavoriteManga {
    pub fn new(mal_id: MalId, title: String, image_url: String) -> Self {
        Self {
            local_id: 0,
            mal_id,
            title,
            title_english: None,
            image_url,
            kind: None,
            status: None,
            chapters: None,
            volumes: None,
            score: None,
            synopsis: None,
            published_from: None,
            published_to: None,
            authors: None,
            genres: None,
            pending_events: Vec::new(),
        }
    }

    pub fn mark_favorited(&mut self) {
        self.pending_events.push(MangaEvent::Favorited {
            mal_id: self.mal_id,
        });
    }

    pub fn mark_unfavorited(&mut self) {
        self.pending_events.push(MangaEvent::Unfavorited {
            mal_id: self.mal_id,
        });
    }

    pub fn pop_events(&mut self) -> Vec<MangaEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

/// Storage of favorite mangas, unique by `mal_id`.
#[async_trait]
pub trait MangaRepository: Send + Sync {
    async fn find_by_mal_id(&self, mal_id: MalId) -> Result<Option<FavoriteManga>, MangaError>;
    /// Insert or replace, keyed by `mal_id`. An existing row keeps its `local_id`.
    async fn save(&self, manga: FavoriteManga) -> Result<FavoriteManga, MangaError>;
    async fn delete_by_mal_id(&self, mal_id: MalId) -> Result<bool, MangaError>;
    /// Ordered by title ascending.
    async fn list_all(&self) -> Result<Vec<FavoriteManga>, MangaError>;
    async fn list_ids(&self) -> Result<HashSet<MalId>, MangaError>;
}
