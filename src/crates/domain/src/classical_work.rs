use crate::event::DomainEvent;
use crate::value::WorkId;
use async_trait::async_trait;
use std::collections::HashSet;
use thiserror::Error;

pub const MAX_RATING: i32 = 5;

/// Errors raised by classical work stores and rating.
#[derive(Error, Debug)]
pub enum ClassicalWorkError {
    #[error("Database error: {0}")]
    DbErr(String),
    #[error("Duplicate work: {0}")]
    DuplicateKey(WorkId),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Rating changes.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassicalWorkEvent {
    Rated { work_id: WorkId, rating: i32 },
}

impl DomainEvent for ClassicalWorkEvent {
    fn aggregate_id(&self) -> i64 {
        match self {
            ClassicalWorkEvent::Rated { work_id, .. } => work_id.as_i64(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ClassicalWorkEvent::Rated { .. } => "work_rated",
        }
    }
}

/// A classical work known locally. `rating == 0` means it was shown but never rated.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassicalWork {
    pub id: WorkId,
    pub title: String,
    pub composer_name: String,
    pub composer_picture: Option<String>,
    pub genre: String,
    pub rating: i32,
    pub pending_events: Vec<ClassicalWorkEvent>,
}

impl ClassicalWork {
    pub fn new(
        id: WorkId,
        title: String,
        composer_name: String,
        composer_picture: Option<String>,
        genre: String,
    ) -> Self {
        Self {
            id,
            title,
            composer_name,
            composer_picture,
            genre,
            rating: 0,
            pending_events: Vec::new(),
        }
    }

    pub fn set_rating(&mut self, rating: i32) -> Result<(), ClassicalWorkError> {
        if !(0..=MAX_RATING).contains(&rating) {
            return Err(ClassicalWorkError::ValidationError(format!(
                "Rating must be between 0 and {}, got {}",
                MAX_RATING, rating
            )));
        }
        if self.rating != rating {
            self.rating = rating;
            self.pending_events.push(ClassicalWorkEvent::Rated {
                work_id: self.id,
                rating,
            });
        }
        Ok(())
    }

    pub fn pop_events(&mut self) -> Vec<ClassicalWorkEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

/// Storage of known works and their ratings.
#[async_trait]
pub trait ClassicalWorkRepository: Send + Sync {
    async fn find_by_id(&self, id: WorkId) -> Result<Option<ClassicalWork>, ClassicalWorkError>;
    /// Insert or replace, keyed by the work id.
    async fn save(&self, work: ClassicalWork) -> Result<ClassicalWork, ClassicalWorkError>;
    async fn delete(&self, id: WorkId) -> Result<bool, ClassicalWorkError>;
    /// Ordered by rating descending, then id.
    async fn list_all(&self) -> Result<Vec<ClassicalWork>, ClassicalWorkError>;
    async fn list_ids(&self) -> Result<HashSet<WorkId>, ClassicalWorkError>;
}
