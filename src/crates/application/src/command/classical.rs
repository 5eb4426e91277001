use super::shared::KeyedLocks;
use crate::context::AppContext;
use crate::error::AppError;
use crate::event::event_bus::{publish_all, EventBus};
use domain::classical_work::{ClassicalWork, ClassicalWorkRepository};
use domain::value::WorkId;
use log::{debug, info};
use std::sync::Arc;

/// Rates classical works and remembers the ones shown.
pub struct ClassicalWorkService<B: EventBus> {
    work_repository: Arc<dyn ClassicalWorkRepository>,
    locks: KeyedLocks,
    event_bus: Arc<B>,
}

impl<B: EventBus> ClassicalWorkService<B> {
    pub fn new(work_repository: Arc<dyn ClassicalWorkRepository>, event_bus: Arc<B>) -> Self {
        Self {
            work_repository,
            locks: KeyedLocks::new(),
            event_bus,
        }
    }

    /// Stores `work` with the given rating, replacing any stored copy.
    pub async fn rate(
        &self,
        ctx: &AppContext,
        mut work: ClassicalWork,
        rating: i32,
    ) -> Result<ClassicalWork, AppError> {
        let _guard = self.locks.lock(work.id.as_i64()).await;
        if let Some(stored) = self.work_repository.find_by_id(work.id).await? {
            work.rating = stored.rating;
        }
        self.rate_locked(ctx, work, rating).await
    }

    /// Rates a work that is already stored locally.
    pub async fn rate_known(
        &self,
        ctx: &AppContext,
        work_id: WorkId,
        rating: i32,
    ) -> Result<ClassicalWork, AppError> {
        let _guard = self.locks.lock(work_id.as_i64()).await;
        let work = self
            .work_repository
            .find_by_id(work_id)
            .await?
            .ok_or_else(|| AppError::AggregateNotFound("ClassicalWork".to_string(), work_id.to_string()))?;
        self.rate_locked(ctx, work, rating).await
    }

    /// Caches works that were shown, unrated. Stored works, and their ratings, are left alone.
    /// Returns how many were new.
    pub async fn remember(&self, works: &[ClassicalWork]) -> Result<usize, AppError> {
        let mut added = 0;
        for work in works {
            let _guard = self.locks.lock(work.id.as_i64()).await;
            if self.work_repository.find_by_id(work.id).await?.is_some() {
                continue;
            }
            let mut unrated = work.clone();
            unrated.rating = 0;
            unrated.pending_events.clear();
            self.work_repository.save(unrated).await?;
            added += 1;
        }
        debug!("Remembered {} of {} works", added, works.len());
        Ok(added)
    }

    async fn rate_locked(
        &self,
        ctx: &AppContext,
        mut work: ClassicalWork,
        rating: i32,
    ) -> Result<ClassicalWork, AppError> {
        work.set_rating(rating)?;
        let events = work.pop_events();
        let saved = self.work_repository.save(work).await?;
        publish_all(self.event_bus.as_ref(), ctx, events).await?;
        info!("Work {} rated {}", saved.id, saved.rating);
        Ok(saved)
    }
}
