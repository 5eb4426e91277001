use crate::catalog::ClassicalCatalog;
use crate::error::AppError;
use crate::reconcile::{merge_remote, Reconciled};
use domain::classical_work::{ClassicalWork, ClassicalWorkRepository};
use domain::value::WorkId;
use log::{debug, warn};
use model::catalog::CatalogWork;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Locally known works by rating, highest first, followed by a fresh random selection.
#[derive(Clone)]
pub struct GetClassicalWorks {
    catalog: Arc<dyn ClassicalCatalog>,
    work_repository: Arc<dyn ClassicalWorkRepository>,
}

impl GetClassicalWorks {
    pub fn new(
        catalog: Arc<dyn ClassicalCatalog>,
        work_repository: Arc<dyn ClassicalWorkRepository>,
    ) -> Self {
        Self {
            catalog,
            work_repository,
        }
    }

    pub async fn handle(&self) -> Result<Reconciled<ClassicalWork>, AppError> {
        let saved = self.work_repository.list_all().await?;
        let remote = match self.catalog.random_works().await {
            Ok(works) => Ok(self.with_portraits(works).await),
            Err(e) => {
                warn!("Random works unavailable: {}", e);
                Err(e)
            }
        };
        Ok(merge_remote(saved, remote, |a, b| b.rating.cmp(&a.rating)))
    }

    /// Failing to load portraits only leaves the pictures out.
    async fn with_portraits(&self, works: Vec<CatalogWork>) -> Vec<ClassicalWork> {
        let composer_ids: Vec<i64> = works
            .iter()
            .map(|w| w.composer_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let portraits = if composer_ids.is_empty() {
            HashMap::new()
        } else {
            match self.catalog.composer_portraits(&composer_ids).await {
                Ok(portraits) => portraits,
                Err(e) => {
                    warn!("Composer portraits unavailable: {}", e);
                    HashMap::new()
                }
            }
        };
        debug!(
            "Loaded {} portraits for {} composers",
            portraits.len(),
            composer_ids.len()
        );

        works
            .into_iter()
            .map(|w| {
                let picture = portraits.get(&w.composer_id).cloned();
                ClassicalWork::new(WorkId::from(w.id), w.title, w.composer_name, picture, w.genre)
            })
            .collect()
    }
}
