use async_trait::async_trait;
use dashmap::DashMap;
use domain::classical_work::{ClassicalWork, ClassicalWorkError, ClassicalWorkRepository};
use domain::value::WorkId;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct InMemoryClassicalWorkRepository {
    store: Arc<DashMap<WorkId, ClassicalWork>>,
}

impl InMemoryClassicalWorkRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(DashMap::new()),
        }
    }
}

#[async_trait]
impl ClassicalWorkRepository for InMemoryClassicalWorkRepository {
    async fn find_by_id(&self, id: WorkId) -> Result<Option<ClassicalWork>, ClassicalWorkError> {
        Ok(self.store.get(&id).map(|v| v.clone()))
    }

    async fn save(&self, mut work: ClassicalWork) -> Result<ClassicalWork, ClassicalWorkError> {
        work.pending_events.clear();
        self.store.insert(work.id, work.clone());
        Ok(work)
    }

    async fn delete(&self, id: WorkId) -> Result<bool, ClassicalWorkError> {
        Ok(self.store.remove(&id).is_some())
    }

    async fn list_all(&self) -> Result<Vec<ClassicalWork>, ClassicalWorkError> {
        let mut works: Vec<ClassicalWork> = self.store.iter().map(|e| e.value().clone()).collect();
        works.sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        Ok(works)
    }

    async fn list_ids(&self) -> Result<HashSet<WorkId>, ClassicalWorkError> {
        Ok(self.store.iter().map(|e| *e.key()).collect())
    }
}
