use application::error::AppError;
use application::event::event_bus::EventEnvelope;
use application::event::event_bus::{ErasedHandler, EventBus, Handler};
use async_trait::async_trait;
use futures::future::join_all;
use log::debug;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Bridges a typed `Handler<E>` to the type-erased handler list.
pub struct HandlerWrapper<E> {
    inner: Arc<dyn Handler<E>>,
}

#[async_trait]
impl<E> ErasedHandler for HandlerWrapper<E>
where
    E: Send + Sync + 'static,
{
    async fn handle_erased(&self, event: &(dyn Any + Send + Sync)) {
        if let Some(e) = event.downcast_ref::<EventEnvelope<E>>() {
            self.inner.handle(e).await;
        }
    }
}

/// Event bus living in the process. Handlers of one event type run concurrently.
#[derive(Clone)]
pub struct InMemoryEventBus {
    handlers: Arc<RwLock<HashMap<TypeId, Vec<Arc<dyn ErasedHandler>>>>>,
}

impl InMemoryEventBus {
    /// Publishing waits until every handler is done, so projections are current
    /// when a command returns.
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn handler_count<E: 'static>(&self) -> usize {
        self.handlers
            .read()
            .await
            .get(&TypeId::of::<E>())
            .map_or(0, |list| list.len())
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventBus for InMemoryEventBus {
    async fn publish<E>(&self, event: EventEnvelope<E>) -> Result<(), AppError>
    where
        E: Send + Sync + 'static,
    {
        let handlers: Option<Vec<Arc<dyn ErasedHandler>>> = {
            let guard = self.handlers.read().await;
            guard.get(&TypeId::of::<E>()).cloned()
        };

        let Some(list) = handlers else {
            debug!("No handler for {} on {}", event.name, event.aggregate_id);
            return Ok(());
        };

        let futures = list.iter().map(|h| h.handle_erased(&event));
        join_all(futures).await;
        Ok(())
    }

    async fn subscribe<E>(&mut self, handler: Arc<dyn Handler<E>>)
    where
        E: Send + Sync + 'static,
    {
        let wrapper = Arc::new(HandlerWrapper { inner: handler }) as Arc<dyn ErasedHandler>;
        self.handlers
            .write()
            .await
            .entry(TypeId::of::<E>())
            .or_default()
            .push(wrapper);
    }
}
