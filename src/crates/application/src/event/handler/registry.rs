use super::favorite_ids::FavoriteIdsProjector;
use crate::event::event_bus::{EventBus, EventEnvelope, Handler};
use domain::classical_work::ClassicalWorkEvent;
use domain::event::DomainEvent;
use domain::manga::MangaEvent;
use domain::track::TrackEvent;
use log::info;
use std::sync::Arc;

/// Writes every published event to the application log.
pub struct EventLogHandler;

#[async_trait::async_trait]
impl<E: DomainEvent + 'static> Handler<E> for EventLogHandler {
    async fn handle(&self, envelope: &EventEnvelope<E>) {
        info!(
            "{} aggregate={} correlation={} causation={}",
            envelope.name, envelope.aggregate_id, envelope.correlation_id, envelope.causation_id
        );
    }
}

pub async fn register_handlers<B: EventBus>(bus: &mut B, favorite_ids: Arc<FavoriteIdsProjector>) {
    let event_log = Arc::new(EventLogHandler);

    bus.subscribe::<TrackEvent>(event_log.clone()).await;
    bus.subscribe::<MangaEvent>(event_log.clone()).await;
    bus.subscribe::<ClassicalWorkEvent>(event_log).await;

    bus.subscribe::<TrackEvent>(favorite_ids.clone()).await;
    bus.subscribe::<MangaEvent>(favorite_ids).await;
}
