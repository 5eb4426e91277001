use crate::context::AppContext;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::event::DomainEvent;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Event together with its tracing ids.
#[derive(Debug, Clone)]
pub struct EventEnvelope<T> {
    pub id: EventId,
    pub aggregate_id: i64,
    pub name: &'static str,
    pub timestamp: DateTime<Utc>,
    pub payload: T,
    pub correlation_id: CorrelationId,
    // id of the event or action that caused this one
    pub causation_id: EventId,
}

impl<E: DomainEvent> EventEnvelope<E> {
    pub fn new(event: E, ctx: &AppContext) -> Self {
        Self {
            id: EventId::new(),
            aggregate_id: event.aggregate_id(),
            name: event.name(),
            timestamp: Utc::now(),
            payload: event,
            correlation_id: ctx.correlation_id.clone(),
            causation_id: ctx.event_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct EventId(Uuid);

impl EventId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct CorrelationId(Uuid);

impl CorrelationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reacts to one event type.
#[async_trait]
pub trait Handler<E>: Send + Sync {
    async fn handle(&self, event: &EventEnvelope<E>);
}

/// Handler with the event type erased, so one bus can hold handlers of every event type.
#[async_trait]
pub trait ErasedHandler: Send + Sync {
    async fn handle_erased(&self, event: &(dyn Any + Send + Sync));
}

/// Routes published events to the handlers subscribed to their type.
#[async_trait]
pub trait EventBus: Send + Sync {
    async fn publish<E>(&self, event: EventEnvelope<E>) -> Result<(), AppError>
    where
        E: Send + Sync + 'static;

    async fn subscribe<E>(&mut self, handler: Arc<dyn Handler<E>>)
    where
        E: Send + Sync + 'static;
}

/// Wraps each event in an envelope under `ctx` and publishes them in order.
pub async fn publish_all<B, E>(bus: &B, ctx: &AppContext, events: Vec<E>) -> Result<(), AppError>
where
    B: EventBus,
    E: DomainEvent + 'static,
{
    for event in events {
        bus.publish(EventEnvelope::new(event, ctx)).await?;
    }
    Ok(())
}
