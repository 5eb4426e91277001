use crate::event::event_bus::{CorrelationId, EventId};

/// Tracing identity of one user action and everything it causes.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub event_id: EventId,
    pub correlation_id: CorrelationId,
    pub causation_id: EventId,
}

impl AppContext {
    pub fn new() -> Self {
        let event_id = EventId::new();
        Self {
            event_id: event_id.clone(),
            correlation_id: CorrelationId::new(),
            causation_id: event_id,
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
