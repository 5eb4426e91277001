/// Event emitted by an aggregate, routed by its type.
pub trait DomainEvent: Send + Sync {
    fn aggregate_id(&self) -> i64;
    /// Stable name of the event, used for logging.
    fn name(&self) -> &'static str;
}
