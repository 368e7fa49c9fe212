pub mod product_events;

/// Trait for events emitted by the catalog
pub trait DomainEvent {
    /// Get the event type name
    fn event_type() -> &'static str;

    /// Get the event version
    fn event_version() -> i32 {
        1
    }
}
