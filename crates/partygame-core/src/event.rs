//! Domain event abstractions.

use uuid::Uuid;

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for logging and host routing).
    fn event_type(&self) -> &'static str;

    /// Serializes the event payload to JSON.
    fn to_payload(&self) -> serde_json::Value;

    /// The session this event belongs to.
    fn session_id(&self) -> Uuid;

    /// Monotonically increasing version within the session.
    fn sequence_number(&self) -> u64;
}
