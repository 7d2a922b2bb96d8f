//! Requests that change a session.

use uuid::Uuid;

/// A request handed to a session command handler.
///
/// Handlers log `command_type` and `correlation_id` with every outcome so a
/// host can follow one tap of the "next" button through the logs.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Stable dotted name, e.g. `session.advance_turn`.
    fn command_type(&self) -> &'static str;

    /// Identifier the host attaches to this request.
    fn correlation_id(&self) -> Uuid;
}
