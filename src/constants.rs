use std::sync::Arc;

use crate::{Context, Event};

/// Type alias for a host-supplied handler.
///
/// Invoked on the single delivery thread as `handler(&context, &event)`.
/// Handlers must be cheap: a long-blocking handler stalls every event queued
/// behind it. They may emit further events, but must not assume any thread
/// identity beyond "the one dedicated delivery thread".
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use courier_events::{Context, Event, Handler};
///
/// let handler: Handler = Arc::new(|context: &Context, event: &Event| {
///     println!("[{}] {}", context.session(), event.kind());
/// });
/// ```
pub type Handler = Arc<dyn Fn(&Context, &Event) + Send + Sync>;

/// Type alias for a per-kind cleanup routine.
///
/// Consumes the event's payload on the delivery thread, strictly after the
/// handler for the same queued unit has returned. Kinds without transient
/// resources use a no-op that simply drops the payload.
pub type Cleanup = Arc<dyn Fn(Event) + Send + Sync>;
