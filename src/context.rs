/// Per-session handle passed to every delivered handler.
///
/// The hosting library creates one `Context` per session (typically behind an
/// [`Arc`](std::sync::Arc)) and passes it explicitly to
/// [`CallbackRegistry::emit`](crate::CallbackRegistry::emit); each queued
/// callback carries a reference so the handler can tell which session the
/// event belongs to. The registry and queue never own the context.
///
/// # Example
/// ```
/// use courier_events::Context;
///
/// let context = Context::new("session-1");
/// assert_eq!(context.session(), "session-1");
/// ```
#[derive(Debug)]
pub struct Context {
    session: String,
}

impl Context {
    pub fn new(session: impl Into<String>) -> Self {
        Self {
            session: session.into(),
        }
    }

    /// The session label this context was created with.
    pub fn session(&self) -> &str {
        &self.session
    }
}
