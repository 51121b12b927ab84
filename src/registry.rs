use std::sync::{Arc, Weak};

use dashmap::DashMap;

use crate::{
    BoxedCallback, CallbackQueue, Cleanup, Context, DeliveryError, Event, EventKind, Handler,
};

/// Per-kind registration entry: the host's handler, if any, and the fixed
/// cleanup routine for the kind's payload.
struct Slot {
    handler: Option<Handler>,
    cleanup: Cleanup,
}

/// Registration table mapping each [`EventKind`] to an optional host handler
/// and forwarding emissions into the [`CallbackQueue`].
///
/// The registry holds the queue weakly: it references delivery without
/// keeping it alive, so dropping the host's queue handle always triggers the
/// flush-and-join shutdown even while handlers hold registry clones.
///
/// Cloning is cheap and shares the table, so internal subsystems can emit
/// from any thread, including from inside a handler running on the delivery
/// thread.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use courier_events::{CallbackQueue, CallbackRegistry, Context, Event, EventKind};
///
/// let queue = Arc::new(CallbackQueue::new().unwrap());
/// let registry = CallbackRegistry::new(&queue);
/// let context = Arc::new(Context::new("session-1"));
///
/// registry.register(
///     EventKind::LogLine,
///     Arc::new(|context: &Context, event: &Event| {
///         if let Event::LogLine(line) = event {
///             println!("[{}] {line}", context.session());
///         }
///     }),
/// );
/// registry
///     .emit(&context, Event::LogLine("circuit established".into()))
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct CallbackRegistry {
    slots: Arc<DashMap<EventKind, Slot>>,
    queue: Weak<CallbackQueue>,
}

impl CallbackRegistry {
    /// Creates a registry delivering through `queue`, with every kind
    /// present, no handlers, and each kind's fixed cleanup in place.
    pub fn new(queue: &Arc<CallbackQueue>) -> Self {
        let slots = DashMap::new();
        for kind in EventKind::ALL {
            slots.insert(
                kind,
                Slot {
                    handler: None,
                    cleanup: default_cleanup(kind),
                },
            );
        }
        Self {
            slots: Arc::new(slots),
            queue: Arc::downgrade(queue),
        }
    }

    /// Sets or replaces the handler for `kind`.
    ///
    /// Safe to call at any time, including while other threads emit: the
    /// replacement applies to emissions that read the table afterwards.
    pub fn register(&self, kind: EventKind, handler: Handler) {
        if let Some(mut slot) = self.slots.get_mut(&kind) {
            slot.handler = Some(handler);
        }
        log::debug!("handler registered for {kind}");
    }

    /// Clears the handler for `kind`; later emissions of that kind become
    /// silent no-ops.
    pub fn unregister(&self, kind: EventKind) {
        if let Some(mut slot) = self.slots.get_mut(&kind) {
            slot.handler = None;
        }
        log::debug!("handler cleared for {kind}");
    }

    /// Returns `true` if `kind` currently has a handler.
    pub fn has_handler(&self, kind: EventKind) -> bool {
        self.slots
            .get(&kind)
            .map_or(false, |slot| slot.handler.is_some())
    }

    /// The kinds that currently have a handler.
    pub fn registered_kinds(&self) -> Vec<EventKind> {
        self.slots
            .iter()
            .filter(|entry| entry.handler.is_some())
            .map(|entry| *entry.key())
            .collect()
    }

    /// Delivers `event` to its registered handler, if any.
    ///
    /// With no handler this returns immediately: no allocation, no queue
    /// interaction, not an error. Otherwise the context, handler, payload,
    /// and the kind's cleanup are packaged into one [`BoxedCallback`] and
    /// staged; the worker later runs `handler(&context, &event)` and then
    /// the cleanup, in that order, as one unit. `emit` never waits for the
    /// handler to execute.
    ///
    /// # Returns
    /// * `Ok(())` if the event was staged, or silently skipped for lack of
    ///   a handler.
    /// * `Err(DeliveryError::QueueClosed)` if queue shutdown has begun; the
    ///   payload is released without the handler running.
    pub fn emit(&self, context: &Arc<Context>, event: Event) -> Result<(), DeliveryError> {
        // Clone out of the table before building the callback: no user code
        // runs while a table shard is held.
        let claimed = self.slots.get(&event.kind()).and_then(|slot| {
            slot.handler
                .as_ref()
                .map(|handler| (Arc::clone(handler), Arc::clone(&slot.cleanup)))
        });
        let (handler, cleanup) = match claimed {
            Some(claimed) => claimed,
            None => return Ok(()),
        };

        let queue = self.queue.upgrade().ok_or(DeliveryError::QueueClosed)?;
        log::trace!("emitting {}", event.kind());
        let context = Arc::clone(context);
        queue.push(BoxedCallback::new(move || {
            handler(&context, &event);
            cleanup(event);
        }))
    }

    #[cfg(test)]
    pub(crate) fn set_cleanup(&self, kind: EventKind, cleanup: Cleanup) {
        if let Some(mut slot) = self.slots.get_mut(&kind) {
            slot.cleanup = cleanup;
        }
    }
}

/// The fixed cleanup routine for `kind`. Only identity creation carries a
/// transient resource: its key material is wiped in place once delivery
/// completes. Every other payload is simply dropped.
fn default_cleanup(kind: EventKind) -> Cleanup {
    match kind {
        EventKind::IdentityCreated => Arc::new(|event: Event| {
            if let Event::IdentityCreated(mut key) = event {
                key.wipe();
            }
        }),
        _ => Arc::new(|_event: Event| {}),
    }
}
