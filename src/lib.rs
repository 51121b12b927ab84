//! # Courier Events Crate
//!
//! This crate is an in-process, cross-thread event delivery core: library
//! internals emit events from any thread, and host-supplied handlers run on
//! one dedicated delivery thread, in emission order.
//!
//! - **BoxedCallback**: An owning, type-erased, single-invocation unit of
//!   deferred work.
//! - **CallbackRegistry**: Maps each event kind to an optional host handler
//!   plus that kind's cleanup routine, and forwards emissions to the queue.
//! - **CallbackQueue**: FIFO staging drained by the single delivery thread.
//! - **Context**: Per-session handle passed to every handler.
//!
//! Emitting never blocks on handler execution; a handler that emits from the
//! delivery thread cannot deadlock. Dropping the queue flushes every staged
//! callback before returning, so registered notifications are not silently
//! lost on shutdown.
//!
//! ```
//! use std::sync::Arc;
//! use courier_events::{
//!     CallbackQueue, CallbackRegistry, ChatMessage, Context, Event, EventKind, UserId,
//! };
//!
//! let queue = Arc::new(CallbackQueue::new().unwrap());
//! let registry = CallbackRegistry::new(&queue);
//! let context = Arc::new(Context::new("demo"));
//!
//! registry.register(
//!     EventKind::MessageReceived,
//!     Arc::new(|context: &Context, event: &Event| {
//!         if let Event::MessageReceived(message) = event {
//!             println!("[{}] {}: {}", context.session(), message.from, message.body);
//!         }
//!     }),
//! );
//!
//! registry
//!     .emit(
//!         &context,
//!         Event::MessageReceived(ChatMessage {
//!             from: UserId::new("alice"),
//!             body: "hello".into(),
//!         }),
//!     )
//!     .unwrap();
//!
//! drop(registry);
//! drop(queue); // delivers everything still staged, then joins the worker
//! ```

mod callback;
mod constants;
mod context;
mod error;
mod event;
mod queue;
mod registry;

pub use callback::BoxedCallback;
pub use constants::{Cleanup, Handler};
pub use context::Context;
pub use error::DeliveryError;
pub use event::{
    ChatMessage, ChatRequest, ChatResponse, ConnectionState, Event, EventKind, SecretKey, UserId,
    UserStatus,
};
pub use queue::CallbackQueue;
pub use registry::CallbackRegistry;

#[cfg(test)]
mod tests;
