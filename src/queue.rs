use std::thread::{self, JoinHandle};

use crate::{BoxedCallback, DeliveryError};

/// FIFO staging and single-threaded execution of [`BoxedCallback`]s.
///
/// Any number of producer threads may [`push`](Self::push); exactly one
/// dedicated worker thread pops and invokes, in the order the pushes
/// completed. A push never waits for a callback to execute, and callbacks run
/// with no queue lock held, so a callback may itself push without
/// deadlocking.
///
/// # Shutdown
///
/// Dropping the queue flushes: producers are disconnected, the worker drains
/// and invokes everything still staged, and the drop joins the worker before
/// returning. Queued notifications are never silently discarded, with one
/// documented exception: if a handler panics, the worker unwinds and
/// callbacks staged behind the panic are dropped uninvoked (the drop path
/// logs this).
///
/// # Example
/// ```
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
/// use courier_events::{BoxedCallback, CallbackQueue};
///
/// let queue = CallbackQueue::new().unwrap();
/// let ran = Arc::new(AtomicU64::new(0));
/// for _ in 0..4 {
///     let ran = Arc::clone(&ran);
///     queue
///         .push(BoxedCallback::new(move || {
///             ran.fetch_add(1, Ordering::SeqCst);
///         }))
///         .unwrap();
/// }
/// drop(queue); // flushes before returning
/// assert_eq!(ran.load(Ordering::SeqCst), 4);
/// ```
pub struct CallbackQueue {
    sender: Option<flume::Sender<BoxedCallback>>,
    worker: Option<JoinHandle<()>>,
}

impl CallbackQueue {
    /// Starts the queue and its dedicated delivery thread.
    ///
    /// # Returns
    /// * `Ok(CallbackQueue)` once the worker is running.
    /// * `Err(DeliveryError::WorkerSpawn)` if the thread could not be spawned.
    pub fn new() -> Result<Self, DeliveryError> {
        let (sender, receiver) = flume::unbounded::<BoxedCallback>();
        let worker = thread::Builder::new()
            .name("event-delivery".to_string())
            .spawn(move || Self::drain(receiver))
            .map_err(DeliveryError::WorkerSpawn)?;
        log::debug!("callback queue started");
        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Worker loop. Blocks while the queue is empty; once every sender is
    /// gone it still yields whatever is buffered, then ends: shutdown
    /// flushes rather than discards.
    fn drain(receiver: flume::Receiver<BoxedCallback>) {
        for callback in receiver.iter() {
            callback.invoke();
        }
        log::debug!("callback queue drained, worker exiting");
    }

    /// Appends a callback to the tail of the queue.
    ///
    /// Callable from any thread; returns as soon as the callback is staged.
    ///
    /// # Returns
    /// * `Ok(())` once the callback is staged for the worker.
    /// * `Err(DeliveryError::QueueClosed)` if shutdown has begun or the
    ///   worker died; the callback is dropped without running.
    pub fn push(&self, callback: BoxedCallback) -> Result<(), DeliveryError> {
        let sender = self.sender.as_ref().ok_or(DeliveryError::QueueClosed)?;
        sender.send(callback).map_err(|_| {
            log::error!("callback rejected: delivery worker is gone");
            DeliveryError::QueueClosed
        })
    }

    /// Number of callbacks staged and not yet claimed by the worker.
    pub fn len(&self) -> usize {
        self.sender.as_ref().map_or(0, flume::Sender::len)
    }

    /// Returns `true` when no callbacks are staged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Drop for CallbackQueue {
    fn drop(&mut self) {
        // Disconnect producers first so the worker's iterator terminates
        // after the remaining callbacks have been invoked.
        drop(self.sender.take());
        if let Some(worker) = self.worker.take() {
            if worker.thread().id() == thread::current().id() {
                // The last handle was released from a callback on the
                // delivery thread itself; joining here would deadlock. The
                // worker still drains whatever is staged before exiting.
                log::warn!("callback queue released on its own delivery thread, skipping join");
                return;
            }
            if worker.join().is_err() {
                log::error!("delivery worker panicked; callbacks staged behind the panic were dropped");
            }
        }
    }
}
