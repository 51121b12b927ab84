/// Errors that can occur while delivering events.
///
/// - `QueueClosed`: the delivery queue has begun shutting down.
/// - `WorkerSpawn`: the dedicated delivery thread could not be started.
#[derive(Debug)]
pub enum DeliveryError {
    /// Emitting/Pushing:
    /// - The queue's shutdown has begun (or its worker died); the callback
    ///   was not enqueued.
    QueueClosed,

    /// Creating a queue:
    /// - The OS refused to spawn the delivery thread.
    WorkerSpawn(std::io::Error),
}

impl PartialEq for DeliveryError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (DeliveryError::QueueClosed, DeliveryError::QueueClosed) => true,
            (DeliveryError::WorkerSpawn(a), DeliveryError::WorkerSpawn(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}
impl Eq for DeliveryError {}

impl std::fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeliveryError::QueueClosed => write!(f, "delivery queue is closed"),
            DeliveryError::WorkerSpawn(e) => write!(f, "failed to spawn delivery worker: {}", e),
        }
    }
}

impl std::error::Error for DeliveryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeliveryError::WorkerSpawn(e) => Some(e),
            DeliveryError::QueueClosed => None,
        }
    }
}
