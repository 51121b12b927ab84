use std::fmt::{self, Debug, Display, Formatter};

use zeroize::{Zeroize, Zeroizing};

/// Identifier for one member of the closed set of deliverable notifications.
///
/// Every kind has a fixed payload shape on [`Event`] and a fixed cleanup
/// contract applied after its handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The network layer changed connection state.
    ConnectionStateChanged,
    /// The network layer produced a diagnostic log line.
    LogLine,
    /// A remote peer asked to open a chat.
    ChatRequestReceived,
    /// A remote peer answered one of our chat requests.
    ChatResponseReceived,
    /// A chat message arrived from an established contact.
    MessageReceived,
    /// A contact's presence changed.
    UserStatusChanged,
    /// A fresh identity key pair was generated; the payload carries private
    /// key material and is wiped after delivery.
    IdentityCreated,
}

impl EventKind {
    /// Every recognized kind, in declaration order. Used to build the
    /// registration table.
    pub const ALL: [EventKind; 7] = [
        EventKind::ConnectionStateChanged,
        EventKind::LogLine,
        EventKind::ChatRequestReceived,
        EventKind::ChatResponseReceived,
        EventKind::MessageReceived,
        EventKind::UserStatusChanged,
        EventKind::IdentityCreated,
    ];
}

impl Display for EventKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::ConnectionStateChanged => "connection-state-changed",
            EventKind::LogLine => "log-line",
            EventKind::ChatRequestReceived => "chat-request-received",
            EventKind::ChatResponseReceived => "chat-response-received",
            EventKind::MessageReceived => "message-received",
            EventKind::UserStatusChanged => "user-status-changed",
            EventKind::IdentityCreated => "identity-created",
        };
        f.write_str(name)
    }
}

/// Connection state reported by the network layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Opaque identifier for a remote contact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Presence state of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Online,
    Away,
    Offline,
}

/// An incoming request from a peer to open a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub from: UserId,
    pub greeting: String,
}

/// A peer's answer to one of our outgoing chat requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResponse {
    pub from: UserId,
    pub accepted: bool,
}

/// A chat message from an established contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub from: UserId,
    pub body: String,
}

/// Private key material for a freshly created identity.
///
/// The bytes live in zeroizing storage: the identity-created cleanup routine
/// wipes them in place once the handler has returned, and dropping the key
/// wipes whatever is left. `Debug` never prints key bytes.
///
/// # Example
/// ```
/// use courier_events::SecretKey;
///
/// let key = SecretKey::new(vec![7u8; 32]);
/// assert_eq!(key.as_bytes().len(), 32);
/// assert!(!format!("{key:?}").contains('7'));
/// ```
pub struct SecretKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl SecretKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Wipes the key material in place. Idempotent; also happens on drop.
    pub(crate) fn wipe(&mut self) {
        self.bytes.zeroize();
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([redacted; {} bytes])", self.bytes.len())
    }
}

/// A notification together with its kind-specific payload.
///
/// `Event` is intentionally not `Clone`: each emitted payload is owned by
/// exactly one queued callback, which releases it after delivery.
#[derive(Debug)]
pub enum Event {
    ConnectionStateChanged(ConnectionState),
    LogLine(String),
    ChatRequestReceived(ChatRequest),
    ChatResponseReceived(ChatResponse),
    MessageReceived(ChatMessage),
    UserStatusChanged(UserId, UserStatus),
    IdentityCreated(SecretKey),
}

impl Event {
    /// The kind this payload belongs to.
    ///
    /// # Example
    /// ```
    /// use courier_events::{Event, EventKind};
    ///
    /// let event = Event::LogLine("bootstrapped".into());
    /// assert_eq!(event.kind(), EventKind::LogLine);
    /// ```
    pub fn kind(&self) -> EventKind {
        match self {
            Event::ConnectionStateChanged(_) => EventKind::ConnectionStateChanged,
            Event::LogLine(_) => EventKind::LogLine,
            Event::ChatRequestReceived(_) => EventKind::ChatRequestReceived,
            Event::ChatResponseReceived(_) => EventKind::ChatResponseReceived,
            Event::MessageReceived(_) => EventKind::MessageReceived,
            Event::UserStatusChanged(_, _) => EventKind::UserStatusChanged,
            Event::IdentityCreated(_) => EventKind::IdentityCreated,
        }
    }
}
