//! Connection engine boundary for Parley.
//!
//! Parley does not speak XMPP on the wire itself. The embedding
//! application supplies an engine (BOSH, WebSocket, a test double) that
//! implements the [`Connection`] trait; the session core only drives it.
//!
//! The boundary is callback driven, like the engines it wraps:
//!
//! - connection progress arrives through a [`StatusCallback`]
//! - matched stanzas arrive through [`StanzaHandler`]s registered with a
//!   [`StanzaMatcher`]
//! - raw traffic is mirrored to [`RawHooks`] for debug logging
//!
//! [`HandlerTable`] is the bookkeeping every engine needs for the second
//! point, so engines don't each reimplement it.

mod error;
mod handlers;

pub use error::TransportError;
pub use handlers::HandlerTable;

use std::fmt;

use parley_protocol::{Element, FullJid, Jid, StanzaMatcher};

/// Opaque reference to a registered stanza handler.
///
/// Returned by [`Connection::add_handler`]; pass it back to
/// [`Connection::delete_handler`] to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerRef(u64);

impl HandlerRef {
    /// Creates a `HandlerRef` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler-{}", self.0)
    }
}

/// Connection progress reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionStatus {
    Error,
    Connecting,
    ConnFail,
    Authenticating,
    AuthFail,
    Connected,
    Disconnected,
    Disconnecting,
    Attached,
}

impl ConnectionStatus {
    /// `true` once the session is usable (fresh login or attached).
    pub fn is_online(self) -> bool {
        matches!(self, Self::Connected | Self::Attached)
    }

    /// `true` for states after which the engine stops on its own.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Error | Self::ConnFail | Self::AuthFail | Self::Disconnected
        )
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Error => "error",
            Self::Connecting => "connecting",
            Self::ConnFail => "connfail",
            Self::Authenticating => "authenticating",
            Self::AuthFail => "authfail",
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Disconnecting => "disconnecting",
            Self::Attached => "attached",
        };
        f.write_str(s)
    }
}

/// Callback for matched stanzas. Return `false` to be unregistered.
pub type StanzaHandler = Box<dyn FnMut(&Element) -> bool + Send>;

/// Callback for connection progress, with an optional condition string
/// (e.g. the reason for `ConnFail`).
pub type StatusCallback = Box<dyn FnMut(ConnectionStatus, Option<&str>) + Send>;

type RawFn = Box<dyn Fn(&str) + Send + Sync>;

/// Receivers for raw inbound and outbound traffic.
pub struct RawHooks {
    input: RawFn,
    output: RawFn,
}

impl RawHooks {
    pub fn new(
        input: impl Fn(&str) + Send + Sync + 'static,
        output: impl Fn(&str) + Send + Sync + 'static,
    ) -> Self {
        Self {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    /// Hooks that drop everything.
    pub fn silent() -> Self {
        Self::new(|_| {}, |_| {})
    }

    /// Feeds received data to the input hook.
    pub fn input(&self, data: &str) {
        (self.input)(data)
    }

    /// Feeds sent data to the output hook.
    pub fn output(&self, data: &str) {
        (self.output)(data)
    }
}

impl fmt::Debug for RawHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawHooks").finish_non_exhaustive()
    }
}

/// An XMPP connection engine.
///
/// Calls are synchronous: they start work and return. Results arrive
/// later through the status callback and stanza handlers.
pub trait Connection: Send + 'static {
    /// Creates an engine bound to a service endpoint (e.g. a BOSH URL).
    fn open(service: &str) -> Result<Self, TransportError>
    where
        Self: Sized;

    /// Starts a login. `password` is `None` for anonymous logins.
    fn connect(
        &mut self,
        jid: &FullJid,
        password: Option<&str>,
        on_status: StatusCallback,
    ) -> Result<(), TransportError>;

    /// Resumes an already bound session.
    fn attach(
        &mut self,
        jid: &Jid,
        sid: &str,
        rid: u64,
        on_status: StatusCallback,
    ) -> Result<(), TransportError>;

    /// Ends the session.
    fn disconnect(&mut self);

    /// Clears session state and every registered handler so the engine
    /// can be reused for a new attempt.
    fn reset(&mut self);

    /// Pushes any queued stanzas out immediately.
    fn flush(&mut self);

    /// Switches the engine to synchronous requests (needed while the host
    /// is shutting down).
    fn set_sync(&mut self, sync: bool);

    fn is_connected(&self) -> bool;

    /// The JID bound by the server, once known.
    fn jid(&self) -> Option<&str>;

    /// Generates a stanza id unique to this connection.
    fn unique_id(&mut self, suffix: &str) -> String;

    fn add_handler(&mut self, matcher: StanzaMatcher, handler: StanzaHandler) -> HandlerRef;

    fn delete_handler(&mut self, handler: HandlerRef);

    fn send(&mut self, stanza: Element) -> Result<(), TransportError>;

    fn set_raw_hooks(&mut self, hooks: RawHooks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_handler_ref_new_and_into_inner() {
        assert_eq!(HandlerRef::new(42).into_inner(), 42);
    }

    #[test]
    fn test_handler_ref_display() {
        assert_eq!(HandlerRef::new(7).to_string(), "handler-7");
    }

    #[test]
    fn test_status_is_online() {
        assert!(ConnectionStatus::Connected.is_online());
        assert!(ConnectionStatus::Attached.is_online());
        assert!(!ConnectionStatus::Authenticating.is_online());
        assert!(!ConnectionStatus::AuthFail.is_online());
    }

    #[test]
    fn test_status_is_terminal() {
        assert!(ConnectionStatus::AuthFail.is_terminal());
        assert!(ConnectionStatus::Disconnected.is_terminal());
        assert!(!ConnectionStatus::Disconnecting.is_terminal());
        assert!(!ConnectionStatus::Connected.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ConnectionStatus::ConnFail.to_string(), "connfail");
        assert_eq!(ConnectionStatus::Attached.to_string(), "attached");
    }

    #[test]
    fn test_raw_hooks_route_by_direction() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let (inp, out) = (Arc::clone(&seen), Arc::clone(&seen));
        let hooks = RawHooks::new(
            move |d| inp.lock().unwrap().push(format!("in:{d}")),
            move |d| out.lock().unwrap().push(format!("out:{d}")),
        );
        hooks.input("<a/>");
        hooks.output("<b/>");
        assert_eq!(*seen.lock().unwrap(), vec!["in:<a/>", "out:<b/>"]);
    }
}
