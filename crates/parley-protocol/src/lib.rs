//! XMPP vocabulary for Parley.
//!
//! This crate holds the pieces of the protocol that the session layer
//! needs without ever touching a socket:
//!
//! - **JIDs** ([`jid`]): splitting, XEP-0106 node escaping, and building
//!   the full JID used to log in.
//! - **Namespaces** ([`ns`], [`Namespaces`]): well-known XML namespaces
//!   plus a registry that plugins can extend at runtime.
//! - **Matching** ([`StanzaMatcher`]): the criteria a stanza handler is
//!   registered with.
//! - **Builders** ([`stanza`]): the few stanzas the session layer emits
//!   on its own (room join/leave presence, bookmark retrieval).
//!
//! # Architecture
//!
//! ```text
//! Session / Room layers (above)  ← use JIDs, matchers, builders
//!     ↕
//! Protocol (this crate)          ← pure functions over strings and Elements
//!     ↕
//! Connection engine (below)      ← evaluates matchers, puts stanzas on the wire
//! ```

// ---------------------------------------------------------------------------
// Module declarations
// ---------------------------------------------------------------------------

mod error;
pub mod jid;
mod matcher;
pub mod ns;
pub mod stanza;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::ProtocolError;
pub use matcher::StanzaMatcher;
pub use ns::Namespaces;

/// Stanza tree type shared by every Parley crate.
///
/// Re-exported from tokio-xmpp so that all layers agree on one minidom
/// version.
pub use tokio_xmpp::minidom;
pub use tokio_xmpp::minidom::Element;

/// Parsed JID types from the `jid` crate.
pub use ::jid::{BareJid, FullJid, Jid};
