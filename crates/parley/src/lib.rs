//! # Parley
//!
//! Session core for browser-style XMPP group-chat clients.
//!
//! Parley wraps an external XMPP connection engine (anything implementing
//! [`Connection`]) in a [`Core`] that owns the connection, remembers who
//! the current user is, keeps the registry of joined rooms and routes
//! incoming stanzas to handlers. Everything the core learns is reported on
//! a [`CoreEvent`] channel returned by [`Core::init`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use parley::prelude::*;
//!
//! parley::logging::init(false);
//!
//! let (mut core, mut events) =
//!     Core::<MyBoshEngine>::init("https://chat.example.com/http-bind/", OptionsOverride::default())?;
//! core.connect(Some("alice@example.com"), Some("secret"), None)?;
//!
//! while let Some(event) = events.recv().await {
//!     if let CoreEvent::Status { status: ConnectionStatus::Connected, .. } = event {
//!         core.on_connected()?;
//!     }
//! }
//! ```

mod client;
mod error;
mod event;
pub mod logging;

pub use client::Core;
pub use error::CoreError;
pub use event::{CoreEvent, EventReceiver, EventSender, StanzaKind};

pub use parley_protocol::{Element, Namespaces, StanzaMatcher};
pub use parley_room::{ChatRoom, RoomRegistry, Roster};
pub use parley_session::{Affiliation, Autojoin, ChatUser, Options, OptionsOverride, Role};
pub use parley_transport::{
    Connection, ConnectionStatus, HandlerRef, HandlerTable, RawHooks, StanzaHandler,
    StatusCallback, TransportError,
};

pub mod prelude {
    pub use crate::{
        ChatRoom, ChatUser, Connection, ConnectionStatus, Core, CoreError, CoreEvent, Element,
        Options, OptionsOverride, StanzaKind, StanzaMatcher,
    };
}
