//! Joined-room bookkeeping for Parley.
//!
//! The registry tracks what the server has confirmed. Companion code
//! (presence handling, UI actions) adds and removes [`ChatRoom`]s in the
//! [`RoomRegistry`]; the core reads it and, on disconnect, sends a leave
//! presence for every entry.
//!
//! # Key types
//!
//! - [`RoomRegistry`]: room JID → joined room
//! - [`ChatRoom`]: one joined room and its roster
//! - [`Roster`]: the other occupants, keyed by nick

mod error;
mod registry;
mod room;

pub use error::RoomError;
pub use registry::RoomRegistry;
pub use room::{ChatRoom, Roster};
