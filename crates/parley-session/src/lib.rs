//! Session state for Parley.
//!
//! This crate owns the small records the session core keeps about the
//! person at the keyboard:
//!
//! 1. **Identity**: [`ChatUser`], created at connect/attach time and
//!    updated once the server tells us who we are
//! 2. **Options**: [`Options`], merged from caller overrides at init
//! 3. **Login mode**: [`Login`], which of the four login procedures a
//!    `connect` call asks for
//!
//! # How it fits in the stack
//!
//! ```text
//! Core façade (above)   ← holds one ChatUser and one Options value
//!     ↕
//! Session (this crate)  ← decides login mode, tracks identity
//!     ↕
//! Protocol (below)      ← JID splitting and escaping
//! ```

mod error;
mod login;
mod options;
mod user;

pub use error::SessionError;
pub use login::{Login, anonymous_flag};
pub use options::{Autojoin, DEFAULT_RESOURCE, Options, OptionsOverride};
pub use user::{Affiliation, ChatUser, Role};
