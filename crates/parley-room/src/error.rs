//! Error types for the room layer.

use parley_protocol::BareJid;

/// Errors that can occur during room operations.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// Our own nick in the room is not known yet, so there is no occupant
    /// JID to address (e.g. the join presence never came back).
    #[error("own nick unknown in room {0}")]
    NoNick(BareJid),

    /// A roster entry needs a nick to be keyed by.
    #[error("occupant has no nick")]
    MissingNick,

    /// The room is not in the registry.
    #[error("room {0} not found")]
    NotFound(String),

    /// The room JID could not be parsed.
    #[error("invalid room JID '{jid}': {reason}")]
    InvalidJid { jid: String, reason: String },
}
