//! Error types for the protocol layer.

/// Errors that can occur while turning user input into protocol values.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// The string could not be parsed as a JID, even after escaping
    /// the node part.
    #[error("invalid JID '{jid}': {source}")]
    InvalidJid {
        jid: String,
        #[source]
        source: ::jid::Error,
    },

    /// A JID or host was required but the input was empty.
    #[error("JID must not be empty")]
    EmptyJid,
}
