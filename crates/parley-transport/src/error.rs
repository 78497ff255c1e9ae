/// Errors reported by a connection engine.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The engine could not start a connection attempt.
    #[error("connect failed: {0}")]
    ConnectFailed(String),

    /// The engine could not attach to an existing session.
    #[error("attach failed: {0}")]
    AttachFailed(String),

    /// An operation needed a live connection.
    #[error("not connected")]
    NotConnected,

    /// Sending a stanza failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// The service endpoint was rejected by the engine.
    #[error("invalid service endpoint: {0}")]
    InvalidService(String),
}
