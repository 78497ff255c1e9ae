//! Unified error type for the session core.

use parley_protocol::ProtocolError;
use parley_room::RoomError;
use parley_session::SessionError;
use parley_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// `init` was called without a service endpoint.
    #[error("service endpoint must not be empty")]
    InvalidService,

    /// The connection engine rejected a call.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A JID could not be built or parsed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Session state could not be built (e.g. bad option JSON).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A room operation failed.
    #[error(transparent)]
    Room(#[from] RoomError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err: CoreError = TransportError::ConnectFailed("refused".into()).into();
        assert!(matches!(err, CoreError::Transport(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err: CoreError = ProtocolError::EmptyJid.into();
        assert!(matches!(err, CoreError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err: CoreError = SessionError::UnknownRole("jester".into()).into();
        assert!(matches!(err, CoreError::Session(_)));
    }

    #[test]
    fn test_from_room_error() {
        let err: CoreError = RoomError::MissingNick.into();
        assert!(matches!(err, CoreError::Room(_)));
    }

    #[test]
    fn test_invalid_service_message() {
        assert_eq!(
            CoreError::InvalidService.to_string(),
            "service endpoint must not be empty"
        );
    }
}
