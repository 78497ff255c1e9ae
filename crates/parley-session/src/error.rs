//! Error types for the session layer.

/// Errors that can occur while building session state.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Caller-supplied options were not valid JSON for [`OptionsOverride`].
    ///
    /// [`OptionsOverride`]: crate::OptionsOverride
    #[error("invalid options: {0}")]
    InvalidOptions(#[from] serde_json::Error),

    /// A MUC affiliation string was not recognised.
    #[error("unknown affiliation '{0}'")]
    UnknownAffiliation(String),

    /// A MUC role string was not recognised.
    #[error("unknown role '{0}'")]
    UnknownRole(String),
}
