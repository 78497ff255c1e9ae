//! Client options and caller overrides.

use serde::{Deserialize, Serialize};

use crate::SessionError;

/// Resource appended to the login JID unless overridden.
pub const DEFAULT_RESOURCE: &str = "Parley";

// ---------------------------------------------------------------------------
// Autojoin
// ---------------------------------------------------------------------------

/// What to join once the session is online.
///
/// On the JSON side this keeps the loose shape callers already use:
/// `true` means "ask the server for bookmarks", `false` means "join
/// nothing", and an array lists room JIDs explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "AutojoinRepr", into = "AutojoinRepr")]
pub enum Autojoin {
    /// Fetch bookmarks from private storage and join what the server
    /// marks as autojoin.
    #[default]
    Bookmarks,

    /// Join exactly these rooms.
    Rooms(Vec<String>),

    /// Join nothing automatically.
    Disabled,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AutojoinRepr {
    Flag(bool),
    Rooms(Vec<String>),
}

impl From<AutojoinRepr> for Autojoin {
    fn from(repr: AutojoinRepr) -> Self {
        match repr {
            AutojoinRepr::Flag(true) => Self::Bookmarks,
            AutojoinRepr::Flag(false) => Self::Disabled,
            AutojoinRepr::Rooms(rooms) => Self::Rooms(rooms),
        }
    }
}

impl From<Autojoin> for AutojoinRepr {
    fn from(autojoin: Autojoin) -> Self {
        match autojoin {
            Autojoin::Bookmarks => Self::Flag(true),
            Autojoin::Disabled => Self::Flag(false),
            Autojoin::Rooms(rooms) => Self::Rooms(rooms),
        }
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Effective client options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Rooms to join once online.
    pub autojoin: Autojoin,

    /// Log raw protocol traffic and other diagnostics.
    pub debug: bool,

    /// Resource appended to the login JID.
    pub resource: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            autojoin: Autojoin::Bookmarks,
            debug: false,
            resource: DEFAULT_RESOURCE.to_string(),
        }
    }
}

impl Options {
    /// Applies caller overrides on top of the current values.
    ///
    /// Fields left unset in the override keep their current value.
    pub fn merge(&mut self, overrides: OptionsOverride) {
        if let Some(autojoin) = overrides.autojoin {
            self.autojoin = autojoin;
        }
        if let Some(debug) = overrides.debug {
            self.debug = debug;
        }
        if let Some(resource) = overrides.resource {
            self.resource = resource;
        }
    }

    /// Default options with `overrides` applied.
    pub fn with_overrides(overrides: OptionsOverride) -> Self {
        let mut options = Self::default();
        options.merge(overrides);
        options
    }
}

/// Caller-supplied options; every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsOverride {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autojoin: Option<Autojoin>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

impl OptionsOverride {
    /// Parses overrides from a JSON object such as
    /// `{"debug": true, "autojoin": ["room@conference.example.com"]}`.
    ///
    /// Unknown keys are ignored.
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let overrides = serde_json::from_str(json)?;
        tracing::debug!(?overrides, "parsed option overrides");
        Ok(overrides)
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    pub fn autojoin(mut self, autojoin: Autojoin) -> Self {
        self.autojoin = Some(autojoin);
        self
    }

    pub fn resource(mut self, resource: &str) -> Self {
        self.resource = Some(resource.to_string());
        self
    }
}
