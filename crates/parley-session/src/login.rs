//! Login-mode selection.
//!
//! A single `connect(jid_or_host, password, nick)` entry point covers four
//! different procedures. Which one runs depends only on which arguments
//! are present, where an empty string counts as absent:
//!
//! | jid_or_host | password | nick | procedure                           |
//! |-------------|----------|------|-------------------------------------|
//! | yes         | yes      | –    | log in a registered user            |
//! | yes         | no       | yes  | anonymous login with a preset nick  |
//! | yes         | no       | no   | ask the user for a password         |
//! | no          | –        | –    | ask the user for JID and password   |

use std::fmt;

/// The login procedure a `connect` call asks for.
#[derive(Clone, PartialEq, Eq)]
pub enum Login {
    /// Registered user with credentials.
    Authenticated { jid: String, password: String },

    /// Anonymous login to `host`; the server assigns the JID.
    Anonymous { host: String, nick: String },

    /// JID known, password must be prompted for.
    PromptPassword { jid: String },

    /// Nothing known, prompt for everything.
    PromptCredentials,
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl Login {
    pub fn classify(jid_or_host: Option<&str>, password: Option<&str>, nick: Option<&str>) -> Self {
        let Some(jid) = present(jid_or_host) else {
            return Self::PromptCredentials;
        };
        match (present(password), present(nick)) {
            (Some(password), _) => Self::Authenticated {
                jid: jid.to_string(),
                password: password.to_string(),
            },
            (None, Some(nick)) => Self::Anonymous {
                host: jid.to_string(),
                nick: nick.to_string(),
            },
            (None, None) => Self::PromptPassword {
                jid: jid.to_string(),
            },
        }
    }
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Authenticated { jid, .. } => f
                .debug_struct("Authenticated")
                .field("jid", jid)
                .field("password", &"[REDACTED]")
                .finish(),
            Self::Anonymous { host, nick } => f
                .debug_struct("Anonymous")
                .field("host", host)
                .field("nick", nick)
                .finish(),
            Self::PromptPassword { jid } => {
                f.debug_struct("PromptPassword").field("jid", jid).finish()
            }
            Self::PromptCredentials => f.write_str("PromptCredentials"),
        }
    }
}

/// Updates the anonymous-connection flag for a `connect` call.
///
/// The flag is sticky: once a `connect` has been called with a bare domain,
/// the session stays anonymous even if a later call passes a full JID.
pub fn anonymous_flag(previous: bool, jid_or_host: Option<&str>) -> bool {
    previous || present(jid_or_host).is_some_and(|j| !j.contains('@'))
}
