//! The chat user record.

use std::fmt;
use std::str::FromStr;

use parley_protocol::jid::{escaped_jid, resource_from_jid};

use crate::SessionError;

// ---------------------------------------------------------------------------
// Affiliation / Role
// ---------------------------------------------------------------------------

/// Long-lived MUC standing of a user in a room (XEP-0045 §5.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Affiliation {
    Owner,
    Admin,
    Member,
    Outcast,
    #[default]
    None,
}

impl FromStr for Affiliation {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Self::Owner),
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            "outcast" => Ok(Self::Outcast),
            "none" => Ok(Self::None),
            other => Err(SessionError::UnknownAffiliation(other.to_string())),
        }
    }
}

impl fmt::Display for Affiliation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Owner => "owner",
            Self::Admin => "admin",
            Self::Member => "member",
            Self::Outcast => "outcast",
            Self::None => "none",
        })
    }
}

/// Per-visit MUC role of a user in a room (XEP-0045 §5.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Moderator,
    Participant,
    Visitor,
    #[default]
    None,
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "moderator" => Ok(Self::Moderator),
            "participant" => Ok(Self::Participant),
            "visitor" => Ok(Self::Visitor),
            "none" => Ok(Self::None),
            other => Err(SessionError::UnknownRole(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Moderator => "moderator",
            Self::Participant => "participant",
            Self::Visitor => "visitor",
            Self::None => "none",
        })
    }
}

// ---------------------------------------------------------------------------
// ChatUser
// ---------------------------------------------------------------------------

/// A user as seen by the client: ourselves, or an occupant of a room.
///
/// Both parts of the identity are optional. An anonymous login knows its
/// nick up front but only learns its JID once the server assigns one; a
/// login with a bare domain and password has a JID but no node to use as
/// a nick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChatUser {
    jid: Option<String>,
    nick: Option<String>,
    affiliation: Affiliation,
    role: Role,
}

impl ChatUser {
    pub fn new(jid: Option<&str>, nick: Option<&str>) -> Self {
        Self {
            jid: jid.map(str::to_string),
            nick: nick.map(str::to_string),
            affiliation: Affiliation::None,
            role: Role::None,
        }
    }

    /// Sets the MUC standing, for room occupants.
    pub fn with_muc(mut self, affiliation: Affiliation, role: Role) -> Self {
        self.affiliation = affiliation;
        self.role = role;
        self
    }

    pub fn jid(&self) -> Option<&str> {
        self.jid.as_deref()
    }

    /// JID with its node escaped (XEP-0106), resource kept as-is.
    pub fn escaped_jid(&self) -> Option<String> {
        let jid = self.jid.as_deref()?;
        let escaped = escaped_jid(jid);
        Some(match resource_from_jid(jid) {
            Some(resource) => format!("{escaped}/{resource}"),
            None => escaped,
        })
    }

    pub fn set_jid(&mut self, jid: &str) {
        self.jid = Some(jid.to_string());
    }

    pub fn nick(&self) -> Option<&str> {
        self.nick.as_deref()
    }

    pub fn set_nick(&mut self, nick: &str) {
        self.nick = Some(nick.to_string());
    }

    pub fn affiliation(&self) -> Affiliation {
        self.affiliation
    }

    pub fn set_affiliation(&mut self, affiliation: Affiliation) {
        self.affiliation = affiliation;
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn is_moderator(&self) -> bool {
        self.role == Role::Moderator
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_muc_standing() {
        let user = ChatUser::new(Some("alice@example.com"), Some("alice"));
        assert_eq!(user.jid(), Some("alice@example.com"));
        assert_eq!(user.nick(), Some("alice"));
        assert_eq!(user.affiliation(), Affiliation::None);
        assert_eq!(user.role(), Role::None);
        assert!(!user.is_moderator());
    }

    #[test]
    fn test_anonymous_user_learns_jid_later() {
        let mut user = ChatUser::new(None, Some("guest"));
        assert_eq!(user.jid(), None);
        user.set_jid("abc123@example.com/Parley");
        assert_eq!(user.jid(), Some("abc123@example.com/Parley"));
        assert_eq!(user.nick(), Some("guest"));
    }

    #[test]
    fn test_escaped_jid_keeps_resource() {
        let user = ChatUser::new(Some("john doe@example.com/home"), None);
        assert_eq!(
            user.escaped_jid().as_deref(),
            Some("john\\20doe@example.com/home")
        );
        assert_eq!(ChatUser::new(None, Some("x")).escaped_jid(), None);
    }

    #[test]
    fn test_with_muc_moderator() {
        let user = ChatUser::new(None, Some("mod")).with_muc(Affiliation::Owner, Role::Moderator);
        assert!(user.is_moderator());
        assert_eq!(user.affiliation(), Affiliation::Owner);
    }

    #[test]
    fn test_affiliation_and_role_parse() {
        assert_eq!("admin".parse::<Affiliation>().unwrap(), Affiliation::Admin);
        assert_eq!("visitor".parse::<Role>().unwrap(), Role::Visitor);
        assert!(matches!(
            "king".parse::<Affiliation>(),
            Err(SessionError::UnknownAffiliation(s)) if s == "king"
        ));
        assert!("jester".parse::<Role>().is_err());
    }

    #[test]
    fn test_affiliation_display_round_trips() {
        for a in [Affiliation::Owner, Affiliation::Outcast, Affiliation::None] {
            assert_eq!(a.to_string().parse::<Affiliation>().unwrap(), a);
        }
    }
}
