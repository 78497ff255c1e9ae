//! A joined room and its occupants.

use std::collections::HashMap;

use parley_protocol::jid::node_from_jid;
use parley_protocol::{BareJid, Element, stanza};
use parley_session::ChatUser;

use crate::RoomError;

/// Parses a room JID, rejecting anything with a resource.
pub(crate) fn parse_room_jid(jid: &str) -> Result<BareJid, RoomError> {
    jid.parse::<BareJid>().map_err(|e| RoomError::InvalidJid {
        jid: jid.to_string(),
        reason: e.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// Occupants of a room, keyed by nick.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    occupants: HashMap<String, ChatUser>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an occupant. Returns the previous entry for the
    /// same nick, if any.
    pub fn add(&mut self, user: ChatUser) -> Result<Option<ChatUser>, RoomError> {
        let nick = user.nick().ok_or(RoomError::MissingNick)?.to_string();
        Ok(self.occupants.insert(nick, user))
    }

    pub fn remove(&mut self, nick: &str) -> Option<ChatUser> {
        self.occupants.remove(nick)
    }

    pub fn get(&self, nick: &str) -> Option<&ChatUser> {
        self.occupants.get(nick)
    }

    pub fn len(&self) -> usize {
        self.occupants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatUser> {
        self.occupants.values()
    }
}

// ---------------------------------------------------------------------------
// ChatRoom
// ---------------------------------------------------------------------------

/// One joined MUC room.
#[derive(Debug, Clone)]
pub struct ChatRoom {
    jid: BareJid,
    name: String,
    /// Ourselves, as an occupant of this room.
    user: Option<ChatUser>,
    roster: Roster,
}

impl ChatRoom {
    /// Creates a room named after the node of its JID.
    pub fn new(jid: BareJid) -> Self {
        let raw = jid.to_string();
        let name = node_from_jid(&raw).unwrap_or(&raw).to_string();
        Self {
            jid,
            name,
            user: None,
            roster: Roster::new(),
        }
    }

    /// Parses `jid` and creates the room.
    pub fn from_jid(jid: &str) -> Result<Self, RoomError> {
        parse_room_jid(jid).map(Self::new)
    }

    pub fn jid(&self) -> &BareJid {
        &self.jid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn user(&self) -> Option<&ChatUser> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: ChatUser) {
        self.user = Some(user);
    }

    /// Our own nick in this room, once known.
    pub fn own_nick(&self) -> Option<&str> {
        self.user.as_ref().and_then(ChatUser::nick)
    }

    /// `room@service/nick` for our own occupant.
    pub fn occupant_jid(&self) -> Option<String> {
        self.own_nick().map(|nick| format!("{}/{nick}", self.jid))
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }

    /// Builds the presence that leaves this room.
    ///
    /// # Errors
    /// [`RoomError::NoNick`] if our own nick in the room is unknown.
    pub fn leave_presence(
        &self,
        from: Option<&str>,
        id: &str,
        status: Option<&str>,
    ) -> Result<Element, RoomError> {
        let to = self
            .occupant_jid()
            .ok_or_else(|| RoomError::NoNick(self.jid.clone()))?;
        Ok(stanza::unavailable_presence(from, &to, id, status))
    }
}
