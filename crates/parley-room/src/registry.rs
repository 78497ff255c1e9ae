//! The joined-room registry.

use std::collections::HashMap;

use parley_protocol::BareJid;

use crate::{ChatRoom, RoomError};
use crate::room::parse_room_jid;

/// All rooms the current session has joined, keyed by room JID.
///
/// A room is inserted when the server confirms the join and removed when
/// the leave is confirmed; the registry itself performs no I/O.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: HashMap<BareJid, ChatRoom>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a room, replacing any previous entry with the same JID.
    pub fn insert(&mut self, room: ChatRoom) -> Option<ChatRoom> {
        let jid = room.jid().clone();
        tracing::debug!(room = %jid, "room registered");
        self.rooms.insert(jid, room)
    }

    pub fn remove(&mut self, jid: &BareJid) -> Option<ChatRoom> {
        let removed = self.rooms.remove(jid);
        if removed.is_some() {
            tracing::debug!(room = %jid, "room unregistered");
        }
        removed
    }

    /// Removes a room given the JID string from a stanza.
    ///
    /// # Errors
    /// - [`RoomError::InvalidJid`] if `jid` is not a room JID
    /// - [`RoomError::NotFound`] if the room is not registered
    pub fn take(&mut self, jid: &str) -> Result<ChatRoom, RoomError> {
        let parsed = parse_room_jid(jid)?;
        self.remove(&parsed)
            .ok_or_else(|| RoomError::NotFound(jid.to_string()))
    }

    pub fn get(&self, jid: &BareJid) -> Option<&ChatRoom> {
        self.rooms.get(jid)
    }

    pub fn get_mut(&mut self, jid: &BareJid) -> Option<&mut ChatRoom> {
        self.rooms.get_mut(jid)
    }

    /// Looks a room up by its JID string. Unparseable input finds nothing.
    pub fn find(&self, jid: &str) -> Option<&ChatRoom> {
        let jid = parse_room_jid(jid).ok()?;
        self.rooms.get(&jid)
    }

    pub fn contains(&self, jid: &BareJid) -> bool {
        self.rooms.contains_key(jid)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatRoom> {
        self.rooms.values()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn clear(&mut self) {
        self.rooms.clear();
    }
}
