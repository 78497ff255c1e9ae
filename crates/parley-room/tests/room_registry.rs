//! Integration tests for the room registry as companion code uses it:
//! register on join, update occupants, unregister on leave.

use parley_protocol::BareJid;
use parley_room::{ChatRoom, RoomError, RoomRegistry};
use parley_session::{Affiliation, ChatUser, Role};

// =========================================================================
// Helpers
// =========================================================================

fn jid(s: &str) -> BareJid {
    s.parse().expect("valid room JID")
}

fn joined(room_jid: &str, nick: &str) -> ChatRoom {
    let mut room = ChatRoom::from_jid(room_jid).expect("valid room JID");
    room.set_user(ChatUser::new(None, Some(nick)).with_muc(Affiliation::Member, Role::Participant));
    room
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn test_registry_starts_empty() {
    let registry = RoomRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.find("lobby@conference.example.com").is_none());
}

#[test]
fn test_insert_then_lookup_by_jid_and_string() {
    let mut registry = RoomRegistry::new();
    registry.insert(joined("lobby@conference.example.com", "alice"));

    let lobby = jid("lobby@conference.example.com");
    assert!(registry.contains(&lobby));
    assert_eq!(registry.get(&lobby).and_then(ChatRoom::own_nick), Some("alice"));
    assert_eq!(
        registry.find("lobby@conference.example.com").map(ChatRoom::name),
        Some("lobby")
    );
}

#[test]
fn test_insert_same_jid_replaces() {
    let mut registry = RoomRegistry::new();
    assert!(registry.insert(joined("lobby@conference.example.com", "alice")).is_none());
    let previous = registry.insert(joined("lobby@conference.example.com", "alice2"));

    assert_eq!(previous.as_ref().and_then(ChatRoom::own_nick), Some("alice"));
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_roster_updates_through_get_mut() {
    let mut registry = RoomRegistry::new();
    registry.insert(joined("lobby@conference.example.com", "alice"));

    let lobby = jid("lobby@conference.example.com");
    let room = registry.get_mut(&lobby).expect("room registered");
    room.roster_mut()
        .add(ChatUser::new(None, Some("bob")).with_muc(Affiliation::None, Role::Moderator))
        .expect("bob has a nick");

    let bob = registry
        .get(&lobby)
        .and_then(|r| r.roster().get("bob"))
        .expect("bob in roster");
    assert!(bob.is_moderator());
}

#[test]
fn test_remove_and_clear() {
    let mut registry = RoomRegistry::new();
    registry.insert(joined("a@conference.example.com", "me"));
    registry.insert(joined("b@conference.example.com", "me"));

    let mut jids: Vec<String> = registry.iter().map(|room| room.jid().to_string()).collect();
    jids.sort();
    assert_eq!(jids, vec!["a@conference.example.com", "b@conference.example.com"]);

    assert!(registry.remove(&jid("a@conference.example.com")).is_some());
    assert!(registry.remove(&jid("a@conference.example.com")).is_none());
    assert_eq!(registry.len(), 1);

    registry.clear();
    assert!(registry.is_empty());
}

#[test]
fn test_leave_presences_for_every_joined_room() {
    let mut registry = RoomRegistry::new();
    registry.insert(joined("a@conference.example.com", "me"));
    registry.insert(joined("b@conference.example.com", "me"));

    let mut targets: Vec<String> = registry
        .iter()
        .map(|room| {
            room.leave_presence(None, "leave", None)
                .expect("nick known")
                .attr("to")
                .map(str::to_string)
                .expect("to set")
        })
        .collect();
    targets.sort();
    assert_eq!(
        targets,
        vec!["a@conference.example.com/me", "b@conference.example.com/me"]
    );
}

#[test]
fn test_take_by_string_unregisters() {
    let mut registry = RoomRegistry::new();
    registry.insert(joined("lobby@conference.example.com", "alice"));

    let room = registry
        .take("lobby@conference.example.com")
        .expect("room registered");
    assert_eq!(room.own_nick(), Some("alice"));
    assert!(registry.is_empty());

    assert!(matches!(
        registry.take("lobby@conference.example.com"),
        Err(RoomError::NotFound(_))
    ));
    assert!(matches!(
        registry.take("not a jid@@"),
        Err(RoomError::InvalidJid { .. })
    ));
}
