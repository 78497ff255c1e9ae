//! Events reported by the session core.
//!
//! The engine calls back into Parley from wherever it runs; those callbacks
//! only hold a clone of the [`EventSender`] and turn what they see into
//! [`CoreEvent`]s for the application to consume.

use std::fmt;

use parley_protocol::{Element, StanzaMatcher, ns};
use parley_transport::{ConnectionStatus, StanzaHandler, StatusCallback};
use tokio::sync::mpsc;

pub type EventSender = mpsc::UnboundedSender<CoreEvent>;
pub type EventReceiver = mpsc::UnboundedReceiver<CoreEvent>;

/// The stanza families the core routes by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StanzaKind {
    /// Software version queries (XEP-0092).
    Version,
    Presence,
    Message,
    /// Private XML storage results, which carry bookmarks.
    Bookmarks,
    /// Service discovery info, used to learn room features.
    RoomDisco,
    PrivacyList,
    PrivacyListError,
}

impl StanzaKind {
    /// Every kind, in registration order.
    pub const ALL: [Self; 7] = [
        Self::Version,
        Self::Presence,
        Self::Message,
        Self::Bookmarks,
        Self::RoomDisco,
        Self::PrivacyList,
        Self::PrivacyListError,
    ];

    /// The matcher the default handler for this kind is registered with.
    pub fn matcher(self) -> StanzaMatcher {
        match self {
            Self::Version => StanzaMatcher::new().ns(ns::VERSION).name("iq"),
            Self::Presence => StanzaMatcher::new().name("presence"),
            Self::Message => StanzaMatcher::new().name("message"),
            Self::Bookmarks => StanzaMatcher::new().ns(ns::PRIVATE).name("iq"),
            Self::RoomDisco => StanzaMatcher::new().ns(ns::DISCO_INFO).name("iq"),
            Self::PrivacyList => StanzaMatcher::new()
                .ns(ns::PRIVACY)
                .name("iq")
                .stanza_type("result"),
            Self::PrivacyListError => StanzaMatcher::new()
                .ns(ns::PRIVACY)
                .name("iq")
                .stanza_type("error"),
        }
    }
}

impl fmt::Display for StanzaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Version => "version",
            Self::Presence => "presence",
            Self::Message => "message",
            Self::Bookmarks => "bookmarks",
            Self::RoomDisco => "room-disco",
            Self::PrivacyList => "privacy-list",
            Self::PrivacyListError => "privacy-list-error",
        })
    }
}

/// Something the application should react to.
#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// `connect` did not have enough to log in; show a login form.
    /// `preset_jid` is the JID to pre-fill (and hide), if one was given.
    Login { preset_jid: Option<String> },

    /// The engine reported connection progress.
    Status {
        status: ConnectionStatus,
        condition: Option<String>,
    },

    /// A stanza matched one of the default handlers.
    Stanza { kind: StanzaKind, stanza: Element },
}

/// Status callback that forwards every update as [`CoreEvent::Status`].
pub(crate) fn status_forwarder(events: EventSender) -> StatusCallback {
    Box::new(move |status, condition| {
        if status.is_terminal() {
            tracing::info!(%status, ?condition, "connection ended");
        } else {
            tracing::debug!(%status, ?condition, "connection status");
        }
        let event = CoreEvent::Status {
            status,
            condition: condition.map(str::to_string),
        };
        if events.send(event).is_err() {
            tracing::debug!(%status, "status dropped, no event receiver");
        }
    })
}

/// Stanza handler that forwards matches as [`CoreEvent::Stanza`].
///
/// Unregisters itself once nobody is listening.
pub(crate) fn stanza_forwarder(kind: StanzaKind, events: EventSender) -> StanzaHandler {
    Box::new(move |stanza| {
        events
            .send(CoreEvent::Stanza {
                kind,
                stanza: stanza.clone(),
            })
            .is_ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(xml: &str) -> Element {
        xml.parse().unwrap()
    }

    #[test]
    fn test_matcher_privacy_kinds_split_on_type() {
        let result = parse(
            "<iq xmlns='jabber:client' type='result'><query xmlns='jabber:iq:privacy'/></iq>",
        );
        let error = parse(
            "<iq xmlns='jabber:client' type='error'><query xmlns='jabber:iq:privacy'/></iq>",
        );
        assert!(StanzaKind::PrivacyList.matcher().matches(&result));
        assert!(!StanzaKind::PrivacyList.matcher().matches(&error));
        assert!(StanzaKind::PrivacyListError.matcher().matches(&error));
        assert!(!StanzaKind::PrivacyListError.matcher().matches(&result));
    }

    #[test]
    fn test_matcher_presence_and_message_by_name() {
        let presence = parse("<presence xmlns='jabber:client' from='a@b/c'/>");
        assert!(StanzaKind::Presence.matcher().matches(&presence));
        assert!(!StanzaKind::Message.matcher().matches(&presence));
    }

    #[test]
    fn test_stanza_forwarder_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut handler = stanza_forwarder(StanzaKind::Message, tx);
        let msg = parse("<message xmlns='jabber:client'/>");

        assert!(handler(&msg));
        drop(rx);
        assert!(!handler(&msg));
    }

    #[test]
    fn test_status_forwarder_copies_condition() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut callback = status_forwarder(tx);
        callback(ConnectionStatus::ConnFail, Some("host-unknown"));

        match rx.try_recv() {
            Ok(CoreEvent::Status { status, condition }) => {
                assert_eq!(status, ConnectionStatus::ConnFail);
                assert_eq!(condition.as_deref(), Some("host-unknown"));
            }
            other => panic!("expected status event, got {other:?}"),
        }
    }

    #[test]
    fn test_stanza_kind_display() {
        assert_eq!(StanzaKind::RoomDisco.to_string(), "room-disco");
    }
}
