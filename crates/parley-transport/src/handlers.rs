//! Handler bookkeeping shared by connection engines.

use std::fmt;

use parley_protocol::{Element, StanzaMatcher};

use crate::{HandlerRef, StanzaHandler};

struct Entry {
    id: HandlerRef,
    matcher: StanzaMatcher,
    handler: StanzaHandler,
}

/// Registered stanza handlers, in registration order.
///
/// An engine owns one table, adds to it from
/// [`Connection::add_handler`](crate::Connection::add_handler), clears it
/// on reset and calls [`dispatch`](Self::dispatch) for every inbound stanza.
pub struct HandlerTable {
    next_id: u64,
    entries: Vec<Entry>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Registers a handler and returns its reference.
    pub fn add(&mut self, matcher: StanzaMatcher, handler: StanzaHandler) -> HandlerRef {
        let id = HandlerRef::new(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            matcher,
            handler,
        });
        id
    }

    /// Unregisters a handler. Returns `false` if it was not registered.
    pub fn remove(&mut self, id: HandlerRef) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Drops every handler. References keep counting up afterwards, so a
    /// stale `HandlerRef` never aliases a new registration.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn contains(&self, id: HandlerRef) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every handler whose matcher accepts the stanza.
    ///
    /// Handlers returning `false` are removed. Returns how many handlers
    /// were invoked.
    pub fn dispatch(&mut self, stanza: &Element) -> usize {
        let mut invoked = 0;
        self.entries.retain_mut(|entry| {
            if !entry.matcher.matches(stanza) {
                return true;
            }
            invoked += 1;
            (entry.handler)(stanza)
        });
        invoked
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("next_id", &self.next_id)
            .field(
                "matchers",
                &self.entries.iter().map(|e| &e.matcher).collect::<Vec<_>>(),
            )
            .finish()
    }
}
