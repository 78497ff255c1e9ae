//! XML namespaces used by the session layer.
//!
//! The constants cover everything Parley itself matches on. The
//! [`Namespaces`] registry mirrors the engine-side table that plugins
//! extend with their own short names.

use std::collections::HashMap;

pub const CLIENT: &str = "jabber:client";
pub const VERSION: &str = "jabber:iq:version";
pub const DISCO_INFO: &str = "http://jabber.org/protocol/disco#info";
pub const MUC: &str = "http://jabber.org/protocol/muc";
pub const MUC_USER: &str = "http://jabber.org/protocol/muc#user";
pub const PRIVATE: &str = "jabber:iq:private";
pub const BOOKMARKS: &str = "storage:bookmarks";
pub const PRIVACY: &str = "jabber:iq:privacy";
pub const DELAY: &str = "jabber:x:delay";

/// Name → namespace URI table.
///
/// Starts with the namespaces every connection engine knows about;
/// the session core adds its own on init.
#[derive(Debug, Clone)]
pub struct Namespaces {
    entries: HashMap<String, String>,
}

impl Namespaces {
    /// Creates a registry seeded with the built-in namespaces.
    pub fn new() -> Self {
        let entries = [
            ("CLIENT", CLIENT),
            ("VERSION", VERSION),
            ("DISCO_INFO", DISCO_INFO),
            ("MUC", MUC),
            ("MUC_USER", MUC_USER),
        ]
        .into_iter()
        .map(|(name, uri)| (name.to_string(), uri.to_string()))
        .collect();
        Self { entries }
    }

    /// Registers (or replaces) a namespace under a short name.
    pub fn add(&mut self, name: &str, value: &str) {
        self.entries.insert(name.to_string(), value.to_string());
    }

    /// Looks up a namespace URI by short name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Returns the number of registered namespaces.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Namespaces {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_seeds_builtins() {
        let ns = Namespaces::new();
        assert_eq!(ns.get("VERSION"), Some(VERSION));
        assert_eq!(ns.get("DISCO_INFO"), Some(DISCO_INFO));
        assert_eq!(ns.get("PRIVATE"), None);
    }

    #[test]
    fn test_add_registers_and_replaces() {
        let mut ns = Namespaces::new();
        let before = ns.len();
        ns.add("PRIVATE", PRIVATE);
        assert_eq!(ns.get("PRIVATE"), Some(PRIVATE));
        assert_eq!(ns.len(), before + 1);

        ns.add("PRIVATE", "urn:other");
        assert_eq!(ns.get("PRIVATE"), Some("urn:other"));
        assert_eq!(ns.len(), before + 1);
    }
}
