//! JID string helpers.
//!
//! A JID looks like `node@domain/resource`. Users type all sorts of things
//! into a login form ("john doe@example.com", "example.com"), so these
//! helpers work on raw strings first and only hand the result to the `jid`
//! crate for validation once the node has been escaped.
//!
//! The splitting rules are deliberately simple:
//! - the node is everything before the first `@` (if there is one)
//! - the bare JID is everything before the first `/`
//! - the domain is the bare JID with the node removed
//! - the resource is everything after the first `/`

use ::jid::{FullJid, Jid};

use crate::ProtocolError;

/// XEP-0106 escape table, in the order the replacements are applied.
///
/// `\` must come first, otherwise the backslashes introduced by the other
/// replacements would be escaped again.
const ESCAPES: [(char, &str); 10] = [
    ('\\', "\\5c"),
    (' ', "\\20"),
    ('"', "\\22"),
    ('&', "\\26"),
    ('\'', "\\27"),
    ('/', "\\2f"),
    (':', "\\3a"),
    ('<', "\\3c"),
    ('>', "\\3e"),
    ('@', "\\40"),
];

/// Returns the node (local part) of a JID, or `None` for a bare domain.
pub fn node_from_jid(jid: &str) -> Option<&str> {
    if !jid.contains('@') {
        return None;
    }
    jid.split('@').next()
}

/// Returns the JID without its resource.
pub fn bare_jid(jid: &str) -> &str {
    jid.split('/').next().unwrap_or(jid)
}

/// Returns the domain part of a JID.
pub fn domain_from_jid(jid: &str) -> &str {
    let bare = bare_jid(jid);
    match bare.split_once('@') {
        Some((_, domain)) => domain,
        None => bare,
    }
}

/// Returns the resource part of a JID, if any.
pub fn resource_from_jid(jid: &str) -> Option<&str> {
    jid.split_once('/').map(|(_, resource)| resource)
}

/// Escapes a node according to XEP-0106.
///
/// Leading and trailing whitespace is dropped before escaping.
pub fn escape_node(node: &str) -> String {
    let mut out = String::with_capacity(node.len());
    for c in node.trim().chars() {
        match ESCAPES.iter().find(|(raw, _)| *raw == c) {
            Some((_, escaped)) => out.push_str(escaped),
            None => out.push(c),
        }
    }
    out
}

/// Reverses [`escape_node`].
pub fn unescape_node(node: &str) -> String {
    let mut out = node.to_string();
    // Backslash last, mirroring the escape order.
    for (raw, escaped) in ESCAPES.iter().rev() {
        out = out.replace(escaped, &raw.to_string());
    }
    out
}

/// Returns `escape(node)@domain`, or just the domain when there is no node.
pub fn escaped_jid(jid: &str) -> String {
    let domain = domain_from_jid(jid);
    match node_from_jid(jid) {
        Some(node) if !node.is_empty() => format!("{}@{domain}", escape_node(node)),
        _ => domain.to_string(),
    }
}

/// Builds the full JID used for logging in: `escaped_jid(jid)/resource`.
///
/// # Errors
/// - [`ProtocolError::EmptyJid`] if `jid_or_host` is empty
/// - [`ProtocolError::InvalidJid`] if the escaped result is still not a
///   valid JID (bad domain, empty resource, ...)
pub fn login_jid(jid_or_host: &str, resource: &str) -> Result<FullJid, ProtocolError> {
    if jid_or_host.trim().is_empty() {
        return Err(ProtocolError::EmptyJid);
    }
    let raw = format!("{}/{resource}", escaped_jid(jid_or_host));
    raw.parse::<FullJid>()
        .map_err(|source| ProtocolError::InvalidJid { jid: raw, source })
}

/// Parses a bare or full JID as-is (no escaping).
pub fn parse_jid(jid: &str) -> Result<Jid, ProtocolError> {
    if jid.trim().is_empty() {
        return Err(ProtocolError::EmptyJid);
    }
    jid.parse::<Jid>().map_err(|source| ProtocolError::InvalidJid {
        jid: jid.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_from_jid_with_node_returns_node() {
        assert_eq!(node_from_jid("alice@example.com/home"), Some("alice"));
    }

    #[test]
    fn test_node_from_jid_domain_only_returns_none() {
        assert_eq!(node_from_jid("example.com"), None);
    }

    #[test]
    fn test_domain_from_jid_strips_node_and_resource() {
        assert_eq!(domain_from_jid("alice@example.com/home"), "example.com");
        assert_eq!(domain_from_jid("example.com/res"), "example.com");
        assert_eq!(domain_from_jid("example.com"), "example.com");
    }

    #[test]
    fn test_resource_from_jid_keeps_slashes_after_first() {
        assert_eq!(resource_from_jid("a@b/c/d"), Some("c/d"));
        assert_eq!(resource_from_jid("a@b"), None);
    }

    #[test]
    fn test_bare_jid_drops_resource() {
        assert_eq!(bare_jid("room@conference.example.com/nick"), "room@conference.example.com");
    }

    #[test]
    fn test_escape_node_replaces_reserved_characters() {
        assert_eq!(escape_node("john doe"), "john\\20doe");
        assert_eq!(escape_node("d'artagnan"), "d\\27artagnan");
        assert_eq!(escape_node("a\\b"), "a\\5cb");
        assert_eq!(escape_node("  padded  "), "padded");
    }

    #[test]
    fn test_unescape_node_reverses_escape() {
        let raw = "c:\\net & co <x>@home";
        assert_eq!(unescape_node(&escape_node(raw)), raw);
    }

    #[test]
    fn test_escaped_jid_escapes_only_node() {
        assert_eq!(escaped_jid("john doe@example.com"), "john\\20doe@example.com");
        assert_eq!(escaped_jid("example.com"), "example.com");
    }

    #[test]
    fn test_login_jid_appends_resource() {
        let jid = login_jid("alice@example.com", "Parley").unwrap();
        assert_eq!(jid.to_string(), "alice@example.com/Parley");
    }

    #[test]
    fn test_login_jid_domain_only_is_valid() {
        let jid = login_jid("example.com", "Parley").unwrap();
        assert_eq!(jid.to_string(), "example.com/Parley");
    }

    #[test]
    fn test_login_jid_escapes_spaces() {
        let jid = login_jid("john doe@example.com", "Parley").unwrap();
        assert_eq!(jid.to_string(), "john\\20doe@example.com/Parley");
    }

    #[test]
    fn test_login_jid_empty_input_fails() {
        assert!(matches!(login_jid("", "Parley"), Err(ProtocolError::EmptyJid)));
        assert!(matches!(login_jid("   ", "Parley"), Err(ProtocolError::EmptyJid)));
    }

    #[test]
    fn test_parse_jid_accepts_bare_and_full() {
        assert_eq!(parse_jid("alice@example.com").unwrap().to_string(), "alice@example.com");
        assert_eq!(
            parse_jid("alice@example.com/home").unwrap().to_string(),
            "alice@example.com/home"
        );
        assert!(matches!(parse_jid(""), Err(ProtocolError::EmptyJid)));
        assert!(matches!(parse_jid("@example.com"), Err(ProtocolError::InvalidJid { .. })));
    }

    #[test]
    fn test_login_jid_empty_resource_fails() {
        assert!(matches!(
            login_jid("alice@example.com", ""),
            Err(ProtocolError::InvalidJid { .. })
        ));
    }
}
