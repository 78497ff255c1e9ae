//! Criteria used to route incoming stanzas to handlers.

use crate::Element;
use crate::jid::bare_jid;

/// Describes which stanzas a handler wants to see.
///
/// Every criterion is optional; an unset criterion matches anything, so
/// `StanzaMatcher::new()` matches every stanza.
///
/// ```rust
/// use parley_protocol::{StanzaMatcher, ns};
///
/// let privacy_errors = StanzaMatcher::new()
///     .ns(ns::PRIVACY)
///     .name("iq")
///     .stanza_type("error");
/// assert_eq!(privacy_errors.name_filter(), Some("iq"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StanzaMatcher {
    ns: Option<String>,
    name: Option<String>,
    types: Vec<String>,
    id: Option<String>,
    from: Option<String>,
    match_bare_from: bool,
    ignore_ns_fragment: bool,
}

impl StanzaMatcher {
    /// Creates a matcher with no criteria.
    pub fn new() -> Self {
        Self::default()
    }

    /// Namespace of the stanza itself or of one of its direct children.
    pub fn ns(mut self, ns: &str) -> Self {
        self.ns = Some(ns.to_string());
        self
    }

    /// Element name (`iq`, `presence`, `message`).
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Accepted value of the `type` attribute. May be called repeatedly;
    /// the stanza matches if its type equals any of the values.
    pub fn stanza_type(mut self, stanza_type: &str) -> Self {
        self.types.push(stanza_type.to_string());
        self
    }

    /// Exact value of the `id` attribute.
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Value of the `from` attribute.
    pub fn from(mut self, from: &str) -> Self {
        self.from = Some(from.to_string());
        self
    }

    /// Compare `from` on bare JIDs, ignoring resources on both sides.
    pub fn match_bare_from(mut self, enabled: bool) -> Self {
        self.match_bare_from = enabled;
        self
    }

    /// Drop the `#fragment` of stanza namespaces before comparing.
    pub fn ignore_ns_fragment(mut self, enabled: bool) -> Self {
        self.ignore_ns_fragment = enabled;
        self
    }

    pub fn ns_filter(&self) -> Option<&str> {
        self.ns.as_deref()
    }

    pub fn name_filter(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn type_filter(&self) -> &[String] {
        &self.types
    }

    /// Returns `true` if the stanza satisfies every configured criterion.
    pub fn matches(&self, stanza: &Element) -> bool {
        self.ns_matches(stanza)
            && self.name.as_deref().is_none_or(|name| stanza.name() == name)
            && self.type_matches(stanza)
            && self.id.as_deref().is_none_or(|id| stanza.attr("id") == Some(id))
            && self.from_matches(stanza)
    }

    fn ns_matches(&self, stanza: &Element) -> bool {
        let Some(wanted) = self.ns.as_deref() else {
            return true;
        };
        std::iter::once(stanza)
            .chain(stanza.children())
            .any(|el| self.normalize_ns(&el.ns()) == wanted)
    }

    fn normalize_ns<'a>(&self, ns: &'a str) -> &'a str {
        if self.ignore_ns_fragment {
            ns.split('#').next().unwrap_or(ns)
        } else {
            ns
        }
    }

    fn type_matches(&self, stanza: &Element) -> bool {
        if self.types.is_empty() {
            return true;
        }
        match stanza.attr("type") {
            Some(t) => self.types.iter().any(|wanted| wanted == t),
            None => false,
        }
    }

    fn from_matches(&self, stanza: &Element) -> bool {
        let Some(wanted) = self.from.as_deref() else {
            return true;
        };
        let Some(from) = stanza.attr("from") else {
            return false;
        };
        if self.match_bare_from {
            bare_jid(from) == bare_jid(wanted)
        } else {
            from == wanted
        }
    }
}
