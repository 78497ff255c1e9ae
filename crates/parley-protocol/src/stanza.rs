//! Builders for the stanzas the session layer sends on its own.

use crate::minidom::{Element, rxml::NcName};
use crate::ns;

/// Convert a static attribute name to an `NcName`.
///
/// Panics if the string is not a valid NCName; only called with the
/// literal attribute names below.
pub(crate) fn ncname(s: &str) -> NcName {
    NcName::try_from(s).unwrap_or_else(|_| panic!("invalid NCName: {s}"))
}

/// Build `<presence type="unavailable">`, used to leave a MUC room.
///
/// `to` is the occupant JID (`room@conference.example.com/nick`).
pub fn unavailable_presence(
    from: Option<&str>,
    to: &str,
    id: &str,
    status: Option<&str>,
) -> Element {
    let mut builder = Element::builder("presence", ns::CLIENT)
        .attr(ncname("type"), "unavailable")
        .attr(ncname("id"), id)
        .attr(ncname("to"), to);
    if let Some(from) = from {
        builder = builder.attr(ncname("from"), from);
    }
    if let Some(status) = status {
        builder = builder.append(
            Element::builder("status", ns::CLIENT)
                .append(status)
                .build(),
        );
    }
    builder.build()
}

/// Build a directed presence that joins a MUC room.
pub fn join_presence(
    from: Option<&str>,
    to: &str,
    id: &str,
    password: Option<&str>,
) -> Element {
    let mut muc = Element::builder("x", ns::MUC);
    if let Some(password) = password {
        muc = muc.append(
            Element::builder("password", ns::MUC)
                .append(password)
                .build(),
        );
    }

    let mut builder = Element::builder("presence", ns::CLIENT)
        .attr(ncname("id"), id)
        .attr(ncname("to"), to);
    if let Some(from) = from {
        builder = builder.attr(ncname("from"), from);
    }
    builder.append(muc.build()).build()
}

/// Build the private-storage query that fetches the user's bookmarks.
pub fn bookmarks_request(id: &str) -> Element {
    let storage = Element::builder("storage", ns::BOOKMARKS).build();
    let query = Element::builder("query", ns::PRIVATE)
        .append(storage)
        .build();
    Element::builder("iq", ns::CLIENT)
        .attr(ncname("type"), "get")
        .attr(ncname("id"), id)
        .append(query)
        .build()
}
