//! Push request header construction.
//!
//! # Responsibilities
//! - Stamp the recursion marker on every push request
//! - Copy the allow-listed content negotiation fields from the original
//!   request
//! - Apply configured header rewriting with request variables
//!
//! # Design Decisions
//! - Only a fixed allow-list is copied; copying the full request header set
//!   would leak request-specific state (cookies, credentials) into push
//!   requests the client never made
//! - The set is built once per request and shared read-only by every push
//!   attempt of that request

use http::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CACHE_CONTROL,
    USER_AGENT,
};

use crate::header_ops::HeaderOps;
use crate::replacer::Replacer;

/// Marker field carried by every pushed request so that a push middleware
/// seeing it again does not push recursively. Wire-visible on purpose: it
/// must survive the reconstruction of the request object on the pushed
/// sub-request.
pub static PUSH_HEADER: HeaderName = HeaderName::from_static("x-h2-push");

/// Fields safe to copy to push requests implicitly. Exactly how push
/// request headers should look is not well-understood; like httpd we copy
/// only well-known fields that requests for certain kinds of content would
/// fail without:
/// <https://httpd.apache.org/docs/2.4/en/howto/http2.html#push>
static SAFE_HEADERS: [HeaderName; 5] = [
    ACCEPT_ENCODING,
    ACCEPT_LANGUAGE,
    ACCEPT,
    CACHE_CONTROL,
    USER_AGENT,
];

/// Build the header set attached to every push issued for one request.
pub(crate) fn initialize_push_headers(
    request_headers: &HeaderMap,
    repl: &Replacer,
    ops: Option<&HeaderOps>,
) -> HeaderMap {
    let mut hdr = HeaderMap::new();

    // prevent recursive pushes
    hdr.insert(PUSH_HEADER.clone(), HeaderValue::from_static("1"));

    for name in &SAFE_HEADERS {
        for value in request_headers.get_all(name) {
            hdr.append(name.clone(), value.clone());
        }
    }

    // user can customize the push request headers
    if let Some(ops) = ops {
        ops.apply(&mut hdr, repl);
    }

    hdr
}
