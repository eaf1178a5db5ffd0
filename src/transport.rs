//! Transport seam for the HTTP/2 push primitive.
//!
//! Whether a connection can push is the transport's decision, not this
//! crate's. A push-capable transport implements [`Pusher`] and attaches a
//! [`PushHandle`] to each request's extensions; the middleware treats the
//! absence of a handle as "push unsupported" and serves the request without
//! pushing. The capability is therefore resolved once per request, without
//! errors, rather than per push attempt.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use http::{HeaderMap, Method};
use thiserror::Error;

/// Error returned by a transport's push primitive.
///
/// The middleware does not distinguish variants: any failure aborts the
/// remaining pushes of the current phase and is never surfaced to the
/// caller. The taxonomy exists for transports and their logs.
#[derive(Debug, Error)]
pub enum PushError {
    /// The peer disabled push (`SETTINGS_ENABLE_PUSH = 0`) mid-connection.
    #[error("push is disabled on this connection")]
    Disabled,

    /// The concurrent push stream limit is exhausted.
    #[error("concurrent push stream limit reached")]
    StreamLimit,

    /// The client reset the promised stream.
    #[error("push stream reset by client")]
    Reset,

    /// Any other transport failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// A synthetic request handed to the transport for pushing.
#[derive(Debug, Clone)]
pub struct PushRequest {
    /// Request method, GET or HEAD.
    pub method: Method,

    /// Origin-relative path of the pushed resource.
    pub path: String,

    /// Headers attached to the synthetic request. Always carries the
    /// recursion marker so the pushed request cannot trigger further pushes.
    pub headers: HeaderMap,
}

impl PushRequest {
    /// Build a push request.
    pub fn new(method: Method, path: impl Into<String>, headers: HeaderMap) -> Self {
        Self {
            method,
            path: path.into(),
            headers,
        }
    }
}

/// Push primitive implemented by the transport.
///
/// The transport may reject a push because the remote settings forbid new
/// promises or because stream capacity is exhausted; in both cases the
/// caller stops pushing for the rest of the request.
pub trait Pusher: Send + Sync {
    /// Initiate a server push for `req`.
    fn push(&self, req: PushRequest) -> Result<(), PushError>;
}

/// Cloneable handle to the connection's [`Pusher`].
///
/// Inserted into the request extensions by the transport on push-capable
/// connections only.
#[derive(Clone)]
pub struct PushHandle(Arc<dyn Pusher>);

impl PushHandle {
    /// Wrap a transport pusher for attachment to a request.
    pub fn new(pusher: Arc<dyn Pusher>) -> Self {
        Self(pusher)
    }

    /// Forward a push to the transport.
    pub fn push(&self, req: PushRequest) -> Result<(), PushError> {
        self.0.push(req)
    }
}

impl fmt::Debug for PushHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PushHandle")
    }
}

/// Request-scoped flag recording that a Link-derived push pass already ran.
///
/// Stacked push middlewares within one request share this flag through the
/// request extensions, guaranteeing at most one Link-derived push pass per
/// original request. The request is handled by a single task at a time, so
/// relaxed ordering is sufficient; the atomic only satisfies the `Sync`
/// requirement on extension values.
#[derive(Clone, Debug, Default)]
pub struct PushedLinks(Arc<AtomicBool>);

impl PushedLinks {
    /// Mark the Link pass as done. Returns `true` if it was already marked.
    pub fn test_and_set(&self) -> bool {
        self.0.swap(true, Ordering::Relaxed)
    }

    /// Whether a Link pass already ran for this request.
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pushed_links_test_and_set() {
        let flag = PushedLinks::default();
        assert!(!flag.is_set());
        assert!(!flag.test_and_set());
        assert!(flag.is_set());
        assert!(flag.test_and_set());
    }

    #[test]
    fn test_pushed_links_clones_share_state() {
        let flag = PushedLinks::default();
        let other = flag.clone();
        assert!(!flag.test_and_set());
        assert!(other.is_set());
        assert!(other.test_and_set());
    }
}
