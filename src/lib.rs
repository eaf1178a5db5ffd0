//! HTTP/2 server-push middleware for tower pipelines.
//!
//! Wraps an inner `tower::Service` and, per request: pushes a configured
//! list of resources before the downstream response is produced, then
//! parses the response's `Link` headers and pushes the eligible resources
//! they describe. Pushed sub-requests are marked with a reserved header
//! field and never trigger further pushes.
//!
//! The push primitive itself belongs to the transport: a push-capable
//! connection attaches a [`transport::PushHandle`] to each request's
//! extensions, and requests without one are served without pushing.
//!
//! ```ignore
//! use h2_push::{config, PushLayer};
//! use tower::ServiceBuilder;
//!
//! let cfg = config::load_config("push.toml".as_ref())?;
//! let service = ServiceBuilder::new()
//!     .layer(PushLayer::new(&cfg))
//!     .service(app);
//! ```

// Core subsystems
pub mod config;
pub mod push;
pub mod transport;

// Request-scoped utilities
pub mod header_ops;
pub mod replacer;

// Cross-cutting concerns
pub mod observability;

pub use config::PushConfig;
pub use push::{PushLayer, PushService, PUSH_HEADER};
pub use transport::{PushError, PushHandle, PushRequest, Pusher};
