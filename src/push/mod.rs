//! Server push subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → service.rs (recursion/capability check)
//!     → headers.rs (build the shared push header set)
//!     → configured resources pushed, in order
//!     → inner service produces the response
//!     → link.rs (parse response Link fields, filter)
//!     → eligible Link resources pushed, once per request
//! ```
//!
//! # Design Decisions
//! - Pushing is strictly sequential within a request; the surrounding
//!   pipeline decides how many requests run concurrently
//! - The recursion guard travels as a wire header so it survives the
//!   reconstruction of the pushed sub-request

pub mod headers;
pub mod link;
pub mod service;

pub use headers::PUSH_HEADER;
pub use link::{parse, LinkEntry};
pub use service::{PushLayer, PushService};
