//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Push middleware produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (push attempt/failure counters)
//!
//! Consumers:
//!     → Log aggregation (stdout, file, remote)
//!     → Whatever metrics recorder the embedding application installs
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing
//! - Metrics are cheap (counter increments through the facade)
//! - No exporter is owned here; this crate is embedded, not deployed

pub mod logging;
pub mod metrics;
