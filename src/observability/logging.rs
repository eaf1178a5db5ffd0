//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subsystem for embedding applications
//! - Configure log level from config and environment
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - RUST_LOG overrides the configured level when set
//! - Push failures log at debug: they are expected operational noise, not
//!   request errors

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize the global tracing subscriber.
///
/// Intended for binaries embedding the middleware; tests and libraries
/// should install their own subscriber. The global subscriber can only be
/// set once, so calling this twice panics.
pub fn init(config: &ObservabilityConfig) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
