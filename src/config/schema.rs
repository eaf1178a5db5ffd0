//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the push
//! middleware. All types derive Serde traits for deserialization from
//! config files.

use http::Method;
use serde::{Deserialize, Serialize};

use crate::header_ops::HeaderOps;

/// Root configuration for the push middleware.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PushConfig {
    /// Resources pushed for every request, in list order.
    pub resources: Vec<PushResource>,

    /// Optional rewriting of the headers attached to push requests.
    pub headers: Option<HeaderOps>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// A request for a resource to push.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PushResource {
    /// Request method, which must be GET or HEAD. Default is GET.
    #[serde(default = "default_method")]
    pub method: String,

    /// Path to the resource being pushed. May reference request variables
    /// with `{...}` placeholders.
    pub target: String,
}

impl PushResource {
    /// The configured method as a typed `http::Method`: HEAD if configured
    /// as such, GET otherwise. Validation rejects anything else at load
    /// time.
    pub fn push_method(&self) -> Method {
        if self.method.eq_ignore_ascii_case("HEAD") {
            Method::HEAD
        } else {
            Method::GET
        }
    }
}

fn default_method() -> String {
    "GET".to_string()
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
