//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate push methods and targets
//! - Validate header rewriting field names
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: PushConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Placeholders are allowed in targets and header values, not in field
//!   names

use http::header::HeaderName;
use thiserror::Error;

use crate::config::schema::PushConfig;

/// A single configuration problem.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("resource {index}: method {method:?} is not supported, use GET or HEAD")]
    UnsupportedMethod { index: usize, method: String },

    #[error("resource {index}: target must not be empty")]
    EmptyTarget { index: usize },

    #[error("resource {index}: target {target:?} must be an origin-relative path")]
    RemoteTarget { index: usize, target: String },

    #[error("header rule: {name:?} is not a valid field name")]
    InvalidFieldName { name: String },
}

/// Validate the configuration, collecting every problem found.
pub fn validate_config(config: &PushConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for (index, resource) in config.resources.iter().enumerate() {
        let method = &resource.method;
        if !method.eq_ignore_ascii_case("GET") && !method.eq_ignore_ascii_case("HEAD") {
            errors.push(ValidationError::UnsupportedMethod {
                index,
                method: method.clone(),
            });
        }

        if resource.target.is_empty() {
            errors.push(ValidationError::EmptyTarget { index });
        } else if resource.target.starts_with("//") || resource.target.contains("://") {
            errors.push(ValidationError::RemoteTarget {
                index,
                target: resource.target.clone(),
            });
        }
    }

    if let Some(ops) = &config.headers {
        for name in ops.field_names() {
            if HeaderName::try_from(name).is_err() {
                errors.push(ValidationError::InvalidFieldName {
                    name: name.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
