//! User-customizable header rewriting.
//!
//! # Responsibilities
//! - Apply configured add/set/delete operations to a header collection
//! - Expand `{variable}` placeholders in configured values per request
//!
//! # Design Decisions
//! - Operations apply in add → set → delete order, so delete wins
//! - An entry that does not form a valid field name or value after
//!   expansion is skipped with a warning instead of failing the request;
//!   config validation reports such names at load time

use std::collections::BTreeMap;

use http::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::replacer::Replacer;

/// Configured header rewriting rules.
///
/// Field names are fixed strings; values are templates expanded through the
/// request's [`Replacer`] at apply time.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HeaderOps {
    /// Values appended to the named fields, keeping existing values.
    pub add: BTreeMap<String, Vec<String>>,

    /// Values replacing any existing values of the named fields.
    pub set: BTreeMap<String, String>,

    /// Field names removed after adds and sets.
    pub delete: Vec<String>,
}

impl HeaderOps {
    /// True if no operation is configured.
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.set.is_empty() && self.delete.is_empty()
    }

    /// Every configured field name, for validation.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.add
            .keys()
            .chain(self.set.keys())
            .map(String::as_str)
            .chain(self.delete.iter().map(String::as_str))
    }

    /// Apply the configured operations to `headers`, expanding value
    /// templates through `repl`.
    pub fn apply(&self, headers: &mut HeaderMap, repl: &Replacer) {
        for (name, values) in &self.add {
            let Some(name) = parse_name(name) else {
                continue;
            };
            for value in values {
                if let Some(value) = parse_value(&repl.expand(value)) {
                    headers.append(name.clone(), value);
                }
            }
        }
        for (name, value) in &self.set {
            let Some(name) = parse_name(name) else {
                continue;
            };
            if let Some(value) = parse_value(&repl.expand(value)) {
                headers.insert(name, value);
            }
        }
        for name in &self.delete {
            if let Some(name) = parse_name(name) {
                headers.remove(name);
            }
        }
    }
}

fn parse_name(name: &str) -> Option<HeaderName> {
    match HeaderName::try_from(name) {
        Ok(name) => Some(name),
        Err(_) => {
            warn!(field = %name, "Ignoring header rule with invalid field name");
            None
        }
    }
}

fn parse_value(value: &str) -> Option<HeaderValue> {
    match HeaderValue::try_from(value) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(value = %value, "Ignoring header rule with invalid field value");
            None
        }
    }
}
