//! Variable substitution for configured string templates.
//!
//! Configured push targets and header values may reference request-derived
//! variables with `{variable}` placeholders, e.g.
//! `/assets/{http.request.host}/app.css`. The transport builds one
//! [`Replacer`] per request and attaches it to the request extensions;
//! stages that expand templates read it from there.

use std::collections::HashMap;
use std::sync::Arc;

use http::Request;

/// Per-request variable table with `{placeholder}` expansion.
///
/// Clones are cheap and share the same table; the table is immutable once
/// attached to a request.
#[derive(Clone, Debug, Default)]
pub struct Replacer {
    vars: Arc<HashMap<String, String>>,
}

impl Replacer {
    /// Build a replacer over an explicit variable table.
    pub fn new(vars: HashMap<String, String>) -> Self {
        Self {
            vars: Arc::new(vars),
        }
    }

    /// Build a replacer seeded with the standard request variables:
    /// `http.request.method`, `http.request.uri`, `http.request.path` and
    /// `http.request.host`.
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let mut vars = HashMap::new();
        vars.insert("http.request.method".to_string(), req.method().to_string());
        vars.insert("http.request.uri".to_string(), req.uri().to_string());
        vars.insert("http.request.path".to_string(), req.uri().path().to_string());

        // Absolute-form URIs carry the host; otherwise fall back to Host.
        let host = req.uri().host().map(str::to_string).or_else(|| {
            req.headers()
                .get(http::header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        });
        if let Some(host) = host {
            vars.insert("http.request.host".to_string(), host);
        }

        Self::new(vars)
    }

    /// Look up a single variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Expand every `{variable}` placeholder in `template`, replacing
    /// unknown variables with the empty string.
    pub fn expand(&self, template: &str) -> String {
        self.expand_or(template, "")
    }

    /// Expand every `{variable}` placeholder in `template`, replacing
    /// unknown variables with `fallback`. An unterminated `{` is copied
    /// through verbatim.
    pub fn expand_or(&self, template: &str, fallback: &str) -> String {
        if !template.contains('{') {
            return template.to_string();
        }

        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            match after.find('}') {
                Some(end) => {
                    match self.vars.get(&after[..end]) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(fallback),
                    }
                    rest = &after[end + 1..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    return out;
                }
            }
        }
        out.push_str(rest);
        out
    }
}
