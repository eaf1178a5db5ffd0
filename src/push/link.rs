//! `Link` response header parsing and push eligibility.
//!
//! Best-effort RFC 8288 token parsing: each comma-separated token of a raw
//! header value becomes a [`LinkEntry`] unless it is malformed, in which
//! case it alone is skipped and parsing continues with the next token. The
//! parser never fails a request.

use std::collections::HashMap;
use std::str::Split;

/// One parsed `Link` token: the target URI plus its parameters.
///
/// Created per token while deciding what to push, then discarded; never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEntry {
    uri: String,
    params: HashMap<String, String>,
}

impl LinkEntry {
    /// The target URI, verbatim between `<` and `>`. No percent-decoding,
    /// no normalization.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Parameter lookup by lower-cased name. Value-less parameters map to
    /// the empty string.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Whether this resource may be pushed on the current origin.
    ///
    /// Resources carrying a `nopush` parameter and remote resources are
    /// excluded; pushing cross-origin or scheme-qualified resources is
    /// undefined for server push semantics.
    pub fn is_pushable(&self) -> bool {
        !self.params.contains_key("nopush") && !is_remote_resource(&self.uri)
    }
}

/// True if `uri` starts with a scheme or is a protocol-relative URI.
fn is_remote_resource(uri: &str) -> bool {
    uri.starts_with("//") || uri.starts_with("http://") || uri.starts_with("https://")
}

/// Parse one raw `Link` header value into its well-formed entries, lazily
/// and in input order. That order governs push attempt order.
pub fn parse(value: &str) -> Links<'_> {
    Links {
        tokens: value.split(','),
    }
}

/// Iterator over the well-formed entries of one `Link` header value.
#[derive(Debug)]
pub struct Links<'a> {
    tokens: Split<'a, char>,
}

impl Iterator for Links<'_> {
    type Item = LinkEntry;

    fn next(&mut self) -> Option<LinkEntry> {
        self.tokens.by_ref().find_map(parse_token)
    }
}

/// Parse a single `<uri>; name; name=value; name="value"` token. Returns
/// `None` for malformed tokens: no `<`, no closing `>`, an empty URI, or a
/// parameter with an empty name.
fn parse_token(token: &str) -> Option<LinkEntry> {
    let rest = token.trim().strip_prefix('<')?;
    let (uri, rest) = rest.split_once('>')?;
    let uri = uri.trim();
    if uri.is_empty() {
        return None;
    }

    let mut params = HashMap::new();
    for param in rest.split(';') {
        let param = param.trim();
        if param.is_empty() {
            continue;
        }
        let (name, value) = match param.split_once('=') {
            Some((name, value)) => (name.trim_end(), value.trim().trim_matches('"')),
            None => (param, ""),
        };
        if name.is_empty() {
            return None;
        }
        // Later duplicates win; names are unique within one entry.
        params.insert(name.to_ascii_lowercase(), value.to_string());
    }

    Some(LinkEntry {
        uri: uri.to_string(),
        params,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(value: &str) -> Vec<LinkEntry> {
        parse(value).collect()
    }

    #[test]
    fn test_single_entry_with_param() {
        let links = entries("</style.css>; rel=preload");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].uri(), "/style.css");
        assert_eq!(links[0].param("rel"), Some("preload"));
    }

    #[test]
    fn test_multiple_entries_keep_order() {
        let links = entries("</a.css>; rel=preload, </b.js>; rel=preload; nopush");
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].uri(), "/a.css");
        assert!(links[0].is_pushable());
        assert_eq!(links[1].uri(), "/b.js");
        assert_eq!(links[1].param("nopush"), Some(""));
        assert!(!links[1].is_pushable());
    }

    #[test]
    fn test_quoted_param_value() {
        let links = entries("</f.woff2>; rel=\"preload\"; as=\"font\"");
        assert_eq!(links[0].param("rel"), Some("preload"));
        assert_eq!(links[0].param("as"), Some("font"));
    }

    #[test]
    fn test_param_names_are_lowercased() {
        let links = entries("</a.css>; REL=preload; NoPush");
        assert_eq!(links[0].param("rel"), Some("preload"));
        assert!(!links[0].is_pushable());
    }

    #[test]
    fn test_uri_taken_verbatim() {
        let links = entries("</a%20b.css?v=1&x=2>");
        assert_eq!(links[0].uri(), "/a%20b.css?v=1&x=2");
    }

    #[test]
    fn test_malformed_token_does_not_abort_parsing() {
        let links = entries("<unterminated; rel=preload, </ok.css>; rel=preload");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].uri(), "/ok.css");
    }

    #[test]
    fn test_token_without_uri_is_skipped() {
        assert!(entries("rel=preload, <>; rel=preload").is_empty());
    }

    #[test]
    fn test_empty_value() {
        assert!(entries("").is_empty());
    }

    #[test]
    fn test_absolute_uri_is_not_pushable() {
        let links = entries("<https://cdn.example.com/x.js>; rel=preload");
        assert_eq!(links.len(), 1);
        assert!(!links[0].is_pushable());
    }

    #[test]
    fn test_remote_resource_detection() {
        assert!(is_remote_resource("//cdn.example.com/x.js"));
        assert!(is_remote_resource("http://example.com/a"));
        assert!(is_remote_resource("https://example.com/a"));
        assert!(!is_remote_resource("/local/a.css"));
        assert!(!is_remote_resource("relative/a.css"));
    }

    #[test]
    fn test_duplicate_param_last_wins() {
        let links = entries("</a.css>; as=style; as=script");
        assert_eq!(links[0].param("as"), Some("script"));
    }
}
