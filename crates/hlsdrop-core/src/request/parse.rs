//! Patterns for picking header, cookie and URL tokens out of a "Copy as cURL" string.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::error::ExtractError;

/// `-H 'Name: Value'`, `--header "Name: Value"`, `-H $'Name: Value'` or a bare token.
fn header_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:^|\s)(?:-H|--header)\s*(?:\$?'([^']*)'|"([^"]*)"|([^\s'"]+))"#)
            .expect("header pattern")
    })
}

/// `-b 'k=v; k2=v2'` / `--cookie "..."`.
fn cookie_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:^|\s)(?:-b|--cookie)\s+(?:\$?'([^']*)'|"([^"]*)"|([^\s'"]+))"#)
            .expect("cookie pattern")
    })
}

/// The URL that directly follows the `curl` word.
fn curl_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"curl\s+\$?['"]?(https?://[^\s'"]+)['"]?"#).expect("curl url pattern")
    })
}

fn any_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"https?://[^\s'"]+"#).expect("url pattern"))
}

/// First non-empty alternative among the quoting forms.
fn quoted_value<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or("")
}

/// Returns `(name, value)` for every header declaration, in order of appearance.
pub(super) fn header_declarations(text: &str) -> Result<Vec<(String, String)>, ExtractError> {
    let mut out = Vec::new();
    for caps in header_re().captures_iter(text) {
        let decl = quoted_value(&caps);
        let (name, value) = decl
            .split_once(": ")
            .ok_or_else(|| ExtractError::MalformedHeader(decl.to_string()))?;
        out.push((name.to_string(), value.to_string()));
    }
    Ok(out)
}

/// Cookie declarations joined the way a browser would send them.
pub(super) fn cookie_declaration(text: &str) -> Option<String> {
    let cookies: Vec<&str> = cookie_re()
        .captures_iter(text)
        .map(|caps| quoted_value(&caps).trim())
        .filter(|c| !c.is_empty())
        .collect();
    if cookies.is_empty() {
        None
    } else {
        Some(cookies.join("; "))
    }
}

/// Request URL: the token after `curl`, else the first URL outside header/cookie declarations.
pub(super) fn request_url(text: &str) -> Option<String> {
    if let Some(caps) = curl_url_re().captures(text) {
        return Some(caps[1].to_string());
    }
    let without_headers = header_re().replace_all(text, " ");
    let stripped = cookie_re().replace_all(&without_headers, " ");
    any_url_re()
        .find(&stripped)
        .map(|m| m.as_str().to_string())
}
