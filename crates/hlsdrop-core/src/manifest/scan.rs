//! Line-oriented reference matching.

use regex::Regex;

/// Matches a whole (trimmed) line ending in a suffix, optionally followed by `?query`.
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    re: Regex,
}

impl ReferencePattern {
    pub fn new(suffix: &str) -> Self {
        let pattern = format!(r"^.*{}(?:\?.*)?$", regex::escape(suffix));
        // Escaped input always yields a valid pattern.
        let re = Regex::new(&pattern).expect("escaped suffix pattern");
        Self { re }
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.re.is_match(line)
    }
}

/// True for lines whose first non-whitespace character is the playlist comment/tag marker.
fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

/// Finds references with `pattern`'s suffix in `content`, resolved against `base_url`.
///
/// Comment and blank lines are never references. A reference that cannot be
/// resolved is logged and dropped.
pub fn find_references(content: &str, base_url: &str, pattern: &ReferencePattern) -> Vec<String> {
    let base = match url::Url::parse(base_url) {
        Ok(u) => u,
        Err(e) => {
            tracing::warn!(base = %base_url, error = %e, "manifest URL is not absolute; skipping scan");
            return Vec::new();
        }
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
        .filter(|line| pattern.is_match(line))
        .filter_map(|line| match base.join(line) {
            Ok(u) => Some(u.to_string()),
            Err(e) => {
                tracing::warn!(reference = %line, error = %e, "unresolvable reference");
                None
            }
        })
        .collect()
}
