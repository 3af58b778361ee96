//! Link tooltip rewriting.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static HREF_ATTRIBUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"href="([^"]*)""#).unwrap());

/// Rewrite every `href="X"` attribute to also carry `title="X"`, so links
/// show their target as a tooltip on hover.
///
/// This is a textual transform, not HTML-tree-aware, and it must run exactly
/// once per assembly (a second pass would double the title attributes).
/// Attribute values containing a literal `"` are unsupported; the converter
/// is trusted not to emit such values.
pub fn add_href_tooltips(html: &str) -> String {
    HREF_ATTRIBUTE
        .replace_all(html, |caps: &Captures| {
            format!(r#"href="{0}" title="{0}""#, &caps[1])
        })
        .to_string()
}
