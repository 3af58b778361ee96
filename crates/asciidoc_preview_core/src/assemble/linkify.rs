//! Line-reference linkifying for converter diagnostics.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_REFERENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s([0-9]+):\s").unwrap());

/// Turn a diagnostic message containing a line-number marker into a
/// same-page anchor link.
///
/// A marker is whitespace, one or more digits, a colon, whitespace. The
/// first such digit run becomes a link to the `goto_<linenum>` anchor;
/// messages without a marker pass through unchanged.
pub fn linkify_line_reference(message: &str) -> String {
    match LINE_REFERENCE.captures(message) {
        Some(caps) => format!(r##"<a href="#goto_{}">{message}</a>"##, &caps[1]),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_line_number() {
        assert_eq!(
            linkify_line_reference("error 42: bad block"),
            r##"<a href="#goto_42">error 42: bad block</a>"##
        );
    }

    #[test]
    fn test_message_without_line_number_unchanged() {
        assert_eq!(linkify_line_reference("no numbers here"), "no numbers here");
    }

    #[test]
    fn test_first_marker_wins() {
        assert_eq!(
            linkify_line_reference("warn 3: see also 7: later"),
            r##"<a href="#goto_3">warn 3: see also 7: later</a>"##
        );
    }

    #[test]
    fn test_digits_without_marker_shape_unchanged() {
        // No surrounding whitespace/colon pattern, so no link.
        assert_eq!(linkify_line_reference("error42:bad"), "error42:bad");
    }
}
