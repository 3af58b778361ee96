//! Front-matter detection and removal.
//!
//! Documents may start with a metadata block delimited by lines of exactly
//! three hyphens. The block carries no meaning for the converter and is
//! removed before conversion.

/// Strip a leading front-matter block from the document text.
///
/// A front-matter block starts with a first line of exactly `---`, followed
/// by arbitrary lines, and ends with a closing line of exactly `---`. The
/// whole block, both delimiter lines included, is removed along with the
/// newline following the closing delimiter.
///
/// An unterminated block is treated as no front matter at all: only a full
/// match is stripped, everything else passes through unchanged.
///
/// # Examples
///
/// ```
/// use asciidoc_preview_core::frontmatter::strip_front_matter;
///
/// assert_eq!(strip_front_matter("---\ntitle: x\n---\n= Doc"), "= Doc");
/// assert_eq!(strip_front_matter("= Doc"), "= Doc");
/// ```
pub fn strip_front_matter(text: &str) -> &str {
    let mut offset = 0;
    let mut is_first_line = true;

    for line in text.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if is_first_line {
            if trimmed != "---" {
                return text;
            }
            is_first_line = false;
        } else if trimmed == "---" {
            return &text[offset + line.len()..];
        }
        offset += line.len();
    }

    // Unterminated block, treat as no front matter.
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_front_matter_is_noop() {
        assert_eq!(strip_front_matter("= Title\n\nSome text"), "= Title\n\nSome text");
        assert_eq!(strip_front_matter(""), "");
    }

    #[test]
    fn test_strips_full_block() {
        assert_eq!(strip_front_matter("---\nX\n---\nREST"), "REST");
    }

    #[test]
    fn test_strips_multiline_block() {
        let text = "---\nlayout: post\ntitle: Hello\n---\n= Heading\n";
        assert_eq!(strip_front_matter(text), "= Heading\n");
    }

    #[test]
    fn test_unterminated_block_is_noop() {
        let text = "---\nlayout: post\n= Heading";
        assert_eq!(strip_front_matter(text), text);
    }

    #[test]
    fn test_delimiter_must_be_exactly_three_hyphens() {
        let text = "----\nlisting block\n----\ntext";
        assert_eq!(strip_front_matter(text), text);
    }

    #[test]
    fn test_block_at_end_of_input() {
        assert_eq!(strip_front_matter("---\nX\n---"), "");
        assert_eq!(strip_front_matter("---\nX\n---\n"), "");
    }

    #[test]
    fn test_crlf_delimiters() {
        assert_eq!(strip_front_matter("---\r\nX\r\n---\r\nREST"), "REST");
    }

    #[test]
    fn test_delimiter_not_on_first_line_is_noop() {
        let text = "\n---\nX\n---\nREST";
        assert_eq!(strip_front_matter(text), text);
    }
}
