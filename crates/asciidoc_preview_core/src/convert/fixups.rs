//! Post-processing fixups for converter output.
//!
//! These are targeted string patches for two known converter defects, not
//! general-purpose transforms. Do not generalize them to arbitrary strings.

/// Rewrite the malformed relative stylesheet path the converter produces on
/// Windows: `href="./<stylesheetURL>` becomes `href="<stylesheetURL>`.
///
/// Only the first occurrence is patched; the converter emits the stylesheet
/// link once.
pub fn fix_stylesheet_href(html: &str, stylesheet_url: &str) -> String {
    let malformed = format!("href=\"./{stylesheet_url}");
    let fixed = format!("href=\"{stylesheet_url}");
    html.replacen(&malformed, &fixed, 1)
}

/// The three known math-delimiter configuration keys whose array literal
/// syntax the converter emits unescaped, paired with the nested-array form
/// the typesetting engine actually accepts.
const MATH_DELIMITER_FIXUPS: [(&str, &str); 3] = [
    (r"inlineMath: [\(,\)]", r#"inlineMath: [["\\(","\\)"]]"#),
    (r"displayMath: [\[,\]]", r#"displayMath: [["\\[","\\]"]]"#),
    (r"delimiters: [\$,\$]", r#"delimiters: [["\\$","\\$"]]"#),
];

/// Patch the math-delimiter configuration embedded in the converted markup,
/// rewriting `[A,B]` to `[["A","B"]]` for the three known configuration
/// keys. Applied only when the document uses math notation.
pub fn escape_math_delimiters(html: &str) -> String {
    let mut html = html.to_string();
    for (malformed, escaped) in MATH_DELIMITER_FIXUPS {
        html = html.replacen(malformed, escaped, 1);
    }
    html
}
