//! Page assembly: from converted HTML to a complete standalone document.
//!
//! The whole page is rebuilt as a single string on every call; there is no
//! templating engine and no partial re-render. Each fragment (head, console
//! panel, math bootstrap) is a separately testable pure function.

mod hrefs;
mod linkify;

pub use hrefs::add_href_tooltips;
pub use linkify::linkify_line_reference;

use crate::assets::{AssetRoot, MATHJAX_URL};
use crate::convert::ConversionResult;
use crate::preferences::RenderPreferences;

/// A fully assembled preview page. Derived and stateless, recomputed on
/// every render.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub html_document: String,
}

/// Assemble the complete preview page from a conversion result.
///
/// The page carries, in order: the `<base>` tag, the stylesheet links, the
/// converted body inside the content container (with link tooltips added),
/// the console panel when there are diagnostics, the syntax highlighter,
/// and the math bootstrap when the document uses math notation and the
/// `mjax` preference is enabled.
pub fn assemble_page(
    result: &ConversionResult,
    base_url: &str,
    scroll_position: usize,
    preferences: &RenderPreferences,
    assets: &AssetRoot,
) -> RenderedPage {
    let body_text = add_href_tooltips(&result.body_html);

    let mut html = String::from("<html>");
    html.push_str(&head_fragment(base_url, &preferences.theme, assets));
    html.push_str(&format!(
        r#"<body class="{}" onload="document.body.scrollTop={scroll_position}"><div id="content">"#,
        preferences.doctype.as_str()
    ));
    html.push_str(&body_text);
    html.push_str("</div>");
    html.push_str(&console_fragment(&result.diagnostic_messages));
    html.push_str(&highlight_fragment(assets));
    if result.uses_math && preferences.mjax {
        html.push_str(&mathjax_fragment());
    }
    html.push_str("</body></html>");

    RenderedPage {
        html_document: html,
    }
}

/// The document head: base URL, theme stylesheet, console stylesheet, icon
/// font, highlighter theme, and the fixed max-width override.
pub fn head_fragment(base_url: &str, theme: &str, assets: &AssetRoot) -> String {
    let mut head = String::from("<head>");
    head.push_str(&format!(r#"<base href="{base_url}">"#));
    for stylesheet in [
        assets.theme_css(theme),
        assets.console_css(),
        assets.icon_font_css(),
        assets.highlight_css(),
    ] {
        head.push_str(&format!(
            r#"<link href="{stylesheet}" rel="stylesheet"></link>"#
        ));
    }
    head.push_str(
        r#"<style type="text/css">#header, #content, #footnotes { max-width: 100%; padding-left: 50px; padding-right: 50px; }</style>"#,
    );
    head.push_str("</head>");
    head
}

/// The inline console panel, one paragraph per diagnostic message, each
/// message linkified first. Empty when there are no messages.
pub fn console_fragment(messages: &[String]) -> String {
    if messages.is_empty() {
        return String::new();
    }

    let mut console =
        String::from(r#"<div id="asciidoc-preview-console"><pre id="asciidoc-console-box">"#);
    for message in messages {
        console.push_str(&linkify_line_reference(message));
        console.push_str("<p/>");
    }
    console.push_str("</pre></div>");
    console
}

/// The syntax highlighter script and its initialization call.
fn highlight_fragment(assets: &AssetRoot) -> String {
    format!(
        r#"<script src="{}"></script><script>hljs.initHighlighting();</script>"#,
        assets.highlight_js()
    )
}

/// The math typesetting bootstrap: the delimiter configuration script and
/// the script tag loading the engine from its fixed external URL.
pub fn mathjax_fragment() -> String {
    let mut fragment = String::from(r#"<script type="text/x-mathjax-config">"#);
    fragment.push_str("MathJax.Hub.Config({");
    fragment.push_str("  imageFont: null,");
    fragment.push_str("  tex2jax: {");
    fragment.push_str(r#"    inlineMath: [["\\(", "\\)"]],"#);
    fragment.push_str(r#"    displayMath: [["\\[", "\\]"]],"#);
    fragment.push_str(r#"    ignoreClass: "nostem|nostem|nolatexmath""#);
    fragment.push_str("  },");
    fragment.push_str("  asciimath2jax: {");
    fragment.push_str(r#"    delimiters: [["\\$", "\\$"]],"#);
    fragment.push_str(r#"    ignoreClass: "nostem|nostem|noasciimath""#);
    fragment.push_str("  }");
    fragment.push_str("});");
    fragment.push_str("</script>");
    fragment.push_str(&format!(
        r#"<script type="text/javascript" src="{MATHJAX_URL}"></script>"#
    ));
    fragment
}
