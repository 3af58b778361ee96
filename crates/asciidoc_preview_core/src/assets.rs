//! Styling and script asset URLs for the assembled page.
//!
//! The preview page references its stylesheets and scripts by URL, it never
//! embeds them. All bundled assets live under a single root (the extension
//! install directory in the original setup); the math typesetting engine is
//! the only asset loaded from a fixed external URL.

/// URL of the external math typesetting engine, loaded only when the
/// document contains stem content and the `mjax` preference is enabled.
pub const MATHJAX_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/mathjax/2.4.0/MathJax.js?config=TeX-MML-AM_HTMLorMML";

/// Resolves bundled asset URLs relative to a root URL.
#[derive(Debug, Clone)]
pub struct AssetRoot {
    base: String,
}

impl AssetRoot {
    /// Create an asset root. A trailing slash on `base` is ignored.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }

    fn url(&self, relative: &str) -> String {
        format!("{}/{relative}", self.base)
    }

    /// Stylesheet URL for the named theme (`themes/<theme>.css`).
    pub fn theme_css(&self, theme: &str) -> String {
        self.url(&format!("themes/{theme}.css"))
    }

    /// Stylesheet for the inline console panel.
    pub fn console_css(&self) -> String {
        self.url("styles/console.css")
    }

    /// Icon font stylesheet.
    pub fn icon_font_css(&self) -> String {
        self.url("styles/font-awesome/css/font-awesome.min.css")
    }

    /// Syntax highlighting theme stylesheet.
    pub fn highlight_css(&self) -> String {
        self.url("styles/highlightjs/styles/default.min.css")
    }

    /// Syntax highlighter script.
    pub fn highlight_js(&self) -> String {
        self.url("styles/highlightjs/highlight.min.js")
    }
}
