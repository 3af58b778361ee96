//! Render preferences for the preview pipeline.
//!
//! The preferences store itself is owned by the hosting editor; the pipeline
//! only reads these values. The keys mirror the store keys used by the
//! settings panel (`theme`, `safemode`, `doctype`, `basedir`, `imagesdir`,
//! `showtitle`, `numbered`, `mjax`, `autosync`, `updatesave`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Converter sandboxing level restricting which document features
/// (includes, shell calls) are permitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeMode {
    Unsafe,
    #[default]
    Safe,
    Server,
    Secure,
}

impl SafeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unsafe => "unsafe",
            Self::Safe => "safe",
            Self::Server => "server",
            Self::Secure => "secure",
        }
    }
}

impl FromStr for SafeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unsafe" => Ok(Self::Unsafe),
            "safe" => Ok(Self::Safe),
            "server" => Ok(Self::Server),
            "secure" => Ok(Self::Secure),
            other => Err(format!("unknown safe mode: {other}")),
        }
    }
}

/// AsciiDoc document type, also used as the CSS class of the preview body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Doctype {
    #[default]
    Article,
    Book,
    Manpage,
}

impl Doctype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Book => "book",
            Self::Manpage => "manpage",
        }
    }
}

impl FromStr for Doctype {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "article" => Ok(Self::Article),
            "book" => Ok(Self::Book),
            "manpage" => Ok(Self::Manpage),
            other => Err(format!("unknown doctype: {other}")),
        }
    }
}

/// User preferences read by the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", default)]
pub struct RenderPreferences {
    /// Name of the theme stylesheet (`<theme>.css` in the themes directory).
    pub theme: String,
    /// Converter sandboxing level.
    pub safemode: SafeMode,
    /// Document type.
    pub doctype: Doctype,
    /// Explicit base directory for resolving includes and relative assets.
    /// When unset, the directory of the document is used.
    pub basedir: Option<String>,
    /// Directory for resolving relative image paths.
    pub imagesdir: Option<String>,
    /// Show the document title in the preview.
    pub showtitle: bool,
    /// Number the section headings.
    pub numbered: bool,
    /// Enable the math typesetting pass for stem content.
    pub mjax: bool,
    /// Synchronize the preview scroll position with the editor.
    pub autosync: bool,
    /// Re-render the preview on document save only.
    pub updatesave: bool,
}

impl Default for RenderPreferences {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            safemode: SafeMode::default(),
            doctype: Doctype::default(),
            basedir: None,
            imagesdir: None,
            showtitle: true,
            numbered: false,
            mjax: true,
            autosync: true,
            updatesave: false,
        }
    }
}

/// Preferences loaded from disk, along with the parse error if the file was
/// present but malformed. A malformed or missing file falls back to the
/// defaults so that startup never fails on a bad preferences file.
pub struct LoadedPreferences {
    pub preferences: RenderPreferences,
    pub file_path: PathBuf,
    pub maybe_error: Option<toml::de::Error>,
}

/// Load preferences from a TOML file.
pub fn load_preferences(preferences_file: &Path) -> LoadedPreferences {
    let mut maybe_error = None;
    let preferences = std::fs::read_to_string(preferences_file)
        .and_then(|contents| {
            toml::from_str(&contents).map_err(|err| {
                maybe_error.replace(err);
                std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "Error occurred in preferences file",
                )
            })
        })
        .unwrap_or_default();

    LoadedPreferences {
        preferences,
        file_path: preferences_file.to_path_buf(),
        maybe_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let prefs = RenderPreferences::default();
        assert_eq!(prefs.theme, "default");
        assert_eq!(prefs.safemode, SafeMode::Safe);
        assert_eq!(prefs.doctype, Doctype::Article);
        assert_eq!(prefs.basedir, None);
        assert_eq!(prefs.imagesdir, None);
        assert!(prefs.showtitle);
        assert!(!prefs.numbered);
        assert!(prefs.mjax);
        assert!(prefs.autosync);
        assert!(!prefs.updatesave);
    }

    #[test]
    fn test_deserialize_partial_file() {
        let prefs: RenderPreferences = toml::from_str(
            r#"
            theme = "dark"
            safemode = "secure"
            doctype = "book"
            numbered = true
            "#,
        )
        .unwrap();
        assert_eq!(prefs.theme, "dark");
        assert_eq!(prefs.safemode, SafeMode::Secure);
        assert_eq!(prefs.doctype, Doctype::Book);
        assert!(prefs.numbered);
        // Untouched keys keep their defaults.
        assert!(prefs.mjax);
        assert_eq!(prefs.basedir, None);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut prefs = RenderPreferences::default();
        prefs.basedir = Some("/docs".to_string());
        prefs.imagesdir = Some("/docs/images".to_string());
        prefs.updatesave = true;

        let serialized = toml::to_string(&prefs).unwrap();
        let deserialized: RenderPreferences = toml::from_str(&serialized).unwrap();
        assert_eq!(prefs, deserialized);
    }

    #[test]
    fn test_safe_mode_from_str() {
        assert_eq!("safe".parse::<SafeMode>().unwrap(), SafeMode::Safe);
        assert_eq!("SERVER".parse::<SafeMode>().unwrap(), SafeMode::Server);
        assert!("sandbox".parse::<SafeMode>().is_err());
    }

    #[test]
    fn test_doctype_from_str() {
        assert_eq!("book".parse::<Doctype>().unwrap(), Doctype::Book);
        assert!("letter".parse::<Doctype>().is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let loaded = load_preferences(Path::new("/nonexistent/preferences.toml"));
        assert_eq!(loaded.preferences, RenderPreferences::default());
        assert!(loaded.maybe_error.is_none());
    }
}
