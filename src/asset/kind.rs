//! Asset vocabulary: category, inline policy, mutability and load timing.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::DirectoryProvider;
use crate::utils::mime::{self, normalize_extension};

// ============================================================================
// Category
// ============================================================================

/// Kind of output asset, determines destination directory and markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    /// Style sheet (css, scss, sass, less)
    Style,
    /// Script (js, ts)
    Script,
    /// Image, video or audio
    Media,
    /// Reusable HTML fragment
    #[serde(rename = "html")]
    HtmlFragment,
    /// Font file
    Font,
    /// Anything else, copied but never embedded
    Other,
}

const MEDIA_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "svg", "webp", "avif", "apng", "bmp", "tiff", "ico", "mp4",
    "webm", "ogg", "mov", "mp3", "wav", "flac", "aac", "m4a", "opus",
];
const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs", "ts"];
const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less"];
const HTML_EXTENSIONS: &[&str] = &["html", "htm"];
const FONT_EXTENSIONS: &[&str] = &["ttf", "woff", "woff2", "eot", "otf"];

impl AssetCategory {
    pub const ALL: [Self; 6] = [
        Self::Style,
        Self::Script,
        Self::Media,
        Self::HtmlFragment,
        Self::Font,
        Self::Other,
    ];

    /// Classify a file extension (case-insensitive, leading dot optional).
    ///
    /// Extensions missing from the category lists fall back to their MIME
    /// type: image, audio and video are media, the rest is
    /// [`AssetCategory::Other`].
    pub fn from_extension(ext: &str) -> Self {
        let ext = normalize_extension(ext);
        let ext = ext.as_str();
        if MEDIA_EXTENSIONS.contains(&ext) {
            Self::Media
        } else if SCRIPT_EXTENSIONS.contains(&ext) {
            Self::Script
        } else if STYLE_EXTENSIONS.contains(&ext) {
            Self::Style
        } else if HTML_EXTENSIONS.contains(&ext) {
            Self::HtmlFragment
        } else if FONT_EXTENSIONS.contains(&ext) {
            Self::Font
        } else if is_media_type(mime::from_extension(ext)) {
            Self::Media
        } else {
            Self::Other
        }
    }

    /// Classify a file path by its extension.
    pub fn from_path(path: &Path) -> Self {
        Self::from_extension(path.extension().and_then(|e| e.to_str()).unwrap_or_default())
    }

    /// Destination directory for this category.
    pub fn directory(self, dirs: &dyn DirectoryProvider) -> &Path {
        dirs.directory(self)
    }

    /// Whether assets of this category carry text rather than bytes.
    pub fn is_text(self) -> bool {
        matches!(self, Self::Style | Self::Script | Self::HtmlFragment)
    }

    /// Display name for this category.
    pub fn name(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::Script => "script",
            Self::Media => "media",
            Self::HtmlFragment => "html",
            Self::Font => "font",
            Self::Other => "other",
        }
    }
}

fn is_media_type(mime_type: &str) -> bool {
    mime::is_image(mime_type) || mime::is_audio(mime_type) || mime::is_video(mime_type)
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AssetCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown asset category `{s}`"))
    }
}

// ============================================================================
// Inline Policy
// ============================================================================

/// How an asset wants to be embedded into pages.
///
/// The `*Head` variants additionally ask to be placed in the document head;
/// where markup ends up is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InlinePolicy {
    /// Inline or reference depending on configuration, placed in head.
    AutoHead,
    /// Inline or reference depending on configuration.
    Auto,
    /// Always inline.
    Inline,
    /// Always reference a downloaded copy.
    Download,
    /// Always reference a downloaded copy, placed in head.
    DownloadHead,
    /// Always inline, placed in head.
    InlineHead,
    /// Produce no markup.
    None,
}

impl InlinePolicy {
    pub const ALL: [Self; 7] = [
        Self::AutoHead,
        Self::Auto,
        Self::Inline,
        Self::Download,
        Self::DownloadHead,
        Self::InlineHead,
        Self::None,
    ];

    /// Whether markup should be hoisted into the document head.
    pub fn is_head(self) -> bool {
        matches!(self, Self::AutoHead | Self::DownloadHead | Self::InlineHead)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AutoHead => "autohead",
            Self::Auto => "auto",
            Self::Inline => "inline",
            Self::Download => "download",
            Self::DownloadHead => "downloadhead",
            Self::InlineHead => "inlinehead",
            Self::None => "none",
        }
    }
}

impl fmt::Display for InlinePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InlinePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown inline policy `{s}`"))
    }
}

// ============================================================================
// Mutability
// ============================================================================

/// Lifecycle of an asset across exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mutability {
    /// Content fixed across runs; timestamp inherits the registry build time.
    Durable,
    /// Content may change between runs.
    Mutable,
    /// Exists only for the current export and is removed afterwards.
    Ephemeral,
    /// Owned by a parent asset, never tracked on its own.
    Child,
}

// ============================================================================
// Load Timing
// ============================================================================

/// Loading preference, rendered as a markup attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadTiming {
    #[default]
    Default,
    Async,
    Defer,
}

impl LoadTiming {
    pub const ALL: [Self; 3] = [Self::Default, Self::Async, Self::Defer];

    /// Attribute text emitted in `<script>` tags (empty for `Default`).
    pub fn attr(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Async => "async",
            Self::Defer => "defer",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            other => other.attr(),
        }
    }
}

impl FromStr for LoadTiming {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown load timing `{s}`"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_extension() {
        assert_eq!(AssetCategory::from_extension("css"), AssetCategory::Style);
        assert_eq!(AssetCategory::from_extension("less"), AssetCategory::Style);
        assert_eq!(AssetCategory::from_extension("js"), AssetCategory::Script);
        assert_eq!(AssetCategory::from_extension("mp4"), AssetCategory::Media);
        assert_eq!(AssetCategory::from_extension("htm"), AssetCategory::HtmlFragment);
        assert_eq!(AssetCategory::from_extension("woff2"), AssetCategory::Font);
        assert_eq!(AssetCategory::from_extension("pdf"), AssetCategory::Other);
    }

    #[test]
    fn test_from_extension_mime_fallback() {
        assert_eq!(AssetCategory::from_extension("avi"), AssetCategory::Media);
        assert_eq!(AssetCategory::from_extension("MIDI"), AssetCategory::Media);
        assert_eq!(AssetCategory::from_extension("json"), AssetCategory::Other);
        assert_eq!(AssetCategory::from_extension("exe"), AssetCategory::Other);
    }

    #[test]
    fn test_from_extension_case_and_dot() {
        assert_eq!(AssetCategory::from_extension("PNG"), AssetCategory::Media);
        assert_eq!(AssetCategory::from_extension(".Css"), AssetCategory::Style);
        assert_eq!(AssetCategory::from_extension("unknownext"), AssetCategory::Other);
        assert_eq!(AssetCategory::from_extension(""), AssetCategory::Other);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(
            AssetCategory::from_path(&PathBuf::from("fonts/Inter.WOFF")),
            AssetCategory::Font
        );
        assert_eq!(AssetCategory::from_path(&PathBuf::from("README")), AssetCategory::Other);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("html".parse::<AssetCategory>(), Ok(AssetCategory::HtmlFragment));
        assert_eq!("InlineHead".parse::<InlinePolicy>(), Ok(InlinePolicy::InlineHead));
        assert_eq!("defer".parse::<LoadTiming>(), Ok(LoadTiming::Defer));
        assert!("sometimes".parse::<InlinePolicy>().is_err());
    }

    #[test]
    fn test_head_policies() {
        let head: Vec<_> = InlinePolicy::ALL.into_iter().filter(|p| p.is_head()).collect();
        assert_eq!(
            head,
            vec![InlinePolicy::AutoHead, InlinePolicy::DownloadHead, InlinePolicy::InlineHead]
        );
    }

    #[test]
    fn test_timing_attr() {
        assert_eq!(LoadTiming::Default.attr(), "");
        assert_eq!(LoadTiming::Async.attr(), "async");
        assert_eq!(LoadTiming::Defer.attr(), "defer");
    }

    #[test]
    fn test_serde_names() {
        #[derive(Deserialize)]
        struct Row {
            category: AssetCategory,
            policy: InlinePolicy,
            mutability: Mutability,
        }
        let row: Row =
            toml::from_str("category = \"html\"\npolicy = \"downloadhead\"\nmutability = \"ephemeral\"")
                .unwrap();
        assert_eq!(row.category, AssetCategory::HtmlFragment);
        assert_eq!(row.policy, InlinePolicy::DownloadHead);
        assert_eq!(row.mutability, Mutability::Ephemeral);
    }
}
