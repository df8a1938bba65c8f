//! Markup rendering.
//!
//! Each category has a [`Renderer`] with one function per visible mode. The
//! mode itself always comes from [`RenderMode::resolve`]; suppressed assets
//! render to an empty string.
//!
//! The emitted strings are consumed by page scripts (the `loaded` attribute
//! set by script `onload`, the preload/swap pattern for async styles) and
//! must keep their exact shape.

use std::path::Path;

use super::{Asset, AssetCategory, LoadTiming, RenderMode};
use crate::config::ExportConfig;

/// Markup producers for one category.
struct Renderer {
    inline: fn(&Asset) -> String,
    reference: fn(&Asset, &str) -> String,
}

const STYLE: Renderer = Renderer {
    inline: style_inline,
    reference: style_reference,
};
const SCRIPT: Renderer = Renderer {
    inline: script_inline,
    reference: script_reference,
};
const MEDIA: Renderer = Renderer {
    inline: media_inline,
    reference: media_reference,
};
const HTML: Renderer = Renderer {
    inline: html_inline,
    reference: html_reference,
};
const FONT: Renderer = Renderer {
    inline: font_inline,
    reference: font_reference,
};
const OTHER: Renderer = Renderer {
    inline: |_| String::new(),
    reference: |_, _| String::new(),
};

fn renderer(category: AssetCategory) -> &'static Renderer {
    match category {
        AssetCategory::Style => &STYLE,
        AssetCategory::Script => &SCRIPT,
        AssetCategory::Media => &MEDIA,
        AssetCategory::HtmlFragment => &HTML,
        AssetCategory::Font => &FONT,
        AssetCategory::Other => &OTHER,
    }
}

impl Asset {
    /// Markup embedding this asset into a page located in `anchor` (a
    /// directory relative to the export root).
    pub fn render(&self, config: &ExportConfig, anchor: &Path) -> String {
        let renderer = renderer(self.category());
        match self.render_mode(config) {
            RenderMode::Inline => (renderer.inline)(self),
            RenderMode::Reference => (renderer.reference)(self, &self.href(anchor, config)),
            RenderMode::Suppressed => String::new(),
        }
    }
}

// ============================================================================
// Style
// ============================================================================

fn style_inline(asset: &Asset) -> String {
    format!("<style>{}</style>", asset.text())
}

fn style_reference(asset: &Asset, path: &str) -> String {
    if asset.timing() == LoadTiming::Async {
        format!(
            "<link rel=\"preload\" href=\"{path}\" as=\"style\" onload=\"this.onload=null;this.rel='stylesheet'\"><noscript><link rel=\"stylesheet\" href=\"{path}\"></noscript>"
        )
    } else {
        format!("<link rel=\"stylesheet\" href=\"{path}\">")
    }
}

// ============================================================================
// Script
// ============================================================================

fn script_inline(asset: &Asset) -> String {
    format!("<script {}>{}</script>", asset.timing().attr(), asset.text())
}

fn script_reference(asset: &Asset, path: &str) -> String {
    format!(
        "<script {} id=\"{}-script\" src=\"{path}\" onload='this.onload=null;this.setAttribute(\"loaded\", \"true\")'></script>",
        asset.timing().attr(),
        asset.basename(),
    )
}

// ============================================================================
// Media
// ============================================================================

fn media_inline(asset: &Asset) -> String {
    format!("<{} src=\"{}\"/>", asset.html_tag(), asset.data_uri())
}

fn media_reference(asset: &Asset, path: &str) -> String {
    let tag = asset.html_tag();
    match asset.timing() {
        LoadTiming::Default => format!("<{tag} src=\"{path}\" />"),
        LoadTiming::Defer => format!("<{tag} src=\"{path}\" loading='eager' />"),
        LoadTiming::Async => format!("<{tag} src=\"{path}\" loading='lazy' />"),
    }
}

// ============================================================================
// HTML fragment
// ============================================================================

fn html_inline(asset: &Asset) -> String {
    asset.text().into_owned()
}

fn html_reference(_asset: &Asset, path: &str) -> String {
    format!("<include src=\"{path}\"></include>")
}

// ============================================================================
// Font
// ============================================================================

fn font_inline(asset: &Asset) -> String {
    format!(
        "<style>@font-face{{font-family:'{}';src:url({}) format('woff2');}}</style>",
        asset.filename(),
        asset.data_uri()
    )
}

fn font_reference(asset: &Asset, path: &str) -> String {
    format!(
        "<style>@font-face{{font-family:'{}';src:url('{path}') format('woff2');}}</style>",
        asset.filename()
    )
}
