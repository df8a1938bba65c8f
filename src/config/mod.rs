//! Export configuration snapshot.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── dirs       # [dirs] destination directory per asset category
//! ├── error      # ConfigError
//! └── mod.rs     # ExportConfig (this file)
//! ```
//!
//! # Keys
//!
//! | Key                 | Default | Purpose                                      |
//! |---------------------|---------|----------------------------------------------|
//! | `inline_style`      | false   | Auto policy inlines style sheets             |
//! | `inline_script`     | false   | Auto policy inlines scripts                  |
//! | `inline_media`      | false   | Auto policy inlines images, video, audio     |
//! | `inline_html`       | false   | Auto policy inlines HTML fragments           |
//! | `inline_font`       | false   | Auto policy inlines fonts                    |
//! | `offline_resources` | true    | false: reference the online mirror when set  |
//! | `web_style_paths`   | false   | rewrite filenames and hrefs to web style     |
//!
//! Unknown keys are ignored with a warning.

mod dirs;
mod error;

pub use dirs::DirsConfig;
pub use error::ConfigError;

use std::{fs, path::Path};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::asset::AssetCategory;
use crate::log;

/// Immutable configuration snapshot consumed by the asset engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Auto-policy style sheets are inlined.
    pub inline_style: bool,
    /// Auto-policy scripts are inlined.
    pub inline_script: bool,
    /// Auto-policy media is inlined as data URIs.
    pub inline_media: bool,
    /// Auto-policy HTML fragments are inlined verbatim.
    pub inline_html: bool,
    /// Auto-policy fonts are inlined as data URIs.
    pub inline_font: bool,
    /// When false, reference markup points at an asset's online URL if it has one.
    pub offline_resources: bool,
    /// Rewrite filenames and hrefs to lowercase, dash-separated, forward-slash form.
    pub web_style_paths: bool,
    /// Destination directories.
    pub dirs: DirsConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            inline_style: false,
            inline_script: false,
            inline_media: false,
            inline_html: false,
            inline_font: false,
            offline_resources: true,
            web_style_paths: false,
            dirs: DirsConfig::default(),
        }
    }
}

impl ExportConfig {
    /// Per-category inline preference consulted by the Auto policies.
    ///
    /// [`AssetCategory::Other`] has no flag and never prefers inline.
    pub fn prefers_inline(&self, category: AssetCategory) -> bool {
        match category {
            AssetCategory::Style => self.inline_style,
            AssetCategory::Script => self.inline_script,
            AssetCategory::Media => self.inline_media,
            AssetCategory::HtmlFragment => self.inline_html,
            AssetCategory::Font => self.inline_font,
            AssetCategory::Other => false,
        }
    }

    /// Configuration with every inline flag set to `inline`.
    pub fn with_inline_all(mut self, inline: bool) -> Self {
        self.inline_style = inline;
        self.inline_script = inline;
        self.inline_media = inline;
        self.inline_html = inline;
        self.inline_font = inline;
        self
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, warning about unknown fields.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "ignoring unknown fields in {}: {}", display_path, fields.join(", "));
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dirs.validate()
    }
}
