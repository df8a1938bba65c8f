//! `[dirs]` section configuration.
//!
//! Destination directory for each asset category, relative to the export root.
//!
//! # Example
//!
//! ```toml
//! [dirs]
//! library = "lib"
//! styles = "lib/styles"
//! scripts = "lib/scripts"
//! media = "lib/media"
//! html = "lib/html"
//! fonts = "lib/fonts"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::asset::{AssetCategory, DirectoryProvider};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirsConfig {
    /// Catch-all directory, used for [`AssetCategory::Other`].
    pub library: PathBuf,
    pub styles: PathBuf,
    pub scripts: PathBuf,
    pub media: PathBuf,
    pub html: PathBuf,
    pub fonts: PathBuf,
}

impl Default for DirsConfig {
    fn default() -> Self {
        Self {
            library: "lib".into(),
            styles: "lib/styles".into(),
            scripts: "lib/scripts".into(),
            media: "lib/media".into(),
            html: "lib/html".into(),
            fonts: "lib/fonts".into(),
        }
    }
}

impl DirsConfig {
    fn entries(&self) -> [(&'static str, &Path); 6] {
        [
            ("dirs.library", &self.library),
            ("dirs.styles", &self.styles),
            ("dirs.scripts", &self.scripts),
            ("dirs.media", &self.media),
            ("dirs.html", &self.html),
            ("dirs.fonts", &self.fonts),
        ]
    }

    /// Every directory must be non-empty and relative to the export root.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, dir) in self.entries() {
            if dir.as_os_str().is_empty() {
                return Err(ConfigError::validation(field, "directory must not be empty"));
            }
            if dir.has_root() {
                return Err(ConfigError::validation(
                    field,
                    format!("`{}` must be relative to the export root", dir.display()),
                ));
            }
        }
        Ok(())
    }
}

impl DirectoryProvider for DirsConfig {
    fn directory(&self, category: AssetCategory) -> &Path {
        match category {
            AssetCategory::Style => &self.styles,
            AssetCategory::Script => &self.scripts,
            AssetCategory::Media => &self.media,
            AssetCategory::HtmlFragment => &self.html,
            AssetCategory::Font => &self.fonts,
            AssetCategory::Other => &self.library,
        }
    }
}
