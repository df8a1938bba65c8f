//! The asset entity.
//!
//! An [`Asset`] is constructed once (through [`Registry::create`] or as the
//! child of a style sheet), optionally loaded to resolve children and minify,
//! rendered any number of times, and materialized unless it renders inline.
//!
//! [`Registry::create`]: super::Registry::create

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Result;

use super::children::{self, ChildContext, ChildSource};
use super::download::{AssetContent, Download, Materialize};
use super::minify::{Minifier, minify_content};
use super::policy::{self, RenderMode};
use super::{AssetCategory, DirectoryProvider, InlinePolicy, LoadTiming, Mutability};
use crate::config::ExportConfig;
use crate::logger::WarnSink;
use crate::utils::path::{to_root, to_unix_style, to_web_style};

/// Priority given to assets that do not ask for one.
pub const DEFAULT_LOAD_PRIORITY: u32 = 100;

/// Construction options for an asset.
///
/// Required values are taken by [`AssetSpec::new`]; the rest default to:
///
/// | field        | default                  |
/// |--------------|--------------------------|
/// | `minify`     | `false`                  |
/// | `timing`     | [`LoadTiming::Async`]    |
/// | `priority`   | [`DEFAULT_LOAD_PRIORITY`]|
/// | `online_url` | `None`                   |
#[derive(Debug, Clone)]
pub struct AssetSpec {
    pub filename: String,
    pub content: AssetContent,
    pub category: AssetCategory,
    pub policy: InlinePolicy,
    pub mutability: Mutability,
    /// Minify style/script content during [`Asset::load`].
    pub minify: bool,
    pub timing: LoadTiming,
    /// Ordering hint for callers, lower loads first. Never enforced here.
    pub priority: u32,
    /// Mirror used instead of the local copy when offline resources are off.
    pub online_url: Option<String>,
}

impl AssetSpec {
    pub fn new(
        filename: impl Into<String>,
        content: impl Into<AssetContent>,
        category: AssetCategory,
        policy: InlinePolicy,
        mutability: Mutability,
    ) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
            category,
            policy,
            mutability,
            minify: false,
            timing: LoadTiming::Async,
            priority: DEFAULT_LOAD_PRIORITY,
            online_url: None,
        }
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub fn timing(mut self, timing: LoadTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    pub fn online_url(mut self, url: impl Into<String>) -> Self {
        self.online_url = Some(url.into());
        self
    }
}

/// Shared collaborators for [`Asset::load`].
#[derive(Clone, Copy)]
pub struct LoadContext<'a> {
    pub config: &'a ExportConfig,
    pub dirs: &'a dyn DirectoryProvider,
    pub minifier: &'a dyn Minifier,
    pub sources: &'a dyn ChildSource,
    pub sink: &'a dyn WarnSink,
}

/// One output resource of an export.
#[derive(Debug, Clone)]
pub struct Asset {
    file: Download,
    /// Content as constructed or last set, before child rewriting and minification.
    source: AssetContent,
    category: AssetCategory,
    policy: InlinePolicy,
    mutability: Mutability,
    minify: bool,
    timing: LoadTiming,
    priority: u32,
    online_url: Option<String>,
    children: Vec<Asset>,
    modified: SystemTime,
    config: ExportConfig,
}

impl Asset {
    /// Build an asset. Registration is the caller's job.
    pub(super) fn new(
        spec: AssetSpec,
        dirs: &dyn DirectoryProvider,
        config: &ExportConfig,
        modified: SystemTime,
    ) -> Self {
        let filename = if config.web_style_paths {
            to_web_style(&spec.filename)
        } else {
            spec.filename
        };
        let directory = spec.category.directory(dirs).to_path_buf();

        Self {
            source: spec.content.clone(),
            file: Download::new(filename, directory, spec.content),
            category: spec.category,
            policy: spec.policy,
            mutability: spec.mutability,
            minify: spec.minify,
            timing: spec.timing,
            priority: spec.priority,
            online_url: spec.online_url,
            children: Vec::new(),
            modified,
            config: config.clone(),
        }
    }

    /// Build a child asset, owned by the style sheet that references it.
    pub(super) fn child(
        filename: String,
        content: AssetContent,
        category: AssetCategory,
        policy: InlinePolicy,
        dirs: &dyn DirectoryProvider,
        config: &ExportConfig,
    ) -> Self {
        let spec = AssetSpec::new(filename, content, category, policy, Mutability::Child);
        Self::new(spec, dirs, config, SystemTime::now())
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn filename(&self) -> &str {
        &self.file.filename
    }

    /// Last path segment of the filename.
    pub fn basename(&self) -> &str {
        self.file
            .filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file.filename)
    }

    /// File extension of the filename, empty if there is none.
    pub fn extension(&self) -> &str {
        Path::new(self.basename())
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
    }

    /// Destination directory, relative to the export root.
    pub fn directory(&self) -> &Path {
        &self.file.directory
    }

    /// Location relative to the export root.
    pub fn relative_path(&self) -> PathBuf {
        self.file.relative_path()
    }

    /// Content as it is rendered and written.
    pub fn content(&self) -> &AssetContent {
        &self.file.content
    }

    /// Content before loading rewrote or minified it.
    pub fn source(&self) -> &AssetContent {
        &self.source
    }

    pub fn text(&self) -> Cow<'_, str> {
        self.file.content.to_text()
    }

    pub fn category(&self) -> AssetCategory {
        self.category
    }

    pub fn policy(&self) -> InlinePolicy {
        self.policy
    }

    pub fn mutability(&self) -> Mutability {
        self.mutability
    }

    pub fn minify(&self) -> bool {
        self.minify
    }

    pub fn timing(&self) -> LoadTiming {
        self.timing
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn online_url(&self) -> Option<&str> {
        self.online_url.as_deref()
    }

    pub fn children(&self) -> &[Asset] {
        &self.children
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Configuration in effect at construction or the last load.
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn set_policy(&mut self, policy: InlinePolicy) {
        self.policy = policy;
    }

    pub fn set_timing(&mut self, timing: LoadTiming) {
        self.timing = timing;
    }

    pub fn set_priority(&mut self, priority: u32) {
        self.priority = priority;
    }

    pub fn set_online_url(&mut self, url: Option<String>) {
        self.online_url = url;
    }

    /// Replace the content and bump the modification time.
    pub fn set_content(&mut self, content: impl Into<AssetContent>) {
        let content = content.into();
        self.source = content.clone();
        self.file.content = content;
        self.modified = SystemTime::now();
    }

    // ------------------------------------------------------------------------
    // Mode
    // ------------------------------------------------------------------------

    pub fn render_mode(&self, config: &ExportConfig) -> RenderMode {
        RenderMode::resolve(self.policy, self.category, config)
    }

    pub fn is_inline(&self, config: &ExportConfig) -> bool {
        policy::is_inline(self.policy, self.category, config)
    }

    pub fn is_reference(&self, config: &ExportConfig) -> bool {
        policy::is_reference(self.policy, self.category, config)
    }

    // ------------------------------------------------------------------------
    // Paths
    // ------------------------------------------------------------------------

    /// Path of the materialized file as seen from `anchor`, a directory
    /// relative to the export root. Empty when the asset renders inline.
    pub fn asset_path(&self, anchor: &Path, config: &ExportConfig) -> String {
        if self.is_inline(config) {
            return String::new();
        }
        let path = to_unix_style(&to_root(anchor).join(self.relative_path()));
        if config.web_style_paths {
            to_web_style(&path)
        } else {
            path
        }
    }

    /// Href used by reference markup: the online URL when offline resources
    /// are disabled and one is set, the local path otherwise.
    pub fn href(&self, anchor: &Path, config: &ExportConfig) -> String {
        match &self.online_url {
            Some(url) if !config.offline_resources => url.clone(),
            _ => self.asset_path(anchor, config),
        }
    }

    pub fn data_uri(&self) -> String {
        super::encode::data_uri(self.basename(), self.file.content.as_bytes())
    }

    /// Element used to embed the asset.
    pub fn html_tag(&self) -> &'static str {
        match self.category {
            AssetCategory::Style => "link",
            AssetCategory::Script => "script",
            AssetCategory::Font => "style",
            AssetCategory::HtmlFragment => "include",
            AssetCategory::Media | AssetCategory::Other => crate::utils::mime::media_tag(self.extension()),
        }
    }

    // ------------------------------------------------------------------------
    // Load
    // ------------------------------------------------------------------------

    /// Resolve style sheet children and apply minification.
    ///
    /// Every call starts over from [`Asset::source`], so loading again yields
    /// the same content and children.
    pub fn load(&mut self, ctx: &LoadContext<'_>) {
        self.config = ctx.config.clone();
        self.file.content = self.source.clone();
        self.children.clear();

        if self.category == AssetCategory::Style
            && let AssetContent::Text(css) = &self.source
        {
            let child_ctx = ChildContext {
                parent_dir: &self.file.directory,
                parent_inline: self.is_inline(ctx.config),
                dirs: ctx.dirs,
                sources: ctx.sources,
                config: ctx.config,
            };
            let (rewritten, children) = children::resolve(css, &child_ctx);
            self.children = children;
            self.file.content = AssetContent::Text(rewritten);
        }

        if self.minify
            && let AssetContent::Text(text) = &self.file.content
            && let Some(minified) =
                minify_content(self.category, self.filename(), text, ctx.minifier, ctx.sink)
        {
            self.file.content = AssetContent::Text(minified);
        }
    }
}

impl Materialize for Asset {
    /// Write the asset and its children, skipping anything that renders inline
    /// under the configuration snapshot.
    fn materialize(&self, target: &Path) -> Result<Vec<PathBuf>> {
        if self.is_inline(&self.config) {
            return Ok(Vec::new());
        }
        let mut written = self.file.materialize(target)?;
        for child in &self.children {
            written.extend(child.materialize(target)?);
        }
        Ok(written)
    }
}
