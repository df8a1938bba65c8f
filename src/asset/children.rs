//! Child assets referenced from style sheets.
//!
//! Style sheets pull in fonts, images and other sheets through `url(...)`.
//! Loading a style asset turns every local reference it can fetch into a
//! child asset and rewrites the reference to point at it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::{Captures, Regex};
use rustc_hash::{FxHashMap, FxHashSet};

use super::{Asset, AssetCategory, AssetContent, DirectoryProvider, InlinePolicy};
use crate::config::ExportConfig;
use crate::debug;
use crate::utils::mime;
use crate::utils::path::{
    is_external_link, relative_between, split_path_fragment, to_unix_style, to_web_style,
};

/// Provides the bytes behind a style sheet reference.
pub trait ChildSource: Send + Sync {
    /// Fetch the file named by `reference`, `None` if it cannot be found.
    fn fetch(&self, reference: &str) -> Option<Vec<u8>>;
}

/// Resolves nothing: style sheets keep their references untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoChildSource;

impl ChildSource for NoChildSource {
    fn fetch(&self, _reference: &str) -> Option<Vec<u8>> {
        None
    }
}

/// Reads references relative to a base directory on disk.
#[derive(Debug, Clone)]
pub struct FsChildSource {
    base: PathBuf,
}

impl FsChildSource {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

impl ChildSource for FsChildSource {
    fn fetch(&self, reference: &str) -> Option<Vec<u8>> {
        let reference = reference.trim_start_matches('/');
        fs::read(self.base.join(reference)).ok()
    }
}

/// Matches `url(x)`, `url('x')` and `url("x")`.
static URL_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)url\(\s*(?:"([^"]*)"|'([^']*)'|([^'")\s]+))\s*\)"#).unwrap()
});

fn reference_of<'a>(caps: &Captures<'a>) -> Option<&'a str> {
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
}

/// Local file references in a style sheet, in order of appearance.
pub fn style_references(css: &str) -> Vec<&str> {
    URL_REFERENCE
        .captures_iter(css)
        .filter_map(|caps| reference_of(&caps))
        .filter(|reference| is_local(reference))
        .collect()
}

fn is_local(reference: &str) -> bool {
    !reference.is_empty() && !reference.starts_with('#') && !is_external_link(reference)
}

/// Everything needed to build children of one parent.
pub(super) struct ChildContext<'a> {
    pub parent_dir: &'a Path,
    pub parent_inline: bool,
    pub dirs: &'a dyn DirectoryProvider,
    pub sources: &'a dyn ChildSource,
    pub config: &'a ExportConfig,
}

/// Resolve children of a style sheet.
///
/// Returns the rewritten style sheet and the child assets, one per distinct
/// fetched file. Children sharing a file name are renamed `{stem}-{n}.{ext}`.
pub(super) fn resolve(css: &str, ctx: &ChildContext<'_>) -> (String, Vec<Asset>) {
    let mut children: Vec<Asset> = Vec::new();
    let mut replacements: FxHashMap<String, Option<String>> = FxHashMap::default();
    let mut names: FxHashSet<String> = FxHashSet::default();

    let rewritten = URL_REFERENCE.replace_all(css, |caps: &Captures<'_>| {
        let original = caps[0].to_string();
        let Some(reference) = reference_of(caps).filter(|r| is_local(r)) else {
            return original;
        };
        let (path, suffix) = split_path_fragment(reference);

        let target = replacements
            .entry(path.to_string())
            .or_insert_with(|| {
                let child = make_child(path, &mut names, ctx)?;
                let target = child_target(&child, ctx);
                children.push(child);
                Some(target)
            })
            .clone();

        match target {
            Some(target) => format!("url(\"{target}{suffix}\")"),
            None => {
                debug!("children"; "unresolved style reference `{}`", reference);
                original
            }
        }
    });

    (rewritten.into_owned(), children)
}

fn make_child(
    reference: &str,
    names: &mut FxHashSet<String>,
    ctx: &ChildContext<'_>,
) -> Option<Asset> {
    let bytes = ctx.sources.fetch(reference)?;
    let basename = Path::new(reference).file_name()?.to_str()?;
    let filename = unique_name(basename, names, ctx.config);
    let category = AssetCategory::from_path(Path::new(&filename));
    let content = if category.is_text() || mime::is_text(mime::from_path(Path::new(&filename))) {
        AssetContent::from_bytes(bytes)
    } else {
        AssetContent::Binary(bytes)
    };
    let policy = if ctx.parent_inline {
        InlinePolicy::Inline
    } else {
        InlinePolicy::Download
    };

    Some(Asset::child(filename, content, category, policy, ctx.dirs, ctx.config))
}

/// First of `name`, `{stem}-1.{ext}`, `{stem}-2.{ext}`, ... not yet taken by a
/// sibling. Names are compared as they will be written.
fn unique_name(name: &str, names: &mut FxHashSet<String>, config: &ExportConfig) -> String {
    let written = |candidate: &str| {
        if config.web_style_paths {
            to_web_style(candidate)
        } else {
            candidate.to_string()
        }
    };
    if names.insert(written(name)) {
        return name.to_string();
    }

    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{ext}")),
        _ => (name, String::new()),
    };
    let mut n = 1;
    loop {
        let candidate = format!("{stem}-{n}{ext}");
        if names.insert(written(&candidate)) {
            return candidate;
        }
        n += 1;
    }
}

/// What the parent's reference is rewritten to.
fn child_target(child: &Asset, ctx: &ChildContext<'_>) -> String {
    if ctx.parent_inline {
        return child.data_uri();
    }
    let path = to_unix_style(&relative_between(ctx.parent_dir, &child.relative_path()));
    if ctx.config.web_style_paths {
        to_web_style(&path)
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::Mutability;
    use crate::config::DirsConfig;
    use tempfile::TempDir;

    /// In-memory child source.
    struct Files(Vec<(&'static str, &'static [u8])>);

    impl ChildSource for Files {
        fn fetch(&self, reference: &str) -> Option<Vec<u8>> {
            self.0
                .iter()
                .find(|(name, _)| *name == reference)
                .map(|(_, bytes)| bytes.to_vec())
        }
    }

    fn context<'a>(
        inline: bool,
        dirs: &'a DirsConfig,
        sources: &'a dyn ChildSource,
        config: &'a ExportConfig,
    ) -> ChildContext<'a> {
        ChildContext {
            parent_dir: Path::new("lib/styles"),
            parent_inline: inline,
            dirs,
            sources,
            config,
        }
    }

    #[test]
    fn test_style_references() {
        let css = r#"
            @font-face { src: url("fonts/a.woff2") format("woff2"), url('b.ttf'); }
            .x { background: url(img/bg.png); }
            .y { background: url(data:image/png;base64,AAAA); }
            .z { background: url(https://cdn.example.com/x.png); }
            .w { filter: url(#blur); }
        "#;
        assert_eq!(style_references(css), vec!["fonts/a.woff2", "b.ttf", "img/bg.png"]);
    }

    #[test]
    fn test_resolve_download_children() {
        let dirs = DirsConfig::default();
        let config = ExportConfig::default();
        let sources = Files(vec![("fonts/Inter.woff2", &b"wOF2"[..]), ("img/bg.png", &b"\x89PNG"[..])]);
        let css = "a{src:url(fonts/Inter.woff2)}b{background:url('img/bg.png?v=2')}c{src:url(fonts/Inter.woff2)}";

        let (rewritten, children) = resolve(css, &context(false, &dirs, &sources, &config));

        assert_eq!(
            rewritten,
            "a{src:url(\"../fonts/Inter.woff2\")}b{background:url(\"../media/bg.png?v=2\")}c{src:url(\"../fonts/Inter.woff2\")}"
        );
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].category(), AssetCategory::Font);
        assert_eq!(children[0].policy(), InlinePolicy::Download);
        assert_eq!(children[1].category(), AssetCategory::Media);
        assert!(children.iter().all(|c| c.mutability() == Mutability::Child));
    }

    #[test]
    fn test_resolve_renames_same_basename() {
        let dirs = DirsConfig::default();
        let config = ExportConfig::default();
        let sources = Files(vec![("a/icon.woff2", &b"A"[..]), ("b/icon.woff2", &b"B"[..])]);
        let css = "x{src:url(a/icon.woff2)}y{src:url(b/icon.woff2)}";

        let (rewritten, children) = resolve(css, &context(false, &dirs, &sources, &config));

        assert_eq!(
            rewritten,
            "x{src:url(\"../fonts/icon.woff2\")}y{src:url(\"../fonts/icon-1.woff2\")}"
        );
        let names: Vec<_> = children.iter().map(Asset::filename).collect();
        assert_eq!(names, vec!["icon.woff2", "icon-1.woff2"]);
        assert_eq!(children[1].content().as_bytes(), b"B");
    }

    #[test]
    fn test_unique_name() {
        let config = ExportConfig::default();
        let mut names = FxHashSet::default();
        assert_eq!(unique_name("bg.png", &mut names, &config), "bg.png");
        assert_eq!(unique_name("bg.png", &mut names, &config), "bg-1.png");
        assert_eq!(unique_name("bg.png", &mut names, &config), "bg-2.png");
        assert_eq!(unique_name("LICENSE", &mut names, &config), "LICENSE");
        assert_eq!(unique_name("LICENSE", &mut names, &config), "LICENSE-1");

        let web = ExportConfig {
            web_style_paths: true,
            ..ExportConfig::default()
        };
        let mut names = FxHashSet::default();
        assert_eq!(unique_name("Icon.svg", &mut names, &web), "Icon.svg");
        assert_eq!(unique_name("icon.svg", &mut names, &web), "icon-1.svg");
    }

    #[test]
    fn test_child_text_content_by_mime() {
        let dirs = DirsConfig::default();
        let config = ExportConfig::default();
        let sources = Files(vec![("notes.txt", &b"plain"[..])]);

        let (_, children) = resolve("x{a:url(notes.txt)}", &context(false, &dirs, &sources, &config));

        assert_eq!(children[0].category(), AssetCategory::Other);
        assert_eq!(children[0].content(), &AssetContent::Text("plain".into()));
    }

    #[test]
    fn test_resolve_inline_children() {
        let dirs = DirsConfig::default();
        let config = ExportConfig::default();
        let sources = Files(vec![("a.woff2", &b"abc"[..])]);

        let (rewritten, children) =
            resolve("x{src:url(a.woff2)}", &context(true, &dirs, &sources, &config));

        assert_eq!(rewritten, "x{src:url(\"data:application/font-woff2;base64,YWJj\")}");
        assert_eq!(children[0].policy(), InlinePolicy::Inline);
    }

    #[test]
    fn test_resolve_keeps_unfetchable() {
        let dirs = DirsConfig::default();
        let config = ExportConfig::default();
        let css = "x{src:url( 'missing.woff2' )}";

        let (rewritten, children) =
            resolve(css, &context(false, &dirs, &NoChildSource, &config));

        assert_eq!(rewritten, css);
        assert!(children.is_empty());
    }

    #[test]
    fn test_fs_child_source() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("fonts")).unwrap();
        fs::write(dir.path().join("fonts/a.ttf"), b"ttf").unwrap();

        let source = FsChildSource::new(dir.path());
        assert_eq!(source.fetch("fonts/a.ttf"), Some(b"ttf".to_vec()));
        assert_eq!(source.fetch("/fonts/a.ttf"), Some(b"ttf".to_vec()));
        assert_eq!(source.fetch("fonts/missing.ttf"), None);
    }
}
