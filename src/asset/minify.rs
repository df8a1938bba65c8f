//! Asset minification for JS and CSS content.
//!
//! Minification is best-effort. The [`Minifier`] service works on markup
//! fragments: content is wrapped in a `<style>` or `<script>` container,
//! minified with category-specific options, then unwrapped again. Any failure
//! logs a warning and falls back to stripping line breaks.
//!
//! [`BuiltinMinifier`] uses oxc for JavaScript and lightningcss for CSS.

use std::sync::LazyLock;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{CompressOptions, Minifier as OxcMinifier, MinifierOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use regex::Regex;
use thiserror::Error;

use super::AssetCategory;
use crate::debug;
use crate::logger::WarnSink;

/// Minification failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MinifyError {
    #[error("invalid CSS: {0}")]
    Css(String),

    #[error("invalid JavaScript: {0}")]
    Script(String),

    #[error("minifier output lost its `<{0}>` wrapper")]
    MissingWrapper(&'static str),
}

/// Options passed to a [`Minifier`] for one fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyOptions {
    pub minify_css: bool,
    pub minify_js: bool,
    pub remove_comments: bool,
    pub collapse_whitespace: bool,
}

impl MinifyOptions {
    /// Options for a category, `None` for categories that are never minified.
    pub fn for_category(category: AssetCategory) -> Option<Self> {
        let (minify_css, minify_js) = match category {
            AssetCategory::Style => (true, false),
            AssetCategory::Script => (false, true),
            _ => return None,
        };
        Some(Self {
            minify_css,
            minify_js,
            remove_comments: true,
            collapse_whitespace: true,
        })
    }
}

/// Markup fragment minifier.
pub trait Minifier: Send + Sync {
    /// Minify a markup fragment, including embedded `<style>`/`<script>` blocks
    /// as selected by `options`.
    fn minify(&self, fragment: &str, options: &MinifyOptions) -> Result<String, MinifyError>;
}

// ============================================================================
// Adapter
// ============================================================================

/// Container tag used to present a category's content as markup.
fn wrapper_tag(category: AssetCategory) -> Option<&'static str> {
    match category {
        AssetCategory::Style => Some("style"),
        AssetCategory::Script => Some("script"),
        _ => None,
    }
}

/// Minify style or script content.
///
/// Returns `None` when the category is never minified (HTML fragments,
/// media, fonts). On failure a single warning is sent to `sink` and the
/// content comes back with line breaks removed.
pub fn minify_content(
    category: AssetCategory,
    filename: &str,
    content: &str,
    minifier: &dyn Minifier,
    sink: &dyn WarnSink,
) -> Option<String> {
    let tag = wrapper_tag(category)?;
    let options = MinifyOptions::for_category(category)?;

    let wrapped = format!("<{tag}>{content}</{tag}>");
    let result = minifier
        .minify(&wrapped, &options)
        .and_then(|out| unwrap_tag(&out, tag).map(str::to_string));

    match result {
        Ok(minified) => {
            debug!("minify"; "{}: {} → {} bytes", filename, content.len(), minified.len());
            Some(minified)
        }
        Err(err) => {
            let label = if category == AssetCategory::Script { "JS" } else { "CSS" };
            sink.warn(&format!("Unable to minify {label} file `{filename}`: {err}"));
            Some(strip_line_breaks(content))
        }
    }
}

/// Remove the container tag added around content before minification.
fn unwrap_tag<'a>(markup: &'a str, tag: &'static str) -> Result<&'a str, MinifyError> {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    markup
        .trim()
        .strip_prefix(open.as_str())
        .and_then(|rest| rest.strip_suffix(close.as_str()))
        .ok_or(MinifyError::MissingWrapper(tag))
}

/// Fallback transform: delete every `\n` and `\r`.
pub fn strip_line_breaks(content: &str) -> String {
    content.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

// ============================================================================
// Builtin Minifier
// ============================================================================

static BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<(style|script)>(.*?)</(?:style|script)>").unwrap());
static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Fragment minifier backed by lightningcss and oxc.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinMinifier;

impl Minifier for BuiltinMinifier {
    fn minify(&self, fragment: &str, options: &MinifyOptions) -> Result<String, MinifyError> {
        let mut out = String::with_capacity(fragment.len());
        let mut last = 0;

        for caps in BLOCK.captures_iter(fragment) {
            let (Some(whole), Some(tag), Some(body)) = (caps.get(0), caps.get(1), caps.get(2))
            else {
                continue;
            };
            out.push_str(&minify_markup(&fragment[last..whole.start()], options));

            let tag = tag.as_str();
            let body = match tag {
                "style" if options.minify_css => minify_css(body.as_str())?,
                "script" if options.minify_js => minify_js(body.as_str())?,
                _ => body.as_str().to_string(),
            };
            out.push_str(&format!("<{tag}>{body}</{tag}>"));
            last = whole.end();
        }
        out.push_str(&minify_markup(&fragment[last..], options));

        Ok(out)
    }
}

/// Apply comment and whitespace options to markup outside style/script blocks.
fn minify_markup(markup: &str, options: &MinifyOptions) -> String {
    let mut markup = markup.to_string();
    if options.remove_comments {
        markup = COMMENT.replace_all(&markup, "").into_owned();
    }
    if options.collapse_whitespace {
        markup = WHITESPACE.replace_all(markup.trim(), " ").into_owned();
    }
    markup
}

/// Minify JavaScript source code.
///
/// Sources are parsed as classic scripts, so top-level names stay global.
pub fn minify_js(source: &str) -> Result<String, MinifyError> {
    let allocator = Allocator::default();
    let source_type = SourceType::script();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if let Some(error) = ret.errors.first() {
        return Err(MinifyError::Script(error.to_string()));
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::smallest()),
    };
    let ret = OxcMinifier::new(options).minify(&allocator, &mut program);
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;
    Ok(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, MinifyError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|err| MinifyError::Css(err.to_string()))?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|err| MinifyError::Css(err.to_string()))?;
    Ok(result.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::RecordingSink;

    /// Minifier that always fails.
    struct Broken;

    impl Minifier for Broken {
        fn minify(&self, _: &str, _: &MinifyOptions) -> Result<String, MinifyError> {
            Err(MinifyError::Css("unexpected token".into()))
        }
    }

    /// Minifier that drops its input's wrapper.
    struct Unwrapping;

    impl Minifier for Unwrapping {
        fn minify(&self, fragment: &str, _: &MinifyOptions) -> Result<String, MinifyError> {
            Ok(fragment.replace("<style>", "").replace("</style>", ""))
        }
    }

    #[test]
    fn test_options_for_category() {
        let style = MinifyOptions::for_category(AssetCategory::Style).unwrap();
        assert!(style.minify_css && !style.minify_js);
        let script = MinifyOptions::for_category(AssetCategory::Script).unwrap();
        assert!(script.minify_js && !script.minify_css);
        assert!(MinifyOptions::for_category(AssetCategory::HtmlFragment).is_none());
        assert!(MinifyOptions::for_category(AssetCategory::Media).is_none());
    }

    #[test]
    fn test_minify_css() {
        let out = minify_css("body {\n  color: red;\n}\n").unwrap();
        assert_eq!(out, "body{color:red}");
    }

    #[test]
    fn test_minify_js() {
        let out = minify_js("function add(first, second) {\n  return first + second;\n}\n").unwrap();
        assert!(out.contains("function add"));
        assert!(out.trim_end().len() < 40);
    }

    #[test]
    fn test_minify_js_keeps_globals() {
        let source = "function toggleTheme() {\n  document.body.classList.toggle('dark');\n}\nvar counter = 0;\n";
        let out = minify_js(source).unwrap();
        assert!(out.contains("toggleTheme"), "{out}");
        assert!(out.contains("counter"), "{out}");
    }

    #[test]
    fn test_minify_js_invalid() {
        assert!(matches!(minify_js("function ("), Err(MinifyError::Script(_))));
    }

    #[test]
    fn test_builtin_keeps_wrapper() {
        let options = MinifyOptions::for_category(AssetCategory::Style).unwrap();
        let out = BuiltinMinifier
            .minify("<style>\na {\n  color: red;\n}\n</style>", &options)
            .unwrap();
        assert_eq!(out, "<style>a{color:red}</style>");
    }

    #[test]
    fn test_builtin_respects_options() {
        let css_only = MinifyOptions::for_category(AssetCategory::Style).unwrap();
        let out = BuiltinMinifier
            .minify("<script>let  x = 1;</script>", &css_only)
            .unwrap();
        assert_eq!(out, "<script>let  x = 1;</script>");
    }

    #[test]
    fn test_minify_content_style() {
        let sink = RecordingSink::new();
        let out = minify_content(
            AssetCategory::Style,
            "main.css",
            "p {\n  color: red;\n}\n",
            &BuiltinMinifier,
            &sink,
        );
        assert_eq!(out.as_deref(), Some("p{color:red}"));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_minify_content_skips_html() {
        let sink = RecordingSink::new();
        let html = "<div>\n  <p>kept</p>\n</div>";
        let out = minify_content(AssetCategory::HtmlFragment, "x.html", html, &Broken, &sink);
        assert!(out.is_none());
        assert!(sink.is_empty());
    }

    #[test]
    fn test_minify_content_failure_falls_back() {
        let sink = RecordingSink::new();
        let out = minify_content(
            AssetCategory::Script,
            "app.js",
            "let a = 1;\r\nlet b = 2;\n\n",
            &Broken,
            &sink,
        )
        .unwrap();

        assert_eq!(out, "let a = 1;let b = 2;");
        assert!(!out.contains(['\n', '\r']));
        assert_eq!(sink.len(), 1);
        assert!(sink.messages()[0].contains("JS"));
    }

    #[test]
    fn test_minify_content_missing_wrapper_falls_back() {
        let sink = RecordingSink::new();
        let out = minify_content(AssetCategory::Style, "a.css", "a{}\n", &Unwrapping, &sink);
        assert_eq!(out.as_deref(), Some("a{}"));
        assert_eq!(sink.len(), 1);
        assert!(sink.messages()[0].contains("CSS"));
    }

    #[test]
    fn test_strip_line_breaks() {
        assert_eq!(strip_line_breaks("a\n\r\nb\rc"), "abc");
        assert_eq!(strip_line_breaks(""), "");
    }
}
