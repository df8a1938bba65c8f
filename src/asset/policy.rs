//! Render mode resolution.
//!
//! [`is_inline`] and [`is_reference`] are the only place the inline/reference
//! decision is made. Rendering, path computation and materialization all go
//! through [`RenderMode::resolve`].

use super::{AssetCategory, InlinePolicy};
use crate::config::ExportConfig;

/// How an asset appears in generated markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Content embedded into the page.
    Inline,
    /// Separate file, linked by path or URL.
    Reference,
    /// No markup at all.
    Suppressed,
}

/// Decision rule of a policy before configuration is consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Inline,
    Reference,
    Configured,
    Suppressed,
}

const fn rule(policy: InlinePolicy) -> Rule {
    match policy {
        InlinePolicy::Inline | InlinePolicy::InlineHead => Rule::Inline,
        InlinePolicy::Download | InlinePolicy::DownloadHead => Rule::Reference,
        InlinePolicy::Auto | InlinePolicy::AutoHead => Rule::Configured,
        InlinePolicy::None => Rule::Suppressed,
    }
}

/// Whether an asset is embedded into the page.
pub fn is_inline(policy: InlinePolicy, category: AssetCategory, config: &ExportConfig) -> bool {
    match rule(policy) {
        Rule::Inline => true,
        Rule::Configured => config.prefers_inline(category),
        Rule::Reference | Rule::Suppressed => false,
    }
}

/// Whether an asset is written to its own file and linked.
pub fn is_reference(policy: InlinePolicy, category: AssetCategory, config: &ExportConfig) -> bool {
    match rule(policy) {
        Rule::Reference => true,
        Rule::Configured => !config.prefers_inline(category),
        Rule::Inline | Rule::Suppressed => false,
    }
}

impl RenderMode {
    /// Select the mode; inline wins over reference, suppressed otherwise.
    pub fn resolve(policy: InlinePolicy, category: AssetCategory, config: &ExportConfig) -> Self {
        let inline = is_inline(policy, category, config);
        let reference = is_reference(policy, category, config);

        debug_assert!(
            !(inline && reference),
            "{policy} {category}: inline and reference both hold"
        );
        debug_assert_eq!(
            policy == InlinePolicy::None,
            !inline && !reference,
            "{policy} {category}: suppression must coincide with the `none` policy"
        );

        if inline {
            Self::Inline
        } else if reference {
            Self::Reference
        } else {
            Self::Suppressed
        }
    }
}
