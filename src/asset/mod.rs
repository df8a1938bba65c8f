//! Export resources: classification, inline policy, loading and rendering.

mod children;
mod download;
mod encode;
mod entity;
mod kind;
pub mod minify;
mod policy;
mod registry;
mod render;


// Types
pub use download::{AssetContent, Download, Materialize};
pub use entity::{Asset, AssetSpec, DEFAULT_LOAD_PRIORITY, LoadContext};
pub use kind::{AssetCategory, InlinePolicy, LoadTiming, Mutability};
pub use registry::{AssetId, DirectoryProvider, Registry};

// Policy (pure functions)
pub use policy::{RenderMode, is_inline, is_reference};

// Collaborators
pub use children::{ChildSource, FsChildSource, NoChildSource, style_references};
pub use minify::{BuiltinMinifier, Minifier, MinifyError, MinifyOptions, minify_content};

// Encoding
pub use encode::data_uri;
