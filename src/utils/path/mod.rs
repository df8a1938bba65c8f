//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`relative`]: walking between export-relative locations (`to_root`, `relative_between`)
//! - [`route`]: href helpers (`is_external_link`, `split_path_fragment`, web-style rewriting)

pub mod relative;
pub mod route;

pub use relative::{relative_between, to_root, to_unix_style};
pub use route::{is_external_link, split_path_fragment, to_web_style};
