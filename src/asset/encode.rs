//! Data URI encoding.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::utils::mime;

/// Encode `content` as `data:{mime};base64,{payload}`.
///
/// The MIME type comes from the extension of `filename`; files without a
/// known extension are `application/octet-stream`.
pub fn data_uri(filename: &str, content: &[u8]) -> String {
    let mime_type = mime::from_path(Path::new(filename));
    format!("data:{mime_type};base64,{}", STANDARD.encode(content))
}
