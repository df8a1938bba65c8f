//! Physical materialization of assets.
//!
//! [`Download`] is the file-backed part of an asset: a filename inside a
//! destination directory plus the bytes to write there. [`Asset`] composes it
//! and decides whether writing happens at all.
//!
//! [`Asset`]: super::Asset

use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Payload of an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetContent {
    Text(String),
    Binary(Vec<u8>),
}

impl AssetContent {
    /// Text when the bytes are valid UTF-8, binary otherwise.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Self::Text(text),
            Err(err) => Self::Binary(err.into_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    /// Text payload, if this is text content.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }

    /// Content as text, replacing invalid UTF-8 in binary payloads.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Binary(bytes) => String::from_utf8_lossy(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<String> for AssetContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AssetContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for AssetContent {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

/// Something that can be written below a target directory.
pub trait Materialize {
    /// Write to disk under `target`, returning the files written.
    ///
    /// An empty list means nothing needed writing.
    fn materialize(&self, target: &Path) -> Result<Vec<PathBuf>>;
}

/// A file destined for `{target}/{directory}/{filename}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub directory: PathBuf,
    pub content: AssetContent,
}

impl Download {
    pub fn new(filename: impl Into<String>, directory: impl Into<PathBuf>, content: AssetContent) -> Self {
        Self {
            filename: filename.into(),
            directory: directory.into(),
            content,
        }
    }

    /// Location relative to the export root.
    pub fn relative_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }
}

impl Materialize for Download {
    fn materialize(&self, target: &Path) -> Result<Vec<PathBuf>> {
        let output = target.join(self.relative_path());
        if let Some(parent) = output.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create `{}`", parent.display()))?;
        }
        fs::write(&output, self.content.as_bytes())
            .with_context(|| format!("failed to write `{}`", output.display()))?;
        Ok(vec![output])
    }
}
