//! Asset registry.
//!
//! Owns every asset created for an export and partitions them by lifecycle:
//!
//! ```text
//! durable    ─┐
//! mutable    ─┼─ exactly one of these per tracked asset
//! ephemeral  ─┘
//! all        ── every tracked asset
//! ```
//!
//! Child assets are never tracked: they live in their parent's child list.

use std::fs;
use std::ops::Index;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{Context, Result};
use rayon::prelude::*;

use super::children::ChildSource;
use super::download::Materialize;
use super::entity::{Asset, AssetSpec, LoadContext};
use super::minify::Minifier;
use super::{AssetCategory, Mutability};
use crate::config::ExportConfig;
use crate::debug;
use crate::logger::WarnSink;

/// Supplies the destination directory of each asset category.
pub trait DirectoryProvider: Send + Sync {
    /// Directory relative to the export root. Never empty.
    fn directory(&self, category: AssetCategory) -> &Path;
}

/// Handle to an asset owned by a [`Registry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetId(usize);

/// Asset storage with lifecycle buckets.
pub struct Registry {
    dirs: Box<dyn DirectoryProvider>,
    /// Timestamp inherited by durable assets.
    build_time: SystemTime,
    assets: Vec<Asset>,
    durable: Vec<AssetId>,
    mutable: Vec<AssetId>,
    ephemeral: Vec<AssetId>,
    all: Vec<AssetId>,
}

impl Registry {
    pub fn new(dirs: impl DirectoryProvider + 'static) -> Self {
        Self {
            dirs: Box::new(dirs),
            build_time: SystemTime::now(),
            assets: Vec::new(),
            durable: Vec::new(),
            mutable: Vec::new(),
            ephemeral: Vec::new(),
            all: Vec::new(),
        }
    }

    /// Set the reference build time given to durable assets.
    pub fn with_build_time(mut self, build_time: SystemTime) -> Self {
        self.build_time = build_time;
        self
    }

    pub fn build_time(&self) -> SystemTime {
        self.build_time
    }

    /// Destination directory of a category.
    pub fn directory(&self, category: AssetCategory) -> &Path {
        self.dirs.directory(category)
    }

    /// Construct and register an asset.
    ///
    /// An asset created with [`Mutability::Child`] has no parent here. It is
    /// stored and reachable through its id, but it is inert: it appears in no
    /// bucket and is neither loaded nor materialized. Children that take part
    /// in an export come from loading their parent style sheet.
    pub fn create(&mut self, spec: AssetSpec, config: &ExportConfig) -> AssetId {
        let mutability = spec.mutability;
        let modified = match mutability {
            Mutability::Durable => self.build_time,
            _ => SystemTime::now(),
        };
        let asset = Asset::new(spec, self.dirs.as_ref(), config, modified);

        let id = AssetId(self.assets.len());
        debug!("registry"; "{} → {:?}", asset.relative_path().display(), mutability);
        self.assets.push(asset);

        match mutability {
            Mutability::Durable => self.durable.push(id),
            Mutability::Mutable => self.mutable.push(id),
            Mutability::Ephemeral => self.ephemeral.push(id),
            Mutability::Child => return id,
        }
        self.all.push(id);
        id
    }

    pub fn get(&self, id: AssetId) -> Option<&Asset> {
        self.assets.get(id.0)
    }

    pub fn get_mut(&mut self, id: AssetId) -> Option<&mut Asset> {
        self.assets.get_mut(id.0)
    }

    /// Number of tracked (non-child) assets.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Ids in the bucket of `mutability`. Empty for [`Mutability::Child`].
    pub fn ids(&self, mutability: Mutability) -> &[AssetId] {
        match mutability {
            Mutability::Durable => &self.durable,
            Mutability::Mutable => &self.mutable,
            Mutability::Ephemeral => &self.ephemeral,
            Mutability::Child => &[],
        }
    }

    pub fn all_ids(&self) -> &[AssetId] {
        &self.all
    }

    fn bucket<'a>(&'a self, ids: &'a [AssetId]) -> impl Iterator<Item = &'a Asset> + 'a {
        ids.iter().map(move |id| &self[*id])
    }

    pub fn durable(&self) -> impl Iterator<Item = &Asset> {
        self.bucket(&self.durable)
    }

    pub fn mutable(&self) -> impl Iterator<Item = &Asset> {
        self.bucket(&self.mutable)
    }

    pub fn ephemeral(&self) -> impl Iterator<Item = &Asset> {
        self.bucket(&self.ephemeral)
    }

    pub fn all(&self) -> impl Iterator<Item = &Asset> {
        self.bucket(&self.all)
    }

    /// Tracked assets ordered by load priority, lower first. Ties keep
    /// creation order.
    pub fn by_priority(&self) -> Vec<&Asset> {
        let mut assets: Vec<&Asset> = self.all().collect();
        assets.sort_by_key(|asset| asset.priority());
        assets
    }

    /// Load every tracked asset in parallel.
    pub fn load_all(
        &mut self,
        config: &ExportConfig,
        minifier: &dyn Minifier,
        sources: &dyn ChildSource,
        sink: &dyn WarnSink,
    ) {
        let ctx = LoadContext {
            config,
            dirs: self.dirs.as_ref(),
            minifier,
            sources,
            sink,
        };
        self.assets
            .par_iter_mut()
            .filter(|asset| asset.mutability() != Mutability::Child)
            .for_each(|asset| asset.load(&ctx));
    }

    /// Write every tracked asset (and its children) below `target`.
    ///
    /// Returns all written files.
    pub fn materialize_all(&self, target: &Path) -> Result<Vec<PathBuf>> {
        let written: Vec<Vec<PathBuf>> = self
            .all
            .par_iter()
            .map(|id| self[*id].materialize(target))
            .collect::<Result<_>>()?;
        Ok(written.into_iter().flatten().collect())
    }

    /// Delete materialized files of ephemeral assets below `target`.
    ///
    /// Returns the number of files removed; files that were never written are
    /// skipped.
    pub fn remove_ephemeral(&self, target: &Path) -> Result<usize> {
        let mut removed = 0;
        for asset in self.ephemeral() {
            for path in files_of(asset, target) {
                if path.exists() {
                    fs::remove_file(&path)
                        .with_context(|| format!("failed to remove `{}`", path.display()))?;
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }
}

/// Output paths an asset and its children would occupy below `target`.
fn files_of(asset: &Asset, target: &Path) -> Vec<PathBuf> {
    let mut files = vec![target.join(asset.relative_path())];
    for child in asset.children() {
        files.extend(files_of(child, target));
    }
    files
}

impl Index<AssetId> for Registry {
    type Output = Asset;

    fn index(&self, id: AssetId) -> &Asset {
        &self.assets[id.0]
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("assets", &self.assets.len())
            .field("durable", &self.durable)
            .field("mutable", &self.mutable)
            .field("ephemeral", &self.ephemeral)
            .finish_non_exhaustive()
    }
}
