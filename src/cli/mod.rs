//! Command-line interface module.

mod args;

pub use args::{AssetArgs, Cli, Commands};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::asset::{
    AssetCategory, AssetContent, AssetId, AssetSpec, BuiltinMinifier, FsChildSource, Mutability,
    Registry,
};
use crate::config::ExportConfig;
use crate::logger::TerminalSink;
use crate::utils::mime;
use crate::{debug, log};

/// Execute a parsed command line.
pub fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Render { asset, anchor } => {
            let config = load_config(&cli.config)?;
            let (registry, id) = load_asset(asset, &config)?;
            println!("{}", registry[id].render(&config, anchor));
            Ok(())
        }
        Commands::Materialize { asset, output } => {
            let config = load_config(&cli.config)?;
            let (registry, _) = load_asset(asset, &config)?;
            let written = registry.materialize_all(output)?;
            if written.is_empty() {
                log!("export"; "nothing to write, `{}` renders inline", asset.file.display());
            }
            for path in written {
                log!("export"; "{}", path.display());
            }
            Ok(())
        }
        Commands::Mime { value } => {
            if value.contains('/') {
                println!("{}", mime::to_extension(value));
            } else {
                println!("{}", mime::from_extension(value));
            }
            Ok(())
        }
        Commands::Classify { extension } => {
            let ext = mime::normalize_extension(extension);
            println!("{}", AssetCategory::from_extension(&ext));
            Ok(())
        }
    }
}

/// Read the config file, falling back to defaults when it does not exist.
fn load_config(path: &Path) -> Result<ExportConfig> {
    if path.exists() {
        ExportConfig::from_path(path)
    } else {
        debug!("config"; "`{}` not found, using defaults", path.display());
        Ok(ExportConfig::default())
    }
}

/// Register and load the asset described by the arguments.
fn load_asset(args: &AssetArgs, config: &ExportConfig) -> Result<(Registry, AssetId)> {
    let bytes = fs::read(&args.file)
        .with_context(|| format!("failed to read `{}`", args.file.display()))?;
    let filename = args
        .file
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("`{}` has no file name", args.file.display()))?;
    let category = args
        .category
        .unwrap_or_else(|| AssetCategory::from_path(&args.file));
    let content = if category.is_text() {
        AssetContent::from_bytes(bytes)
    } else {
        AssetContent::Binary(bytes)
    };

    let mut spec = AssetSpec::new(filename, content, category, args.policy, Mutability::Mutable)
        .minify(args.minify)
        .timing(args.timing);
    if let Some(url) = &args.online_url {
        spec = spec.online_url(url.as_str());
    }

    let mut registry = Registry::new(config.dirs.clone());
    let id = registry.create(spec, config);

    let base = args.file.parent().unwrap_or(Path::new("."));
    registry.load_all(config, &BuiltinMinifier, &FsChildSource::new(base), &TerminalSink);

    Ok((registry, id))
}
