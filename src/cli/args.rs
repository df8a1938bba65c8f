//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::asset::{AssetCategory, InlinePolicy, LoadTiming};

/// Sitepack resource engine CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: sitepack.toml)
    #[arg(short = 'C', long, global = true, default_value = "sitepack.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Print debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the markup embedding a file into a page
    #[command(visible_alias = "r")]
    Render {
        #[command(flatten)]
        asset: AssetArgs,

        /// Page directory, relative to the export root
        #[arg(short, long, default_value = "", value_hint = clap::ValueHint::DirPath)]
        anchor: PathBuf,
    },

    /// Write a file (and the files it references) to an export directory
    #[command(visible_alias = "m")]
    Materialize {
        #[command(flatten)]
        asset: AssetArgs,

        /// Export root directory
        #[arg(short, long, default_value = "dist", value_hint = clap::ValueHint::DirPath)]
        output: PathBuf,
    },

    /// Look up a MIME type by extension, or an extension by MIME type
    Mime {
        /// Extension (`png`, `.PNG`) or MIME type (`image/png`)
        value: String,
    },

    /// Print the category of an extension
    Classify {
        /// File extension, with or without the leading dot
        extension: String,
    },
}

/// Asset construction arguments shared by Render and Materialize
#[derive(clap::Args, Debug, Clone)]
pub struct AssetArgs {
    /// Source file
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Category override (style, script, media, html, font, other)
    #[arg(long)]
    pub category: Option<AssetCategory>,

    /// Inline policy (inline, inlinehead, download, downloadhead, auto, autohead, none)
    #[arg(short, long, default_value = "auto")]
    pub policy: InlinePolicy,

    /// Load timing (default, async, defer)
    #[arg(short, long, default_value = "async")]
    pub timing: LoadTiming,

    /// Minify style and script content
    #[arg(long)]
    pub minify: bool,

    /// Online mirror used when offline resources are disabled
    #[arg(long)]
    pub online_url: Option<String>,
}
