use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "tocmark",
    version,
    about = "Turn a pasted table of contents into PDF bookmarks"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the outline and print it without touching any PDF
    Preview(PreviewArgs),
    /// Build the outline and write it into a copy of a PDF
    Apply(ApplyArgs),
    /// List the built-in level examples
    Levels(LevelsArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OutlineArgs {
    /// Table of contents text file, or `-` for stdin
    #[arg(long)]
    pub toc: PathBuf,

    /// Text encoding label of the TOC file (utf-8, gbk, big5, shift_jis, ...)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Added to every printed page number before conversion to a page index
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i64,

    /// Level assigned to titles no pattern matches
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    pub default_level: u8,

    #[arg(long, conflicts_with = "level0_regex")]
    pub level0: Option<String>,

    #[arg(long, conflicts_with = "level1_regex")]
    pub level1: Option<String>,

    #[arg(long, conflicts_with = "level2_regex")]
    pub level2: Option<String>,

    #[arg(long)]
    pub level0_regex: Option<String>,

    #[arg(long)]
    pub level1_regex: Option<String>,

    #[arg(long)]
    pub level2_regex: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub outline: OutlineArgs,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub outline: OutlineArgs,

    #[arg(long)]
    pub pdf: PathBuf,

    /// Defaults to `<name>_new.pdf` next to the input
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub report_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct LevelsArgs {
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
