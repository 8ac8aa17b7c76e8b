//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::hierarchy::DEFAULT_MAX_DEPTH;
use output::OutputFormat;

/// notedown - export a Notion workspace to a local Markdown tree
#[derive(Parser, Debug)]
#[command(name = "notedown", version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export pages to a local Markdown tree
    Export(ExportArgs),

    /// Print the discovered page hierarchy without exporting
    Tree(TreeArgs),

    /// Verify configuration and API connectivity
    Check(CheckArgs),

    /// Add YAML front matter to an already-exported directory
    Frontmatter(FrontmatterArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Output directory (default: notion/)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Specific page ID to export (all accessible pages if omitted)
    #[arg(short = 'p', long)]
    pub page_id: Option<String>,

    /// Preview what would be exported without creating files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Export databases as Markdown tables
    #[arg(long)]
    pub include_databases: bool,

    /// Maximum page-tree depth to traverse
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Output format for the statistics summary
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tree` command
#[derive(Parser, Debug)]
pub struct TreeArgs {
    /// Specific page ID to start from (all accessible pages if omitted)
    #[arg(short = 'p', long)]
    pub page_id: Option<String>,

    /// Maximum page-tree depth to traverse
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `check` command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `frontmatter` command
#[derive(Parser, Debug)]
pub struct FrontmatterArgs {
    /// Directory containing exported Markdown files (default: the
    /// configured output directory)
    pub directory: Option<PathBuf>,

    /// Show what would be done without modifying files
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
