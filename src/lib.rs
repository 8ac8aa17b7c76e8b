//! notedown - export a Notion workspace to a local Markdown tree

pub mod api;
pub mod cli;
pub mod convert;
pub mod domain;
pub mod export;
pub mod hierarchy;
pub mod infra;

use anyhow::Result;
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_check, handle_completions, handle_export, handle_frontmatter, handle_tree,
    },
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;
    let verbose = cli.verbose > 0;

    match &cli.command {
        Command::Export(args) => handle_export(args, &config, verbose),
        Command::Tree(args) => handle_tree(args, &config),
        Command::Check(args) => handle_check(args, &config),
        Command::Frontmatter(args) => handle_frontmatter(args, &config, verbose),
        Command::Completions(args) => handle_completions(args),
    }
}
