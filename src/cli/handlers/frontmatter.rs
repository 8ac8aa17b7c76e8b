//! Handler for the `frontmatter` command.

use anyhow::{Result, bail};

use crate::api::NotionClient;
use crate::cli::FrontmatterArgs;
use crate::cli::config::Config;
use crate::export::add_front_matter;
use crate::hierarchy::{DEFAULT_MAX_DEPTH, build_hierarchy};

/// Handle the `frontmatter` command: map the live hierarchy onto an
/// already-exported directory and prepend front matter.
pub fn handle_frontmatter(args: &FrontmatterArgs, config: &Config, verbose: bool) -> Result<()> {
    let directory = config.output_dir(args.directory.as_ref());
    if !directory.exists() {
        bail!("directory not found: {}", directory.display());
    }

    let token = config.token()?;
    let client = NotionClient::new(token);

    println!("building page hierarchy...");
    let discovery = build_hierarchy(&client, None, DEFAULT_MAX_DEPTH);
    for warning in &discovery.warnings {
        eprintln!("warning: {warning}");
    }
    if discovery.roots.is_empty() {
        println!("no pages found");
        return Ok(());
    }

    let stats = add_front_matter(
        &client,
        &discovery.roots,
        &directory,
        args.dry_run,
        verbose,
    )?;

    println!();
    println!("front matter pass complete");
    println!("  files found:       {}", stats.files_found);
    println!("  files updated:     {}", stats.files_updated);
    println!("  files skipped:     {}", stats.files_skipped);
    println!("  files not matched: {}", stats.files_not_matched);

    Ok(())
}
