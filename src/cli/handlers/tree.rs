//! Handler for the `tree` command.

use anyhow::Result;

use crate::api::NotionClient;
use crate::cli::TreeArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::hierarchy::build_hierarchy;

/// Handle the `tree` command: discovery only, no materialization.
pub fn handle_tree(args: &TreeArgs, config: &Config) -> Result<()> {
    let token = config.token()?;
    let client = NotionClient::new(token);

    let discovery = build_hierarchy(&client, args.page_id.as_deref(), args.max_depth);
    for warning in &discovery.warnings {
        eprintln!("warning: {warning}");
    }

    match args.format {
        OutputFormat::Human => {
            if discovery.roots.is_empty() {
                println!("no pages found");
                return Ok(());
            }
            for root in &discovery.roots {
                print!("{}", root.to_tree_string());
            }
            println!();
            println!("total pages: {}", discovery.page_count());
        }
        OutputFormat::Json => Output::new(&discovery.roots).print(),
    }

    Ok(())
}
