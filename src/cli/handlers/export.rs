//! Handler for the `export` command.

use anyhow::{Context, Result};

use crate::api::NotionClient;
use crate::cli::ExportArgs;
use crate::cli::config::Config;
use crate::cli::output::{Output, OutputFormat};
use crate::export::{ExportOptions, ExportReport, ExportStats, Exporter, REPORT_FILENAME};
use crate::hierarchy::build_hierarchy;

/// How many per-page errors the human summary lists.
const ERROR_LIMIT: usize = 10;

/// Handle the `export` command.
pub fn handle_export(args: &ExportArgs, config: &Config, verbose: bool) -> Result<()> {
    let token = config.token()?;
    let client = NotionClient::new(token);
    let output_dir = config.output_dir(args.output.as_ref());

    if verbose || args.dry_run {
        println!("building page hierarchy...");
    }
    let discovery = build_hierarchy(&client, args.page_id.as_deref(), args.max_depth);
    for warning in &discovery.warnings {
        eprintln!("warning: {warning}");
    }
    if discovery.roots.is_empty() {
        println!("no pages found to export");
        return Ok(());
    }
    if verbose {
        println!("discovered {} page(s)", discovery.page_count());
    }

    let options = ExportOptions {
        include_databases: args.include_databases,
        verbose,
    };
    let exporter = Exporter::new(&client, &output_dir, options);

    if args.dry_run {
        println!(
            "files and folders that would be created under {}:",
            output_dir.display()
        );
        print!("{}", exporter.dry_run_tree(&discovery.roots));
        println!();
        println!("run without --dry-run to create these files");
        return Ok(());
    }

    let stats = exporter.export_hierarchy(&discovery.roots);

    let report_path = output_dir.join(REPORT_FILENAME);
    ExportReport::new(stats.unsupported_features.clone())
        .save(&report_path)
        .with_context(|| format!("failed to write {}", report_path.display()))?;

    match args.format {
        OutputFormat::Human => {
            print_stats(&stats, verbose);
            println!("report saved to: {}", report_path.display());
            if stats.pages_exported > 0 {
                println!("files saved to: {}/", output_dir.display());
            }
        }
        OutputFormat::Json => Output::new(&stats).print(),
    }

    Ok(())
}

fn print_stats(stats: &ExportStats, verbose: bool) {
    println!();
    println!("export complete");
    println!("  pages exported:  {}", stats.pages_exported);
    println!("  pages failed:    {}", stats.pages_failed);
    println!("  files created:   {}", stats.files_created);
    println!("  folders created: {}", stats.folders_created);
    println!();

    if !stats.errors.is_empty() && verbose {
        eprintln!("errors encountered:");
        for error in stats.errors.iter().take(ERROR_LIMIT) {
            eprintln!("  page {}: {}", error.page_id, error.message);
        }
        if stats.errors.len() > ERROR_LIMIT {
            eprintln!("  ... and {} more", stats.errors.len() - ERROR_LIMIT);
        }
        eprintln!();
    }
}
