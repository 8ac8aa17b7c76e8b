//! Handler for the `completions` command.

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::{Cli, CompletionsArgs};

/// Handle the `completions` command.
pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    let mut command = Cli::command();
    generate(
        args.shell,
        &mut command,
        "notedown",
        &mut std::io::stdout(),
    );
    Ok(())
}
