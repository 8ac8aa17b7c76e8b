//! Command handlers for the CLI.

mod check;
mod completions;
mod export;
mod frontmatter;
mod tree;

pub use check::handle_check;
pub use completions::handle_completions;
pub use export::handle_export;
pub use frontmatter::handle_frontmatter;
pub use tree::handle_tree;
