//! Materialization of the page tree onto the filesystem.

use std::fmt::Write as FmtWrite;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::api::Source;
use crate::convert::MarkdownConverter;
use crate::domain::{PageNode, UnsupportedFeature};
use crate::export::database::render_database;
use crate::infra::{create_dir, sanitize_filename, unique_path, write_atomic};

/// Options for one export run.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Render database nodes as tables instead of attempting block export.
    pub include_databases: bool,
    /// Print per-page progress.
    pub verbose: bool,
}

/// One recorded per-page failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageError {
    pub page_id: String,
    pub message: String,
}

/// Counters and error records accumulated over one export run.
///
/// Owned by a single [`Exporter`]; accumulated during the walk and read
/// once at the end.
#[derive(Debug, Default, Serialize)]
pub struct ExportStats {
    pub pages_exported: usize,
    pub pages_failed: usize,
    pub files_created: usize,
    pub folders_created: usize,
    pub errors: Vec<PageError>,
    #[serde(skip)]
    pub unsupported_features: Vec<UnsupportedFeature>,
}

impl ExportStats {
    fn add_error(&mut self, page_id: &str, message: impl Into<String>) {
        self.errors.push(PageError {
            page_id: page_id.to_string(),
            message: message.into(),
        });
        self.pages_failed += 1;
    }
}

/// Walks a page forest and writes the Markdown tree.
///
/// Per node: a node with children becomes a directory holding `index.md`
/// plus one entry per child; a childless node becomes a single leaf file,
/// suffixed `_1`, `_2`, ... on name collision. Any per-page failure is
/// recorded and the walk continues with siblings and other subtrees.
pub struct Exporter<'a> {
    source: &'a dyn Source,
    output_dir: PathBuf,
    options: ExportOptions,
    converter: MarkdownConverter,
    stats: ExportStats,
}

impl<'a> Exporter<'a> {
    pub fn new(source: &'a dyn Source, output_dir: impl Into<PathBuf>, options: ExportOptions) -> Self {
        let converter = MarkdownConverter::with_database_export(options.include_databases);
        Self {
            source,
            output_dir: output_dir.into(),
            options,
            converter,
            stats: ExportStats::default(),
        }
    }

    /// Exports every root, returning the accumulated statistics.
    pub fn export_hierarchy(mut self, roots: &[PageNode]) -> ExportStats {
        let output_dir = self.output_dir.clone();
        if !self.create_directory(&output_dir) {
            self.stats
                .add_error("output", format!("failed to create {}", output_dir.display()));
            return self.finish();
        }

        for root in roots {
            self.export_node(root, &output_dir);
        }

        self.finish()
    }

    fn finish(mut self) -> ExportStats {
        self.stats.unsupported_features = self.converter.take_unsupported();
        self.stats
    }

    fn export_node(&mut self, node: &PageNode, parent_path: &Path) {
        if self.options.verbose {
            println!("exporting: {}", node.title);
        }

        let content = match self.page_content(node) {
            Some(content) => content,
            None => return, // error already recorded
        };

        if !node.children.is_empty() {
            let folder_path = parent_path.join(sanitize_filename(&node.title));
            if !self.create_directory(&folder_path) {
                self.stats.add_error(&node.id, "failed to create directory");
                return;
            }

            if !self.write_file(&folder_path.join("index.md"), &content) {
                self.stats.add_error(&node.id, "failed to write index.md");
                return;
            }
            self.stats.pages_exported += 1;

            for child in &node.children {
                self.export_node(child, &folder_path);
            }
        } else {
            let file_path = unique_path(parent_path, &node.title, ".md");
            if !self.write_file(&file_path, &content) {
                self.stats.add_error(&node.id, "failed to write file");
                return;
            }
            self.stats.pages_exported += 1;
        }
    }

    /// Assembles one node's document body, recording any fetch failure.
    fn page_content(&mut self, node: &PageNode) -> Option<String> {
        if node.is_database && self.options.include_databases {
            match render_database(self.source, &node.id) {
                Ok(content) => Some(content),
                Err(err) => {
                    self.stats.add_error(&node.id, err.to_string());
                    None
                }
            }
        } else {
            match self.source.get_block_children(&node.id) {
                Ok(blocks) => Some(self.converter.convert_blocks(&blocks)),
                Err(err) => {
                    self.stats.add_error(&node.id, err.to_string());
                    None
                }
            }
        }
    }

    fn create_directory(&mut self, path: &Path) -> bool {
        if path.exists() {
            return true;
        }
        match create_dir(path) {
            Ok(()) => {
                self.stats.folders_created += 1;
                true
            }
            Err(err) => {
                eprintln!("error: {err}");
                false
            }
        }
    }

    fn write_file(&mut self, path: &Path, content: &str) -> bool {
        match write_atomic(path, content) {
            Ok(()) => {
                self.stats.files_created += 1;
                true
            }
            Err(err) => {
                eprintln!("error: {err}");
                false
            }
        }
    }

    /// Renders the tree of files and folders an export would create,
    /// using the same folder-vs-leaf decisions as the real walk but
    /// touching nothing.
    pub fn dry_run_tree(&self, roots: &[PageNode]) -> String {
        let mut out = String::new();
        for root in roots {
            render_node_structure(root, 0, &mut out);
        }
        out
    }
}

fn render_node_structure(node: &PageNode, indent: usize, out: &mut String) {
    let prefix = "  ".repeat(indent);
    let name = sanitize_filename(&node.title);
    if !node.children.is_empty() {
        let _ = writeln!(out, "{prefix}{name}/");
        let _ = writeln!(out, "{prefix}  index.md");
        for child in &node.children {
            render_node_structure(child, indent + 1, out);
        }
    } else {
        let _ = writeln!(out, "{prefix}{name}.md");
    }
}
