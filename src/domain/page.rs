//! Page metadata and the exportable page tree.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write as FmtWrite;

/// Whether a remote object is a page or a database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Page,
    Database,
}

/// Where an object hangs in the remote workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParentKind {
    /// Directly under the workspace; such pages are export roots.
    Workspace,
    Page(String),
    Database(String),
    Block(String),
    Other,
}

/// Metadata for one remote page or database, as the fetch layer reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: String,
    /// Defaults to "Untitled" when the remote object carries no title.
    pub title: String,
    pub object: ObjectKind,
    pub parent: ParentKind,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
}

/// An in-memory tree node representing one exportable page or database.
///
/// Nodes own their children exclusively and are acyclic by construction:
/// cycle detection happens during discovery, so a built tree never contains
/// a node as its own ancestor. Nodes are never mutated after discovery
/// except for children being appended while the tree is built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageNode {
    pub id: String,
    pub title: String,
    pub parent_id: Option<String>,
    pub children: Vec<PageNode>,
    pub is_database: bool,
}

impl PageNode {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        parent_id: Option<String>,
        is_database: bool,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent_id,
            children: Vec::new(),
            is_database,
        }
    }

    /// Total pages in this subtree, including the node itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(PageNode::count).sum::<usize>()
    }

    /// Renders the subtree as an indented text outline.
    pub fn to_tree_string(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0, true);
        out
    }

    fn write_tree(&self, out: &mut String, indent: usize, is_last: bool) {
        let prefix = "  ".repeat(indent);
        let connector = if indent == 0 {
            ""
        } else if is_last {
            "└─ "
        } else {
            "├─ "
        };
        let marker = if self.is_database { " [Database]" } else { "" };
        let _ = writeln!(out, "{prefix}{connector}{}{marker}", self.title);

        for (i, child) in self.children.iter().enumerate() {
            child.write_tree(out, indent + 1, i == self.children.len() - 1);
        }
    }
}
