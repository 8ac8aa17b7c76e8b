//! Page-tree discovery with cycle and depth guards.
//!
//! The remote page graph is not guaranteed acyclic, but the tree built
//! here always is: a shared visited set drops back-edges, and a depth
//! bound stops runaway chains. A branch that cannot be built is simply
//! omitted — siblings and the rest of the traversal are unaffected.

use std::collections::HashSet;
use std::fmt;

use crate::api::{ApiError, Source};
use crate::domain::{Block, BlockKind, ObjectKind, Page, PageNode, ParentKind};

/// Default bound on page-tree depth.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// A non-fatal problem encountered during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryWarning {
    /// A back-edge in the remote graph; the repeated branch was dropped.
    Cycle { page_id: String },
    /// The depth bound was reached; the subtree below was dropped.
    DepthLimit { page_id: String, depth: usize },
    /// The object could not be fetched; its subtree was dropped.
    Fetch { page_id: String, message: String },
}

impl fmt::Display for DiscoveryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoveryWarning::Cycle { page_id } => {
                write!(f, "circular reference detected for page {page_id}")
            }
            DiscoveryWarning::DepthLimit { page_id, depth } => {
                write!(f, "maximum depth {depth} reached at page {page_id}")
            }
            DiscoveryWarning::Fetch { page_id, message } => {
                write!(f, "could not process page {page_id}: {message}")
            }
        }
    }
}

/// The discovered forest plus everything that went wrong along the way.
#[derive(Debug, Default)]
pub struct Discovery {
    pub roots: Vec<PageNode>,
    pub warnings: Vec<DiscoveryWarning>,
}

impl Discovery {
    /// Total pages across every discovered tree.
    pub fn page_count(&self) -> usize {
        self.roots.iter().map(PageNode::count).sum()
    }
}

/// Builds the page forest from one root page, or from every page whose
/// remote parent is the workspace when no root is given.
pub fn build_hierarchy(
    source: &dyn Source,
    root_page_id: Option<&str>,
    max_depth: usize,
) -> Discovery {
    let mut discovery = Discovery::default();
    let mut visited = HashSet::new();

    match root_page_id {
        Some(id) => {
            if let Some(node) =
                build_page_tree(source, id, None, &mut visited, 0, max_depth, &mut discovery.warnings)
            {
                discovery.roots.push(node);
            }
        }
        None => match discover_root_pages(source) {
            Ok(roots) => {
                for page in roots {
                    if let Some(node) = build_page_tree(
                        source,
                        &page.id,
                        None,
                        &mut visited,
                        0,
                        max_depth,
                        &mut discovery.warnings,
                    ) {
                        discovery.roots.push(node);
                    }
                }
            }
            Err(err) => discovery.warnings.push(DiscoveryWarning::Fetch {
                page_id: "workspace".to_string(),
                message: format!("root discovery failed: {err}"),
            }),
        },
    }

    discovery
}

/// All pages whose remote parent is the workspace itself.
pub fn discover_root_pages(source: &dyn Source) -> Result<Vec<Page>, ApiError> {
    Ok(source
        .search_pages()?
        .into_iter()
        .filter(|page| page.parent == ParentKind::Workspace)
        .collect())
}

fn build_page_tree(
    source: &dyn Source,
    page_id: &str,
    parent_id: Option<&str>,
    visited: &mut HashSet<String>,
    depth: usize,
    max_depth: usize,
    warnings: &mut Vec<DiscoveryWarning>,
) -> Option<PageNode> {
    if visited.contains(page_id) {
        warnings.push(DiscoveryWarning::Cycle {
            page_id: page_id.to_string(),
        });
        return None;
    }
    if depth >= max_depth {
        warnings.push(DiscoveryWarning::DepthLimit {
            page_id: page_id.to_string(),
            depth: max_depth,
        });
        return None;
    }
    visited.insert(page_id.to_string());

    let page = match source.get_page(page_id) {
        Ok(page) => page,
        Err(err) => {
            warnings.push(DiscoveryWarning::Fetch {
                page_id: page_id.to_string(),
                message: err.to_string(),
            });
            return None;
        }
    };

    let mut node = PageNode::new(
        page_id,
        page.title,
        parent_id.map(str::to_string),
        page.object == ObjectKind::Database,
    );

    for child_block in discover_child_links(source, page_id, warnings) {
        if let Some(child) = build_page_tree(
            source,
            &child_block.id,
            Some(page_id),
            visited,
            depth + 1,
            max_depth,
            warnings,
        ) {
            node.children.push(child);
        }
    }

    Some(node)
}

/// Child blocks that become tree nodes. A listing failure drops the
/// children but keeps the node itself.
fn discover_child_links(
    source: &dyn Source,
    page_id: &str,
    warnings: &mut Vec<DiscoveryWarning>,
) -> Vec<Block> {
    match source.get_block_children(page_id) {
        Ok(blocks) => blocks
            .into_iter()
            .filter(|block| {
                matches!(
                    block.kind,
                    BlockKind::ChildPage { .. } | BlockKind::ChildDatabase { .. }
                )
            })
            .collect(),
        Err(err) => {
            warnings.push(DiscoveryWarning::Fetch {
                page_id: page_id.to_string(),
                message: format!("could not list children: {err}"),
            });
            Vec::new()
        }
    }
}
