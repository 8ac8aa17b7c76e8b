//! In-memory [`Source`] for exercising discovery and export without a
//! network.

use std::collections::{HashMap, HashSet};

use crate::api::{ApiError, Source};
use crate::domain::{
    Block, BlockKind, Database, DatabaseRow, ObjectKind, Page, ParentKind, RichText,
};

/// A canned workspace: pages, their child blocks, and failure injection.
#[derive(Default)]
pub(crate) struct FakeSource {
    pages: HashMap<String, Page>,
    children: HashMap<String, Vec<Block>>,
    databases: HashMap<String, Database>,
    rows: HashMap<String, Vec<DatabaseRow>>,
    failing: HashSet<String>,
}

impl FakeSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Registers a page with the given parent.
    pub(crate) fn add_page(&mut self, id: &str, title: &str, parent: ParentKind) -> &mut Self {
        self.pages.insert(
            id.to_string(),
            Page {
                id: id.to_string(),
                title: title.to_string(),
                object: ObjectKind::Page,
                parent,
                created_time: None,
                last_edited_time: None,
            },
        );
        self
    }

    /// Registers a database object resolvable through `get_page`.
    pub(crate) fn add_database(&mut self, id: &str, title: &str, database: Database) -> &mut Self {
        self.pages.insert(
            id.to_string(),
            Page {
                id: id.to_string(),
                title: title.to_string(),
                object: ObjectKind::Database,
                parent: ParentKind::Other,
                created_time: None,
                last_edited_time: None,
            },
        );
        self.databases.insert(id.to_string(), database);
        self
    }

    pub(crate) fn add_rows(&mut self, id: &str, rows: Vec<DatabaseRow>) -> &mut Self {
        self.rows.insert(id.to_string(), rows);
        self
    }

    /// Sets the ordered child blocks of a page.
    pub(crate) fn set_children(&mut self, id: &str, blocks: Vec<Block>) -> &mut Self {
        self.children.insert(id.to_string(), blocks);
        self
    }

    /// Adds a child_page block to `parent` (so discovery finds the link).
    pub(crate) fn link_child_page(&mut self, parent: &str, child: &str, title: &str) -> &mut Self {
        self.children
            .entry(parent.to_string())
            .or_default()
            .push(Block::new(
                child,
                BlockKind::ChildPage {
                    title: title.to_string(),
                },
            ));
        self
    }

    /// Makes every fetch of `id` fail.
    pub(crate) fn fail_on(&mut self, id: &str) -> &mut Self {
        self.failing.insert(id.to_string());
        self
    }

    pub(crate) fn paragraph(id: &str, text: &str) -> Block {
        Block::new(
            id,
            BlockKind::Paragraph {
                rich_text: vec![RichText::text(text)],
            },
        )
    }

    fn check(&self, id: &str) -> Result<(), ApiError> {
        if self.failing.contains(id) {
            return Err(ApiError::Http {
                status: 500,
                message: "injected failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Source for FakeSource {
    fn get_page(&self, id: &str) -> Result<Page, ApiError> {
        self.check(id)?;
        self.pages.get(id).cloned().ok_or(ApiError::Http {
            status: 404,
            message: "page not found".to_string(),
        })
    }

    fn get_block_children(&self, id: &str) -> Result<Vec<Block>, ApiError> {
        self.check(id)?;
        Ok(self.children.get(id).cloned().unwrap_or_default())
    }

    fn search_pages(&self) -> Result<Vec<Page>, ApiError> {
        let mut pages: Vec<Page> = self.pages.values().cloned().collect();
        pages.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(pages)
    }

    fn get_database(&self, id: &str) -> Result<Database, ApiError> {
        self.check(id)?;
        self.databases.get(id).cloned().ok_or(ApiError::Http {
            status: 404,
            message: "database not found".to_string(),
        })
    }

    fn query_database(&self, id: &str) -> Result<Vec<DatabaseRow>, ApiError> {
        self.check(id)?;
        Ok(self.rows.get(id).cloned().unwrap_or_default())
    }
}
