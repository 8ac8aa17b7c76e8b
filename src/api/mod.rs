//! Remote workspace access: the fetch seam and its HTTP implementation.

mod client;
pub(crate) mod wire;

#[cfg(test)]
pub(crate) mod fake;

pub use client::{BotUser, NotionClient};

use thiserror::Error;

use crate::domain::{Block, Database, DatabaseRow, Page};

/// Errors surfaced by the fetch collaborator.
///
/// None of these is fatal to an export run: a failure is local to the
/// object being fetched, and callers skip the affected node.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode API response: {0}")]
    Decode(String),

    #[error("the API rejected the token (401 unauthorized)")]
    InvalidToken,
}

/// Read access to the remote workspace.
///
/// `get_page` resolves both pages and databases to a [`Page`] metadata
/// record; the object kind distinguishes them. Block and row ordering is
/// significant and must be preserved.
pub trait Source {
    /// Fetches metadata for a page or database.
    fn get_page(&self, id: &str) -> Result<Page, ApiError>;

    /// Fetches the ordered direct children of a page or block.
    fn get_block_children(&self, id: &str) -> Result<Vec<Block>, ApiError>;

    /// Lists every page the integration can reach, with parent info.
    fn search_pages(&self) -> Result<Vec<Page>, ApiError>;

    /// Fetches a database's title and column schema.
    fn get_database(&self, id: &str) -> Result<Database, ApiError>;

    /// Fetches every row of a database, in query order.
    fn query_database(&self, id: &str) -> Result<Vec<DatabaseRow>, ApiError>;
}
