//! Core types: blocks, rich-text spans, pages, database properties

mod block;
mod page;
mod property;
mod rich_text;
mod unsupported;

pub use block::{Block, BlockKind, HeadingLevel};
pub use page::{ObjectKind, Page, PageNode, ParentKind};
pub use property::{Database, DatabaseColumn, DatabaseRow, FormulaValue, PropertyValue};
pub use rich_text::{Annotations, MentionKind, RichText, SpanKind};
pub use unsupported::UnsupportedFeature;
