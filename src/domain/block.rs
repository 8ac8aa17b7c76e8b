//! Structural block variants for page content.

use crate::domain::RichText;

/// Heading depth, 1 through 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Numeric depth, for `#` repetition.
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }
}

/// One structural unit of page content.
///
/// Blocks are immutable value records once fetched; sibling ordering is
/// significant and preserved by the fetch layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// The type tag as the wire format spells it, for fidelity reporting.
    pub fn type_name(&self) -> &str {
        self.kind.type_name()
    }
}

/// The closed set of block kinds the converter understands.
///
/// Anything the wire layer does not recognize decodes to
/// [`BlockKind::Unknown`], the single explicit catch-all.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockKind {
    Paragraph {
        rich_text: Vec<RichText>,
    },
    Heading {
        level: HeadingLevel,
        rich_text: Vec<RichText>,
    },
    BulletedListItem {
        rich_text: Vec<RichText>,
    },
    NumberedListItem {
        rich_text: Vec<RichText>,
    },
    ToDo {
        rich_text: Vec<RichText>,
        checked: bool,
    },
    Toggle {
        rich_text: Vec<RichText>,
    },
    Code {
        rich_text: Vec<RichText>,
        language: String,
    },
    Quote {
        rich_text: Vec<RichText>,
    },
    Callout {
        rich_text: Vec<RichText>,
        /// Emoji icon, when the callout carries one.
        icon: Option<String>,
    },
    Divider,
    Equation {
        expression: String,
    },
    Image {
        /// Resolved from the external or hosted location at decode time.
        url: Option<String>,
        caption: Vec<RichText>,
    },
    File {
        url: Option<String>,
        caption: Vec<RichText>,
    },
    Bookmark {
        url: Option<String>,
        caption: Vec<RichText>,
    },
    /// Becomes a tree node during hierarchy discovery, never body content.
    ChildPage {
        title: String,
    },
    ChildDatabase {
        title: String,
    },
    /// Rendered at the sequence level together with its following row blocks.
    Table {
        has_column_header: bool,
        has_row_header: bool,
    },
    TableRow {
        cells: Vec<Vec<RichText>>,
    },
    /// The remote API's own "unsupported" tag.
    Unsupported,
    /// A type tag this tool does not know.
    Unknown {
        type_name: String,
    },
}

impl BlockKind {
    /// The wire-format type tag for this kind.
    pub fn type_name(&self) -> &str {
        match self {
            BlockKind::Paragraph { .. } => "paragraph",
            BlockKind::Heading { level, .. } => match level {
                HeadingLevel::H1 => "heading_1",
                HeadingLevel::H2 => "heading_2",
                HeadingLevel::H3 => "heading_3",
            },
            BlockKind::BulletedListItem { .. } => "bulleted_list_item",
            BlockKind::NumberedListItem { .. } => "numbered_list_item",
            BlockKind::ToDo { .. } => "to_do",
            BlockKind::Toggle { .. } => "toggle",
            BlockKind::Code { .. } => "code",
            BlockKind::Quote { .. } => "quote",
            BlockKind::Callout { .. } => "callout",
            BlockKind::Divider => "divider",
            BlockKind::Equation { .. } => "equation",
            BlockKind::Image { .. } => "image",
            BlockKind::File { .. } => "file",
            BlockKind::Bookmark { .. } => "bookmark",
            BlockKind::ChildPage { .. } => "child_page",
            BlockKind::ChildDatabase { .. } => "child_database",
            BlockKind::Table { .. } => "table",
            BlockKind::TableRow { .. } => "table_row",
            BlockKind::Unsupported => "unsupported",
            BlockKind::Unknown { type_name } => type_name,
        }
    }
}
