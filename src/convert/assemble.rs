//! Sibling-sequence assembly: table grouping, counter resets, joining.

use crate::convert::block::{ListNumbering, MarkdownConverter};
use crate::convert::table::render_table;
use crate::domain::{Block, BlockKind};

impl MarkdownConverter {
    /// Converts an ordered list of sibling blocks into the page body.
    ///
    /// Fragments are joined with a blank line; empty fragments are omitted
    /// entirely. A table block greedily consumes the row blocks that
    /// immediately follow it, and scanning resumes past the consumed rows.
    /// The numbered-list counter resets on any non-numbered block and after
    /// every table, so numbering never survives a gap.
    pub fn convert_blocks(&mut self, blocks: &[Block]) -> String {
        let mut fragments: Vec<String> = Vec::new();
        let mut numbering = ListNumbering::default();

        let mut i = 0;
        while i < blocks.len() {
            if let BlockKind::Table {
                has_column_header, ..
            } = blocks[i].kind
            {
                let mut rows = Vec::new();
                let mut j = i + 1;
                while j < blocks.len() {
                    match &blocks[j].kind {
                        BlockKind::TableRow { cells } => {
                            rows.push(cells.clone());
                            j += 1;
                        }
                        _ => break,
                    }
                }

                let rendered = render_table(has_column_header, &rows);
                if !rendered.is_empty() {
                    fragments.push(rendered);
                }

                i = j;
                numbering.reset();
                continue;
            }

            if !matches!(blocks[i].kind, BlockKind::NumberedListItem { .. }) {
                numbering.reset();
            }

            let (fragment, _) = self.convert_block(&blocks[i], &mut numbering);
            if !fragment.is_empty() {
                fragments.push(fragment);
            }

            i += 1;
        }

        fragments.join("\n\n")
    }
}
