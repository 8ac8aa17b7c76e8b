//! Per-block Markdown rendering.

use crate::convert::span::render_spans;
use crate::domain::{Block, BlockKind, RichText, UnsupportedFeature};

/// Numbering state threaded through a sibling scan.
///
/// The counter belongs to the caller, not the block: numbering is
/// monotonically increasing per contiguous run of numbered items and resets
/// whenever the run is interrupted.
#[derive(Debug, Default)]
pub struct ListNumbering {
    numbered: u32,
}

impl ListNumbering {
    /// Advances the run and returns the next item number.
    pub fn next_number(&mut self) -> u32 {
        self.numbered += 1;
        self.numbered
    }

    /// Ends the current run; the next numbered item restarts at 1.
    pub fn reset(&mut self) {
        self.numbered = 0;
    }
}

/// Converts blocks to Markdown fragments, accumulating fidelity-loss
/// records along the way.
///
/// Conversion never performs I/O and never fails: partial or malformed
/// data degrades to an empty or placeholder fragment so that a single bad
/// block can never abort conversion of a page.
#[derive(Debug)]
pub struct MarkdownConverter {
    unsupported: Vec<UnsupportedFeature>,
    track_skipped_databases: bool,
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownConverter {
    pub fn new() -> Self {
        Self {
            unsupported: Vec::new(),
            track_skipped_databases: true,
        }
    }

    /// A converter for a run where databases are exported separately, so
    /// skipped child-database blocks are not worth recording.
    pub fn with_database_export(include_databases: bool) -> Self {
        Self {
            unsupported: Vec::new(),
            track_skipped_databases: !include_databases,
        }
    }

    /// The fidelity-loss records accumulated so far, in discovery order.
    pub fn unsupported(&self) -> &[UnsupportedFeature] {
        &self.unsupported
    }

    /// Drains the accumulated records, leaving the converter empty.
    pub fn take_unsupported(&mut self) -> Vec<UnsupportedFeature> {
        std::mem::take(&mut self.unsupported)
    }

    fn record(&mut self, block_type: &str, feature: &str, block_id: &str) {
        self.unsupported
            .push(UnsupportedFeature::new(block_type, feature, block_id));
    }

    /// Converts a single block, returning its fragment and whether the
    /// block was fully supported.
    ///
    /// Table and table-row blocks render empty here; they are grouped and
    /// rendered at the sequence level. Child pages render empty because
    /// they become tree nodes instead of body content.
    pub fn convert_block(&mut self, block: &Block, numbering: &mut ListNumbering) -> (String, bool) {
        match &block.kind {
            BlockKind::Paragraph { rich_text } => (render_spans(rich_text), true),
            BlockKind::Heading { level, rich_text } => (
                format!("{} {}", "#".repeat(level.depth()), render_spans(rich_text)),
                true,
            ),
            BlockKind::BulletedListItem { rich_text } => {
                (format!("- {}", render_spans(rich_text)), true)
            }
            BlockKind::NumberedListItem { rich_text } => {
                let number = numbering.next_number();
                (format!("{number}. {}", render_spans(rich_text)), true)
            }
            BlockKind::ToDo { rich_text, checked } => {
                let checkbox = if *checked { "[x]" } else { "[ ]" };
                (format!("- {checkbox} {}", render_spans(rich_text)), true)
            }
            BlockKind::Toggle { rich_text } => {
                // No collapsible construct exists in Markdown; flattening to
                // bold is a fidelity compromise, not a failure.
                self.record("toggle", "flattened", &block.id);
                (format!("**{}**", render_spans(rich_text)), true)
            }
            BlockKind::Code {
                rich_text,
                language,
            } => {
                // Spans inside a fence are never styled individually.
                let text: String = rich_text
                    .iter()
                    .map(|span| span.plain_text.as_str())
                    .collect();
                (format!("```{language}\n{text}\n```"), true)
            }
            BlockKind::Quote { rich_text } => (format!("> {}", render_spans(rich_text)), true),
            BlockKind::Callout { rich_text, icon } => {
                let text = render_spans(rich_text);
                let fragment = match icon {
                    Some(icon) => format!("> {icon} {text}"),
                    None => format!("> {text}"),
                };
                (fragment.trim_end().to_string(), true)
            }
            BlockKind::Divider => ("---".to_string(), true),
            BlockKind::Equation { expression } => (format!("$$\n{expression}\n$$"), true),
            BlockKind::Image { url, caption } => {
                let caption_text = caption_or(caption, "image");
                match url {
                    Some(url) => (format!("![{caption_text}]({url})"), true),
                    None => {
                        self.record("image", "no_url", &block.id);
                        (format!("[Image: {caption_text}]"), false)
                    }
                }
            }
            BlockKind::File { url, caption } => {
                let caption_text = caption_or(caption, "file");
                match url {
                    Some(url) => (format!("[{caption_text}]({url})"), true),
                    None => {
                        self.record("file", "no_url", &block.id);
                        (format!("[File: {caption_text}]"), false)
                    }
                }
            }
            BlockKind::Bookmark { url, caption } => match url {
                Some(url) => {
                    let caption_text = caption_or(caption, url);
                    (format!("[{caption_text}]({url})"), true)
                }
                None => {
                    self.record("bookmark", "no_url", &block.id);
                    ("[Bookmark]".to_string(), false)
                }
            },
            BlockKind::ChildPage { .. } => (String::new(), true),
            BlockKind::ChildDatabase { .. } => {
                if self.track_skipped_databases {
                    self.record("child_database", "not_exported", &block.id);
                }
                (String::new(), true)
            }
            BlockKind::Table { .. } | BlockKind::TableRow { .. } => (String::new(), true),
            BlockKind::Unsupported => {
                self.record("unsupported", "unknown", &block.id);
                ("[Unsupported block]".to_string(), false)
            }
            BlockKind::Unknown { type_name } => {
                self.record(type_name, "unknown_type", &block.id);
                (format!("[Unsupported: {type_name}]"), false)
            }
        }
    }
}

/// Caption text, falling back to a descriptive default when there are no
/// caption spans at all.
fn caption_or(caption: &[RichText], default: &str) -> String {
    if caption.is_empty() {
        default.to_string()
    } else {
        render_spans(caption)
    }
}
