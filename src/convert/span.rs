//! Inline-span rendering to Markdown.

use crate::domain::{MentionKind, RichText, SpanKind};

/// Renders a sequence of rich-text spans as one Markdown string.
///
/// Spans are concatenated with no separator between them; adjacency matters
/// for run-on formatted text. Rendering is a pure function of the input.
///
/// # Examples
///
/// ```
/// use notedown::convert::render_spans;
/// use notedown::domain::RichText;
///
/// let spans = vec![RichText::text("plain "), RichText::text("x").bold().strikethrough()];
/// assert_eq!(render_spans(&spans), "plain ~~**x**~~");
/// ```
pub fn render_spans(spans: &[RichText]) -> String {
    spans.iter().map(render_span).collect()
}

/// Renders one span: resolve display text by kind, wrap styles in fixed
/// order (code innermost, then bold, italic, strikethrough), link last.
fn render_span(span: &RichText) -> String {
    let (content, link) = match &span.kind {
        SpanKind::Text { content, link } => (content.clone(), link.as_deref()),
        SpanKind::Mention { kind } => (mention_text(*kind, &span.plain_text), None),
        SpanKind::Equation { expression } => (format!("${expression}$"), None),
    };

    let mut content = content;
    let style = span.annotations;
    if style.code {
        content = format!("`{content}`");
    }
    if style.bold {
        content = format!("**{content}**");
    }
    if style.italic {
        content = format!("*{content}*");
    }
    if style.strikethrough {
        content = format!("~~{content}~~");
    }

    if let Some(href) = span.href.as_deref().or(link) {
        content = format!("[{content}]({href})");
    }

    content
}

fn mention_text(kind: MentionKind, plain_text: &str) -> String {
    match kind {
        MentionKind::User => {
            let name = if plain_text.is_empty() {
                "user"
            } else {
                plain_text
            };
            format!("@{name}")
        }
        MentionKind::Page => fallback(plain_text, "[page]"),
        MentionKind::Database => fallback(plain_text, "[database]"),
        MentionKind::Date => fallback(plain_text, "[date]"),
        MentionKind::Other => fallback(plain_text, "[mention]"),
    }
}

fn fallback(text: &str, placeholder: &str) -> String {
    if text.is_empty() {
        placeholder.to_string()
    } else {
        text.to_string()
    }
}
