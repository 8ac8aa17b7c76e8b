//! Inline rich-text spans with style annotations.

/// Independent style flags carried by a span.
///
/// Flags combine freely; the renderer applies them in a fixed nesting order
/// so identical input always produces identical output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

/// What a mention span refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentionKind {
    User,
    Page,
    Database,
    Date,
    Other,
}

/// Span payload by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanKind {
    /// Ordinary text, optionally carrying its own link target.
    Text {
        content: String,
        link: Option<String>,
    },
    /// A reference to a user, page, database, or date.
    Mention { kind: MentionKind },
    /// An inline LaTeX expression.
    Equation { expression: String },
}

/// One run of styled inline text within a block's rich-text field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichText {
    pub kind: SpanKind,
    /// Display text as the remote API rendered it; the fallback for
    /// mention spans and unrecognized span kinds.
    pub plain_text: String,
    /// Link target attached to the span itself (distinct from a text
    /// node's own link).
    pub href: Option<String>,
    pub annotations: Annotations,
}

impl RichText {
    /// Creates an unstyled plain-text span.
    pub fn text(content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            kind: SpanKind::Text {
                content: content.clone(),
                link: None,
            },
            plain_text: content,
            href: None,
            annotations: Annotations::default(),
        }
    }

    /// Sets the bold flag.
    pub fn bold(mut self) -> Self {
        self.annotations.bold = true;
        self
    }

    /// Sets the italic flag.
    pub fn italic(mut self) -> Self {
        self.annotations.italic = true;
        self
    }

    /// Sets the strikethrough flag.
    pub fn strikethrough(mut self) -> Self {
        self.annotations.strikethrough = true;
        self
    }

    /// Sets the inline-code flag.
    pub fn code(mut self) -> Self {
        self.annotations.code = true;
        self
    }

    /// Attaches a link target to the span.
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}
