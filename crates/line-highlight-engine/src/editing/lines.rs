use xi_rope::Rope;

/// A byte range `[start, end)` into the rope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }
}

/// One line of the raw document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// Byte span of the line content, excluding the `\n` terminator.
    pub span: Span,
    /// The line content, including a `\r` if the file uses CRLF endings.
    pub text: String,
}

/// Splits the rope into lines exactly like splitting the text on `\n`: a
/// trailing newline (or an empty document) yields a final empty line.
pub fn text_lines(rope: &Rope) -> Vec<TextLine> {
    let mut lines = Vec::new();
    let mut offset = 0usize;
    let mut ends_with_newline = true;

    for raw in rope.lines_raw(..) {
        let start = offset;
        offset += raw.len();
        ends_with_newline = raw.ends_with('\n');
        let content = raw.strip_suffix('\n').unwrap_or(&raw);
        lines.push(TextLine {
            span: Span {
                start,
                end: start + content.len(),
            },
            text: content.to_string(),
        });
    }

    if ends_with_newline {
        lines.push(TextLine {
            span: Span {
                start: offset,
                end: offset,
            },
            text: String::new(),
        });
    }

    lines
}
