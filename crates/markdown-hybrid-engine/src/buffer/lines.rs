use xi_rope::Rope;

use super::{edit::Edit, span::Span};

/// A reference to a single line in the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of the line content, excluding the line terminator.
    pub span: Span,
    /// The line text without its terminator.
    pub text: String,
}

impl LineRef {
    /// True when the line holds nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Immutable, line-addressable snapshot of a document.
///
/// A snapshot is replaced wholesale on every mutation. Line numbering follows
/// editor conventions: a document that ends with a newline (or is empty) has
/// a trailing empty line, so there is always at least one line.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    rope: Rope,
    lines: Vec<LineRef>,
}

impl LineBuffer {
    pub fn new(text: &str) -> Self {
        Self::from_rope(Rope::from(text))
    }

    pub fn from_rope(rope: Rope) -> Self {
        let lines = lines_with_spans(&rope);
        Self { rope, lines }
    }

    pub fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Get the full document text.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Document length in bytes.
    pub fn len(&self) -> usize {
        self.rope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len() == 0
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Look up a line by its 1-based number.
    pub fn line(&self, number: usize) -> Option<&LineRef> {
        number.checked_sub(1).and_then(|i| self.lines.get(i))
    }

    /// Text of a line, or the empty string when the number is out of range.
    pub fn line_text(&self, number: usize) -> &str {
        self.line(number).map(|l| l.text.as_str()).unwrap_or("")
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineRef> + '_ {
        self.lines.iter()
    }

    /// Translate a byte offset into a 1-based line number.
    ///
    /// Offsets past the end of the document resolve to the last line.
    pub fn line_at_offset(&self, offset: usize) -> usize {
        self.lines
            .partition_point(|l| l.span.start <= offset)
            .max(1)
    }

    /// Byte offset where the given line starts (clamped to the document).
    pub fn offset_of_line(&self, number: usize) -> usize {
        let clamped = number.clamp(1, self.lines.len());
        self.lines[clamped - 1].span.start
    }

    /// Extracts the text for a span as an owned String.
    ///
    /// Out-of-range spans are clamped to the document rather than panicking;
    /// hosts routinely hold spans from a previous snapshot.
    pub fn slice(&self, span: Span) -> String {
        let start = self.snap_to_char_boundary(span.start);
        let end = self.snap_to_char_boundary(span.end).max(start);
        self.rope.slice_to_cow(start..end).into_owned()
    }

    /// Produce the next snapshot with `edit` applied.
    pub fn with_edit(&self, edit: &Edit) -> LineBuffer {
        let from = self.snap_to_char_boundary(edit.from);
        let to = self.snap_to_char_boundary(edit.to).max(from);
        let mut rope = self.rope.clone();
        rope.edit(from..to, edit.insert.as_str());
        Self::from_rope(rope)
    }

    /// Clamp `offset` to the document and move it back to the start of the
    /// code point it falls inside.
    pub fn snap_to_char_boundary(&self, offset: usize) -> usize {
        let offset = offset.min(self.rope.len());
        let Some(line) = self.line(self.line_at_offset(offset)) else {
            return offset;
        };
        if !line.span.touches(offset) {
            // terminators are ASCII
            return offset;
        }
        let mut local = offset - line.span.start;
        while !line.text.is_char_boundary(local) {
            local -= 1;
        }
        line.span.start + local
    }
}

/// Collects every line with its byte span.
///
/// Uses `lines_raw` to preserve newline characters so span arithmetic stays
/// exact, then strips `\r\n`/`\n` from the stored text and span.
fn lines_with_spans(rope: &Rope) -> Vec<LineRef> {
    let mut lines = Vec::new();
    let mut offset = 0usize;
    let mut ends_with_newline = true;

    for raw in rope.lines_raw(..) {
        let start = offset;
        offset += raw.len();
        ends_with_newline = raw.ends_with('\n');
        let content = raw.trim_end_matches(['\r', '\n']);
        lines.push(LineRef {
            number: lines.len() + 1,
            span: Span::new(start, start + content.len()),
            text: content.to_string(),
        });
    }

    if ends_with_newline {
        lines.push(LineRef {
            number: lines.len() + 1,
            span: Span::new(offset, offset),
            text: String::new(),
        });
    }

    lines
}
