use std::ops::RangeInclusive;

use serde::Serialize;

use crate::{blocks::BlockKind, buffer::Span};

/// Identifies a diagram slot by the line of its opening fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DiagramKey {
    pub line: usize,
}

/// Replacement content for a rendered directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Payload {
    Line { markup: String },
    Code { language: String, markup: String },
    /// Whole-table markup, placed on the first row.
    Table { markup: String },
    Math { markup: String },
    /// Markup arrives later through the diagram slot named by `key`.
    Diagram { key: DiagramKey, source: String },
    /// A renderer failed; `markup` shows the message in place of the content.
    Error { message: String, markup: String },
}

impl Payload {
    /// Markup available right now, if any.
    pub fn markup(&self) -> Option<&str> {
        match self {
            Payload::Line { markup }
            | Payload::Code { markup, .. }
            | Payload::Table { markup }
            | Payload::Math { markup }
            | Payload::Error { markup, .. } => Some(markup),
            Payload::Diagram { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Payload::Error { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RenderMode {
    /// Source text shown as-is with a structural style tag.
    Raw { style: BlockKind },
    /// Source text replaced by a widget.
    Rendered(Payload),
    /// Source text kept in the buffer but drawn with zero width.
    Elided,
}

/// What to display over one line of the buffer.
///
/// Lines without a directive are shown raw and unstyled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderDirective {
    pub line: usize,
    pub span: Span,
    pub mode: RenderMode,
}

impl RenderDirective {
    pub fn raw(line: usize, span: Span, style: BlockKind) -> Self {
        Self {
            line,
            span,
            mode: RenderMode::Raw { style },
        }
    }

    pub fn rendered(line: usize, span: Span, payload: Payload) -> Self {
        Self {
            line,
            span,
            mode: RenderMode::Rendered(payload),
        }
    }

    pub fn elided(line: usize, span: Span) -> Self {
        Self {
            line,
            span,
            mode: RenderMode::Elided,
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match &self.mode {
            RenderMode::Rendered(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn is_elided(&self) -> bool {
        self.mode == RenderMode::Elided
    }
}

/// Inclusive, 1-based range of visible lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineRange {
    pub first: usize,
    pub last: usize,
}

impl LineRange {
    /// Builds a range, swapping the ends if given backwards.
    pub fn new(first: usize, last: usize) -> Self {
        Self {
            first: first.min(last),
            last: first.max(last),
        }
    }

    /// Every line of a document with `line_count` lines.
    pub fn all(line_count: usize) -> Self {
        Self::new(1, line_count.max(1))
    }

    pub fn contains(&self, line: usize) -> bool {
        self.lines().contains(&line)
    }

    pub fn lines(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    /// Grow by `margin` lines each way, clamped to `1..=line_count`.
    pub fn expand(self, margin: usize, line_count: usize) -> Self {
        let max = line_count.max(1);
        Self {
            first: self.first.saturating_sub(margin).clamp(1, max),
            last: self.last.saturating_add(margin).clamp(1, max),
        }
    }
}
