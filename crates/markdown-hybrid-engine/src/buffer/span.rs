use serde::Serialize;

/// A byte range `[start, end)` into the buffer.
///
/// Directives and lines carry spans rather than bare offset pairs so that the
/// host can map them straight onto its own document positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns true if `offset` lies inside the span, treating the end as inclusive.
    ///
    /// A caret sitting right after the last character of a line still belongs
    /// to that line, so the end bound is closed here.
    #[must_use]
    pub fn touches(self, offset: usize) -> bool {
        offset >= self.start && offset <= self.end
    }
}

impl From<Span> for std::ops::Range<usize> {
    fn from(span: Span) -> Self {
        span.start..span.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_saturates_on_inverted_span() {
        assert_eq!(Span::new(5, 2).len(), 0);
        assert!(Span::new(5, 2).is_empty());
    }

    #[test]
    fn touches_includes_end() {
        let span = Span::new(3, 7);
        assert!(span.touches(3));
        assert!(span.touches(7));
        assert!(!span.touches(8));
        assert!(!span.touches(2));
    }

    #[test]
    fn converts_to_range() {
        let range: std::ops::Range<usize> = Span::new(1, 4).into();
        assert_eq!(range, 1..4);
    }
}
