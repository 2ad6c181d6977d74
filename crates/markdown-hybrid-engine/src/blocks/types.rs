use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Structural category of a block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BlockKind {
    /// Fenced code block (```), including mermaid diagrams.
    CodeBlock,
    /// Display math between `$$` lines.
    MathBlock,
    /// Run of pipe-delimited rows.
    Table,
    /// YAML frontmatter starting on line 1.
    Frontmatter,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] = [
        BlockKind::CodeBlock,
        BlockKind::MathBlock,
        BlockKind::Table,
        BlockKind::Frontmatter,
    ];

    /// Short kebab-case label, used for style classes and snapshots.
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::CodeBlock => "code-block",
            BlockKind::MathBlock => "math-block",
            BlockKind::Table => "table",
            BlockKind::Frontmatter => "frontmatter",
        }
    }
}

/// An inclusive, 1-based line interval classified as one block kind.
///
/// # Invariants
///
/// - `start_line <= end_line`
/// - ranges of the same kind never overlap
/// - a code block's `start_line`/`end_line` are its fence lines, except that
///   an unclosed fence ends at the last line of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockRange {
    pub start_line: usize,
    pub end_line: usize,
    pub kind: BlockKind,
    /// Language tag of a code block's opening fence.
    pub language: Option<String>,
    /// False only for a code fence that runs to end of document.
    pub closed: bool,
}

impl BlockRange {
    pub(crate) fn new(kind: BlockKind, start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
            kind,
            language: None,
            closed: true,
        }
    }

    pub fn lines(&self) -> RangeInclusive<usize> {
        self.start_line..=self.end_line
    }

    pub fn contains(&self, line: usize) -> bool {
        self.lines().contains(&line)
    }

    pub fn line_count(&self) -> usize {
        self.end_line - self.start_line + 1
    }

    /// Content lines between the delimiters.
    ///
    /// For an unclosed fence every line after the opener is content. Tables
    /// and frontmatter have no delimiters worth skipping, so this is only
    /// meaningful for code and math blocks.
    pub fn interior(&self) -> RangeInclusive<usize> {
        let last = if self.closed {
            self.end_line.saturating_sub(1)
        } else {
            self.end_line
        };
        (self.start_line + 1)..=last
    }

    pub fn has_interior(&self) -> bool {
        !self.interior().is_empty()
    }

    pub fn is_mermaid(&self) -> bool {
        self.kind == BlockKind::CodeBlock
            && super::kinds::CodeFence::is_mermaid(self.language.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_of_closed_block() {
        let r = BlockRange::new(BlockKind::CodeBlock, 3, 6);
        assert_eq!(r.interior(), 4..=5);
        assert!(r.has_interior());
    }

    #[test]
    fn empty_fence_pair_has_no_interior() {
        let r = BlockRange::new(BlockKind::CodeBlock, 1, 2);
        assert!(!r.has_interior());
    }

    #[test]
    fn unclosed_block_interior_runs_to_end() {
        let mut r = BlockRange::new(BlockKind::CodeBlock, 1, 2);
        r.closed = false;
        assert_eq!(r.interior(), 2..=2);
    }

    #[test]
    fn unclosed_single_line_fence_has_no_interior() {
        let mut r = BlockRange::new(BlockKind::CodeBlock, 4, 4);
        r.closed = false;
        assert!(!r.has_interior());
    }
}
