use crate::buffer::LineRef;

use super::kinds::{CodeFence, FenceSig, MathBlock, Table};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of indexing: each line is classified independently
/// without reference to surrounding context. The passes in `builder`
/// resolve context (fence state, runs of rows) afterwards.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// 1-based line number.
    pub line: usize,
    /// If the line looks like a fence opener/closer.
    pub fence_sig: Option<FenceSig>,
    /// Whether the line is a `$$` delimiter.
    pub is_math_delimiter: bool,
    /// Whether the line looks like a pipe table row.
    pub is_table_row: bool,
}

/// Classifies individual lines for the indexing passes.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`] containing local facts.
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        LineClass {
            line: lr.number,
            fence_sig: CodeFence::sig(&lr.text),
            is_math_delimiter: MathBlock::is_delimiter(&lr.text),
            is_table_row: Table::is_row(&lr.text),
        }
    }
}
