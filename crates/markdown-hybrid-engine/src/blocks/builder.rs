use std::collections::HashSet;

use log::{debug, trace};

use crate::buffer::LineBuffer;

use super::{
    classify::{LineClass, MarkdownLineClassifier},
    index::BlockIndex,
    kinds::{CodeFence, Frontmatter},
    types::{BlockKind, BlockRange},
};

/// Builds the [`BlockIndex`] for a buffer in one forward sweep per kind.
///
/// Never fails: malformed markup degrades to "no block detected", except for
/// an unterminated fence which runs to the end of the document.
pub fn compute_block_index(buffer: &LineBuffer) -> BlockIndex {
    let classifier = MarkdownLineClassifier;
    let classes: Vec<LineClass> = buffer.lines().map(|lr| classifier.classify(lr)).collect();
    let last_line = buffer.line_count();

    let frontmatter = scan_frontmatter(buffer);
    let body_start = frontmatter.as_ref().map_or(1, |r| r.end_line + 1);
    let body = classes.iter().filter(move |c| c.line >= body_start);

    let mut fences = FenceBuilder::new();
    for c in body.clone() {
        fences.push(c);
    }
    let code_blocks = fences.finish(last_line);
    let code_lines: HashSet<usize> = code_blocks.iter().flat_map(BlockRange::lines).collect();

    let mut math = MathBuilder::default();
    for c in body.clone() {
        math.push(c, code_lines.contains(&c.line));
    }
    let math_blocks = math.finish();
    let math_lines: HashSet<usize> = math_blocks.iter().flat_map(BlockRange::lines).collect();

    let mut tables = TableBuilder::default();
    for c in body {
        tables.push(c, code_lines.contains(&c.line) || math_lines.contains(&c.line));
    }
    let tables = tables.finish();

    debug!(
        "indexed {} lines: {} code, {} math, {} table, frontmatter={}",
        last_line,
        code_blocks.len(),
        math_blocks.len(),
        tables.len(),
        frontmatter.is_some()
    );

    BlockIndex::from_ranges(code_blocks, math_blocks, tables, frontmatter)
}

/// Frontmatter needs a closing marker; without one there is no range at all.
fn scan_frontmatter(buffer: &LineBuffer) -> Option<BlockRange> {
    if !Frontmatter::opens(1, buffer.line_text(1)) {
        return None;
    }
    buffer
        .lines()
        .skip(1)
        .find(|lr| Frontmatter::closes(&lr.text))
        .map(|lr| BlockRange::new(BlockKind::Frontmatter, 1, lr.number))
}

#[derive(Debug, Clone)]
enum FenceState {
    None,
    Open {
        start: usize,
        language: Option<String>,
    },
}

/// Toggles fence state on every fence-looking line.
pub struct FenceBuilder {
    state: FenceState,
    out: Vec<BlockRange>,
}

impl FenceBuilder {
    pub fn new() -> Self {
        Self {
            state: FenceState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass) {
        let Some(sig) = &c.fence_sig else {
            return;
        };

        match std::mem::replace(&mut self.state, FenceState::None) {
            FenceState::None => {
                self.state = FenceState::Open {
                    start: c.line,
                    language: CodeFence::language(sig),
                };
            }
            FenceState::Open { start, language } => {
                let mut range = BlockRange::new(BlockKind::CodeBlock, start, c.line);
                range.language = language;
                self.out.push(range);
            }
        }
    }

    pub fn finish(mut self, last_line: usize) -> Vec<BlockRange> {
        // Unterminated fence: emit through end of document
        if let FenceState::Open { start, language } =
            std::mem::replace(&mut self.state, FenceState::None)
        {
            let mut range = BlockRange::new(BlockKind::CodeBlock, start, last_line);
            range.language = language;
            range.closed = false;
            self.out.push(range);
        }
        self.out
    }
}

impl Default for FenceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Pairs `$$` delimiters outside code blocks.
#[derive(Default)]
pub struct MathBuilder {
    open: Option<usize>,
    out: Vec<BlockRange>,
}

impl MathBuilder {
    pub fn push(&mut self, c: &LineClass, in_code: bool) {
        if in_code {
            // Entering code abandons an open math region; it is not closed.
            if let Some(start) = self.open.take() {
                trace!("math region opened at line {start} abandoned at code line {}", c.line);
            }
            return;
        }
        if !c.is_math_delimiter {
            return;
        }
        match self.open.take() {
            None => self.open = Some(c.line),
            Some(start) => self
                .out
                .push(BlockRange::new(BlockKind::MathBlock, start, c.line)),
        }
    }

    /// An unmatched opening delimiter yields no range.
    pub fn finish(self) -> Vec<BlockRange> {
        self.out
    }
}

/// Groups maximal runs of consecutive table rows.
#[derive(Default)]
pub struct TableBuilder {
    run: Option<(usize, usize)>,
    out: Vec<BlockRange>,
}

impl TableBuilder {
    pub fn push(&mut self, c: &LineClass, excluded: bool) {
        if c.is_table_row && !excluded {
            self.run = match self.run {
                Some((start, _)) => Some((start, c.line)),
                None => Some((c.line, c.line)),
            };
        } else {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if let Some((start, end)) = self.run.take() {
            self.out.push(BlockRange::new(BlockKind::Table, start, end));
        }
    }

    pub fn finish(mut self) -> Vec<BlockRange> {
        self.flush();
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn index(text: &str) -> BlockIndex {
        compute_block_index(&LineBuffer::new(text))
    }

    fn spans(ranges: &[BlockRange]) -> Vec<(usize, usize)> {
        ranges.iter().map(|r| (r.start_line, r.end_line)).collect()
    }

    #[test]
    fn closed_fence_spans_fence_lines() {
        let idx = index("intro\n```js\nconsole.log(1)\n```\nafter");
        assert_eq!(spans(idx.code_blocks()), vec![(2, 4)]);
        let block = &idx.code_blocks()[0];
        assert_eq!(block.language.as_deref(), Some("js"));
        assert!(block.closed);
    }

    #[test]
    fn unterminated_fence_runs_to_end() {
        let idx = index("```py\ncode");
        assert_eq!(spans(idx.code_blocks()), vec![(1, 2)]);
        assert_eq!(idx.code_blocks()[0].language.as_deref(), Some("py"));
        assert!(!idx.code_blocks()[0].closed);
    }

    #[test]
    fn unterminated_fence_includes_trailing_empty_line() {
        let idx = index("```\nx\n");
        assert_eq!(spans(idx.code_blocks()), vec![(1, 3)]);
    }

    #[test]
    fn consecutive_fences_pair_up() {
        let idx = index("```\na\n```\n```rust\nb\n```");
        assert_eq!(spans(idx.code_blocks()), vec![(1, 3), (4, 6)]);
        assert_eq!(idx.code_blocks()[1].language.as_deref(), Some("rust"));
    }

    #[test]
    fn mermaid_is_subset_of_code() {
        let idx = index("```mermaid\ngraph TD\n```\n```js\nx\n```");
        assert_eq!(idx.mermaid_blocks().count(), 1);
        for line in 1..=3 {
            assert!(idx.is_mermaid_line(line));
            assert!(idx.is_member(BlockKind::CodeBlock, line));
        }
        assert!(!idx.is_mermaid_line(5));
    }

    #[test]
    fn math_block_between_delimiters() {
        let idx = index("$$\nx^2\n$$");
        assert_eq!(spans(idx.math_blocks()), vec![(1, 3)]);
    }

    #[test]
    fn padded_dollar_lines_are_not_math() {
        let idx = index("  $$ \nx\n $$");
        assert!(idx.math_blocks().is_empty());
    }

    #[test]
    fn unmatched_math_delimiter_yields_nothing() {
        let idx = index("$$\nx^2");
        assert!(idx.math_blocks().is_empty());
    }

    #[test]
    fn math_delimiters_inside_code_are_ignored() {
        let idx = index("```\n$$\n```\n$$\na\n$$");
        assert_eq!(spans(idx.math_blocks()), vec![(4, 6)]);
    }

    #[test]
    fn entering_code_abandons_open_math() {
        // Line 1 opens math and the fence on line 3 abandons it. Line 6 opens
        // a new region that line 8 closes. Line 1 never joins a range.
        let idx = index("$$\na\n```\n$$\n```\n$$\nb\n$$");
        assert_eq!(spans(idx.math_blocks()), vec![(6, 8)]);
        assert!(!idx.is_member(BlockKind::MathBlock, 1));
    }

    #[test]
    fn table_runs_are_maximal() {
        let idx = index("| a | b |\n| - | - |\n| 1 | 2 |\n\n| c |");
        assert_eq!(spans(idx.tables()), vec![(1, 3), (5, 5)]);
    }

    #[test]
    fn code_line_breaks_table_run() {
        let idx = index("| a |\n```\n| b |\n```\n| c |");
        assert_eq!(spans(idx.tables()), vec![(1, 1), (5, 5)]);
    }

    #[test]
    fn table_rows_inside_math_are_not_tables() {
        let idx = index("$$\n|x|\n$$");
        assert!(idx.tables().is_empty());
    }

    #[test]
    fn frontmatter_with_dashes_or_dots() {
        assert_eq!(
            index("---\ntitle: x\n---\nbody").frontmatter().map(|r| r.end_line),
            Some(3)
        );
        assert_eq!(
            index("---\ntitle: x\n...\nbody").frontmatter().map(|r| r.end_line),
            Some(3)
        );
    }

    #[test]
    fn unterminated_frontmatter_is_absent() {
        assert!(index("---\ntitle: x\nbody").frontmatter().is_none());
    }

    #[test]
    fn frontmatter_must_start_on_line_one() {
        assert!(index("\n---\na: b\n---").frontmatter().is_none());
    }

    #[test]
    fn fences_inside_frontmatter_are_ignored() {
        let idx = index("---\n```\n---\ntext");
        assert!(idx.code_blocks().is_empty());
        assert_eq!(idx.kind_of_line(2), Some(BlockKind::Frontmatter));
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let text = "---\na: 1\n---\n```js\nx\n```\n$$\ny\n$$\n| a |\n| b |\n";
        assert_eq!(index(text), index(text));
    }

    #[test]
    fn empty_document_has_no_blocks() {
        let idx = index("");
        assert!(idx.all_ranges().is_empty());
        assert!(idx.is_plain(1));
    }

    #[test]
    fn block_at_finds_containing_range() {
        let idx = index("text\n| a |\n| b |");
        assert_eq!(idx.block_at(3).map(|r| r.start_line), Some(2));
        assert!(idx.block_at(1).is_none());
    }
}
