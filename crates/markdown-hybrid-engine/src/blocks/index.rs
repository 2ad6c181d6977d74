use std::collections::HashSet;

use super::types::{BlockKind, BlockRange};

/// Every block range of a buffer plus per-kind line membership sets.
///
/// A pure function of the buffer text: two indexes built from the same text
/// compare equal. Selection and focus never feed into it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockIndex {
    code_blocks: Vec<BlockRange>,
    math_blocks: Vec<BlockRange>,
    tables: Vec<BlockRange>,
    frontmatter: Option<BlockRange>,
    code_lines: HashSet<usize>,
    mermaid_lines: HashSet<usize>,
    math_lines: HashSet<usize>,
    table_lines: HashSet<usize>,
    frontmatter_lines: HashSet<usize>,
}

impl BlockIndex {
    pub(crate) fn from_ranges(
        code_blocks: Vec<BlockRange>,
        math_blocks: Vec<BlockRange>,
        tables: Vec<BlockRange>,
        frontmatter: Option<BlockRange>,
    ) -> Self {
        let code_lines = expand(&code_blocks);
        let mermaid_lines = code_blocks
            .iter()
            .filter(|r| r.is_mermaid())
            .flat_map(BlockRange::lines)
            .collect();
        let math_lines = expand(&math_blocks);
        let table_lines = expand(&tables);
        let frontmatter_lines = expand(frontmatter.as_slice());

        Self {
            code_blocks,
            math_blocks,
            tables,
            frontmatter,
            code_lines,
            mermaid_lines,
            math_lines,
            table_lines,
            frontmatter_lines,
        }
    }

    /// All fenced code blocks, mermaid ones included.
    pub fn code_blocks(&self) -> &[BlockRange] {
        &self.code_blocks
    }

    /// The mermaid-tagged subset of [`Self::code_blocks`].
    pub fn mermaid_blocks(&self) -> impl Iterator<Item = &BlockRange> + '_ {
        self.code_blocks.iter().filter(|r| r.is_mermaid())
    }

    pub fn math_blocks(&self) -> &[BlockRange] {
        &self.math_blocks
    }

    pub fn tables(&self) -> &[BlockRange] {
        &self.tables
    }

    pub fn frontmatter(&self) -> Option<&BlockRange> {
        self.frontmatter.as_ref()
    }

    pub fn ranges(&self, kind: BlockKind) -> &[BlockRange] {
        match kind {
            BlockKind::CodeBlock => &self.code_blocks,
            BlockKind::MathBlock => &self.math_blocks,
            BlockKind::Table => &self.tables,
            BlockKind::Frontmatter => self.frontmatter.as_slice(),
        }
    }

    /// Every range of every kind, ordered by start line.
    pub fn all_ranges(&self) -> Vec<&BlockRange> {
        let mut all: Vec<&BlockRange> = BlockKind::ALL
            .iter()
            .flat_map(|k| self.ranges(*k))
            .collect();
        all.sort_by_key(|r| (r.start_line, r.end_line));
        all
    }

    pub fn members(&self, kind: BlockKind) -> &HashSet<usize> {
        match kind {
            BlockKind::CodeBlock => &self.code_lines,
            BlockKind::MathBlock => &self.math_lines,
            BlockKind::Table => &self.table_lines,
            BlockKind::Frontmatter => &self.frontmatter_lines,
        }
    }

    pub fn is_member(&self, kind: BlockKind, line: usize) -> bool {
        self.members(kind).contains(&line)
    }

    pub fn is_mermaid_line(&self, line: usize) -> bool {
        self.mermaid_lines.contains(&line)
    }

    pub fn mermaid_lines(&self) -> &HashSet<usize> {
        &self.mermaid_lines
    }

    /// The block kind a line belongs to, or `None` for a plain line.
    pub fn kind_of_line(&self, line: usize) -> Option<BlockKind> {
        BlockKind::ALL
            .into_iter()
            .find(|k| self.is_member(*k, line))
    }

    pub fn is_plain(&self, line: usize) -> bool {
        self.kind_of_line(line).is_none()
    }

    /// The range containing `line`, if any.
    pub fn block_at(&self, line: usize) -> Option<&BlockRange> {
        let kind = self.kind_of_line(line)?;
        self.ranges(kind).iter().find(|r| r.contains(line))
    }
}

fn expand(ranges: &[BlockRange]) -> HashSet<usize> {
    ranges.iter().flat_map(BlockRange::lines).collect()
}
