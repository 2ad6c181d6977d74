use std::collections::HashSet;

use crate::{
    blocks::{BlockIndex, BlockKind},
    buffer::LineBuffer,
    directives::RenderDirective,
};

/// Validates block index invariants.
///
/// Asserts that:
/// - Every range is non-empty and within the document's lines
/// - Ranges of the same kind are sorted and never overlap
/// - Each line belongs to at most one block kind
/// - Mermaid lines are a subset of code-block lines
/// - Frontmatter, if any, starts on line 1
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(buffer: &LineBuffer, index: &BlockIndex) {
    let line_count = buffer.line_count();

    for kind in BlockKind::ALL {
        let mut prev_end = 0;
        for r in index.ranges(kind) {
            assert!(
                1 <= r.start_line && r.start_line <= r.end_line && r.end_line <= line_count,
                "{} range out of bounds: {}..={} (lines: {})",
                kind.label(),
                r.start_line,
                r.end_line,
                line_count
            );
            assert!(
                r.start_line > prev_end,
                "{} ranges overlap or are unsorted at line {}",
                kind.label(),
                r.start_line
            );
            prev_end = r.end_line;
        }
    }

    for line in 1..=line_count {
        let kinds: Vec<_> = BlockKind::ALL
            .into_iter()
            .filter(|k| index.is_member(*k, line))
            .collect();
        assert!(kinds.len() <= 1, "line {line} classified as {kinds:?}");
    }

    assert!(
        index.mermaid_lines().is_subset(index.members(BlockKind::CodeBlock)),
        "mermaid lines outside code blocks"
    );

    if let Some(fm) = index.frontmatter() {
        assert_eq!(fm.start_line, 1, "frontmatter must start on line 1");
    }
}

/// Validates a directive list against its buffer.
///
/// Asserts spans are in bounds and match their line, the list is sorted by
/// span start, and no line has more than one directive.
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check_directives(buffer: &LineBuffer, directives: &[RenderDirective]) {
    let mut seen = HashSet::new();
    let mut prev_start = 0;
    for d in directives {
        let line = buffer
            .line(d.line)
            .unwrap_or_else(|| panic!("directive for missing line {}", d.line));
        assert_eq!(d.span, line.span, "directive span differs from line {}", d.line);
        assert!(
            d.span.start >= prev_start,
            "directives not sorted at line {}",
            d.line
        );
        assert!(seen.insert(d.line), "two directives for line {}", d.line);
        prev_start = d.span.start;
    }
}
