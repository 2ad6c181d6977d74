//! Which lines are under the cursor or selection.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{blocks::BlockRange, buffer::LineBuffer};

/// One selection range as an unordered pair of byte offsets.
///
/// A collapsed range (`anchor == head`) is a plain caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectionRange {
    pub anchor: usize,
    pub head: usize,
}

impl SelectionRange {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    pub fn caret(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub fn from(&self) -> usize {
        self.anchor.min(self.head)
    }

    pub fn to(&self) -> usize {
        self.anchor.max(self.head)
    }
}

/// Set of focused 1-based line numbers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FocusSet(BTreeSet<usize>);

impl FocusSet {
    pub fn contains(&self, line: usize) -> bool {
        self.0.contains(&line)
    }

    /// True if any line of the block is focused.
    ///
    /// Focus is OR over every line: a caret anywhere in a block reveals all of it.
    pub fn touches_block(&self, block: &BlockRange) -> bool {
        self.0.range(block.lines()).next().is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for FocusSet {
    fn from_iter<T: IntoIterator<Item = usize>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Resolve selections into the set of lines they cover.
///
/// Without input focus the set is always empty. Otherwise every line from
/// each range's start line to its end line is included.
pub fn compute_focused_lines(
    buffer: &LineBuffer,
    selections: &[SelectionRange],
    has_focus: bool,
) -> FocusSet {
    if !has_focus {
        return FocusSet::default();
    }

    selections
        .iter()
        .flat_map(|sel| {
            let first = buffer.line_at_offset(sel.from());
            let last = buffer.line_at_offset(sel.to());
            first..=last
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockKind;
    use pretty_assertions::assert_eq;

    fn lines(set: &FocusSet) -> Vec<usize> {
        set.iter().collect()
    }

    #[test]
    fn no_focus_means_no_lines() {
        let buf = LineBuffer::new("a\nb\nc");
        let set = compute_focused_lines(&buf, &[SelectionRange::new(0, 5)], false);
        assert!(set.is_empty());
    }

    #[test]
    fn caret_focuses_its_line() {
        let buf = LineBuffer::new("a\nb\nc");
        let set = compute_focused_lines(&buf, &[SelectionRange::caret(2)], true);
        assert_eq!(lines(&set), vec![2]);
    }

    #[test]
    fn multi_line_selection_covers_every_line() {
        let buf = LineBuffer::new("a\nb\nc\nd");
        let set = compute_focused_lines(&buf, &[SelectionRange::new(6, 0)], true);
        assert_eq!(lines(&set), vec![1, 2, 3, 4]);
    }

    #[test]
    fn ranges_are_unioned() {
        let buf = LineBuffer::new("a\nb\nc\nd\ne");
        let set = compute_focused_lines(
            &buf,
            &[
                SelectionRange::caret(0),
                SelectionRange::new(2, 4),
                SelectionRange::caret(4),
                SelectionRange::caret(8),
            ],
            true,
        );
        assert_eq!(lines(&set), vec![1, 2, 3, 5]);
    }

    #[test]
    fn no_selections_with_focus_is_empty() {
        let buf = LineBuffer::new("a");
        assert!(compute_focused_lines(&buf, &[], true).is_empty());
    }

    #[test]
    fn touches_block_checks_every_line() {
        let block = BlockRange::new(BlockKind::Table, 3, 6);
        let inside: FocusSet = [5].into_iter().collect();
        let before: FocusSet = [2].into_iter().collect();
        let after: FocusSet = [7, 8].into_iter().collect();
        assert!(inside.touches_block(&block));
        assert!(!before.touches_block(&block));
        assert!(!after.touches_block(&block));
    }
}
