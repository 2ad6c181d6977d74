/// Pipe table syntax knowledge.
pub struct Table;

impl Table {
    pub const PIPE: char = '|';

    /// A row is a line that, once trimmed, starts and ends with a pipe.
    pub fn is_row(line: &str) -> bool {
        let t = line.trim();
        t.starts_with(Self::PIPE) && t.ends_with(Self::PIPE)
    }

    /// Splits a row into trimmed cell texts.
    ///
    /// Escaped pipes (`\|`) stay inside their cell.
    pub fn cells(row: &str) -> Vec<String> {
        let t = row.trim();
        let inner = t.strip_prefix(Self::PIPE).unwrap_or(t);
        let inner = inner.strip_suffix(Self::PIPE).unwrap_or(inner);

        let mut cells = Vec::new();
        let mut current = String::new();
        let mut chars = inner.chars().peekable();
        while let Some(c) = chars.next() {
            match c {
                '\\' if chars.peek() == Some(&Self::PIPE) => {
                    current.push(Self::PIPE);
                    chars.next();
                }
                Self::PIPE => cells.push(std::mem::take(&mut current).trim().to_string()),
                _ => current.push(c),
            }
        }
        cells.push(current.trim().to_string());
        cells
    }

    /// True for the header separator row, e.g. `| --- | :-: |`.
    pub fn is_separator(row: &str) -> bool {
        let cells = Self::cells(row);
        !cells.is_empty()
            && cells.iter().all(|c| {
                !c.is_empty() && c.contains('-') && c.chars().all(|ch| matches!(ch, '-' | ':'))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("| a | b |", true)]
    #[case("  |a|  ", true)]
    #[case("||", true)]
    #[case("|", true)]
    #[case("", false)]
    #[case("a | b", false)]
    #[case("| a | b", false)]
    fn row_detection(#[case] line: &str, #[case] expected: bool) {
        assert_eq!(Table::is_row(line), expected);
    }

    #[test]
    fn splits_cells() {
        assert_eq!(Table::cells("| a | b c |"), vec!["a", "b c"]);
    }

    #[test]
    fn keeps_escaped_pipes() {
        assert_eq!(Table::cells(r"| a \| b | c |"), vec!["a | b", "c"]);
    }

    #[rstest]
    #[case("| --- | --- |", true)]
    #[case("|:-:|--:|", true)]
    #[case("| a | --- |", false)]
    #[case("| : | --- |", false)]
    fn separator_detection(#[case] row: &str, #[case] expected: bool) {
        assert_eq!(Table::is_separator(row), expected);
    }
}
