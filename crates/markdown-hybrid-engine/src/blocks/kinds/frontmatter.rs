/// YAML frontmatter at the very top of a document.
pub struct Frontmatter;

impl Frontmatter {
    pub const OPEN: &'static str = "---";
    pub const CLOSE: [&'static str; 2] = ["---", "..."];

    /// Frontmatter only opens on line 1 and only with an exact `---`.
    pub fn opens(line_number: usize, line: &str) -> bool {
        line_number == 1 && line == Self::OPEN
    }

    pub fn closes(line: &str) -> bool {
        Self::CLOSE.contains(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_only_on_first_line() {
        assert!(Frontmatter::opens(1, "---"));
        assert!(!Frontmatter::opens(2, "---"));
        assert!(!Frontmatter::opens(1, "--- "));
        assert!(!Frontmatter::opens(1, "----"));
    }

    #[test]
    fn closes_on_dashes_or_dots() {
        assert!(Frontmatter::closes("---"));
        assert!(Frontmatter::closes("..."));
        assert!(!Frontmatter::closes("...."));
    }
}
