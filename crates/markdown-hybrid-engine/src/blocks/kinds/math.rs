/// Display math block delimited by `$$` lines.
pub struct MathBlock;

impl MathBlock {
    pub const DELIMITER: &'static str = "$$";

    /// A delimiter line is exactly `$$`, with no surrounding whitespace.
    pub fn is_delimiter(line: &str) -> bool {
        line == Self::DELIMITER
    }
}
