//! Flattening rendered HTML fragments into terminal text.

use std::sync::OnceLock;

use html_escape::decode_html_entities;
use regex::Regex;

fn tag_regex() -> &'static Regex {
    static TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    TAG_REGEX.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"))
}

/// Strip tags and decode entities. Table rows become separate lines with
/// ` | ` between cells; everything else stays on one line.
pub fn markup_to_lines(markup: &str) -> Vec<String> {
    let marked = markup
        .replace("</tr>", "\n")
        .replace("</th>", " | ")
        .replace("</td>", " | ");
    let stripped = tag_regex().replace_all(&marked, "");
    decode_html_entities(&stripped)
        .lines()
        .map(|l| l.trim_end_matches(" | ").trim_end().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// Heading level of a rendered line, if it is a heading.
pub fn heading_level(markup: &str) -> Option<u8> {
    let rest = markup.strip_prefix("<h")?;
    let level = rest.chars().next()?.to_digit(10)?;
    (1..=6).contains(&level).then_some(level as u8)
}
