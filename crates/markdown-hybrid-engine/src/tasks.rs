//! Task list checkbox tokens (`- [ ] todo`).

use std::sync::OnceLock;

use regex::Regex;

use crate::options::RenderOptions;

fn task_regex() -> &'static Regex {
    static TASK_REGEX: OnceLock<Regex> = OnceLock::new();
    TASK_REGEX.get_or_init(|| {
        Regex::new(r"^(\s*(?:[-*+]|\d+[.)])\s+)\[(.)\]").expect("Invalid task regex")
    })
}

/// A checkbox token found on a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskToken {
    /// Character between the brackets.
    pub marker: char,
    /// Byte offset of the marker character within the line.
    pub marker_offset: usize,
    /// Byte offset just past the closing `]`.
    pub token_end: usize,
}

/// Find the checkbox token after a list marker, if the marker is recognised.
///
/// Plain mode knows `' '`, `'x'` and `'X'`. Custom mode knows exactly the
/// configured `task_markers`.
pub fn find_task_token(line: &str, options: &RenderOptions) -> Option<TaskToken> {
    let caps = task_regex().captures(line)?;
    let marker_match = caps.get(2)?;
    let marker = marker_match.as_str().chars().next()?;
    if !is_known_marker(marker, options) {
        return None;
    }
    Some(TaskToken {
        marker,
        marker_offset: marker_match.start(),
        token_end: marker_match.end() + 1,
    })
}

fn is_known_marker(marker: char, options: &RenderOptions) -> bool {
    if options.custom_task_markers {
        options.task_markers.contains(&marker)
    } else {
        matches!(marker, ' ' | 'x' | 'X')
    }
}

/// The marker that follows `current` when the checkbox is clicked.
///
/// Custom mode cycles through `task_markers` in order and wraps around;
/// an unlisted marker restarts the cycle at the first entry.
pub fn next_marker(current: char, options: &RenderOptions) -> char {
    if options.custom_task_markers && !options.task_markers.is_empty() {
        let markers = &options.task_markers;
        return match markers.iter().position(|m| *m == current) {
            Some(i) => markers[(i + 1) % markers.len()],
            None => markers[0],
        };
    }
    match current {
        ' ' => 'x',
        _ => ' ',
    }
}

/// Rewrite the line with its checkbox advanced, or `None` if it has none.
pub fn toggle_task_line(line: &str, options: &RenderOptions) -> Option<String> {
    let token = find_task_token(line, options)?;
    let next = next_marker(token.marker, options);
    let mut out = String::with_capacity(line.len() + 3);
    out.push_str(&line[..token.marker_offset]);
    out.push(next);
    out.push_str(&line[token.marker_offset + token.marker.len_utf8()..]);
    Some(out)
}

/// Whether a marker counts as done for display purposes.
pub fn is_checked(marker: char) -> bool {
    matches!(marker, 'x' | 'X')
}
