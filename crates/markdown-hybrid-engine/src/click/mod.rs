//! # Click Handling
//!
//! Maps a click on a rendered widget to the request the host should issue.
//!
//! ## Modules
//!
//! - **`position`**: proportional click-x to buffer offset estimate
//!
//! Special targets win over plain text, checked in order: footnote
//! reference, hyperlink, checkbox glyph.

pub mod position;

use regex::Regex;
use serde::Serialize;

use crate::{
    buffer::{Edit, LineBuffer},
    options::RenderOptions,
    tasks::toggle_task_line,
};

pub use position::map_click_to_offset;

/// What a host saw under the pointer when a widget was clicked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetClick {
    /// Label of a footnote reference (`[^label]`) under the pointer.
    pub footnote: Option<String>,
    pub link: Option<String>,
    pub on_checkbox: bool,
    /// Pointer x relative to the widget's left edge.
    pub x: f64,
    pub width: f64,
}

impl WidgetClick {
    pub fn at(x: f64, width: f64) -> Self {
        Self {
            x,
            width,
            ..Self::default()
        }
    }

    /// The target that takes precedence for this click.
    pub fn target(&self) -> ClickTarget {
        if let Some(label) = &self.footnote {
            return ClickTarget::Footnote {
                label: label.clone(),
            };
        }
        if let Some(href) = &self.link {
            return ClickTarget::Link { href: href.clone() };
        }
        if self.on_checkbox {
            return ClickTarget::Checkbox;
        }
        ClickTarget::Text {
            x: self.x,
            width: self.width,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    Footnote { label: String },
    Link { href: String },
    Checkbox,
    Text { x: f64, width: f64 },
}

/// Request the host should issue in response to a click.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ClickAction {
    Select {
        anchor: usize,
        scroll_into_view: bool,
    },
    OpenExternal(String),
    Edit(Edit),
    Ignore,
}

/// Resolve a click on the widget drawn over `line`.
pub fn resolve_click(
    buffer: &LineBuffer,
    line: usize,
    target: &ClickTarget,
    options: &RenderOptions,
) -> ClickAction {
    match target {
        ClickTarget::Footnote { label } => match find_footnote_definition(buffer, label) {
            Some(anchor) => ClickAction::Select {
                anchor,
                scroll_into_view: true,
            },
            None => ClickAction::Ignore,
        },
        ClickTarget::Link { href } => ClickAction::OpenExternal(href.clone()),
        ClickTarget::Checkbox => {
            let Some(line) = buffer.line(line) else {
                return ClickAction::Ignore;
            };
            match toggle_task_line(&line.text, options) {
                Some(text) => {
                    ClickAction::Edit(Edit::replace(line.span.start, line.span.end, text))
                }
                None => ClickAction::Ignore,
            }
        }
        ClickTarget::Text { x, width } => match buffer.line(line) {
            Some(line) => ClickAction::Select {
                anchor: map_click_to_offset(*x, *width, &line.text, line.span.start),
                scroll_into_view: false,
            },
            None => ClickAction::Ignore,
        },
    }
}

/// Offset of the first line defining footnote `label` (`[^label]: ...`).
pub fn find_footnote_definition(buffer: &LineBuffer, label: &str) -> Option<usize> {
    let pattern = format!(r"^\[\^{}\]:", regex::escape(label));
    let re = Regex::new(&pattern).ok()?;
    buffer
        .lines()
        .find(|l| re.is_match(&l.text))
        .map(|l| l.span.start)
}

/// Label of the first footnote reference on a line, if any.
pub fn footnote_reference(line: &str) -> Option<String> {
    let start = line.find("[^")?;
    let rest = &line[start + 2..];
    let end = rest.find(']')?;
    // a definition line is not a reference
    if start == 0 && rest[end + 1..].starts_with(':') {
        return None;
    }
    let label = &rest[..end];
    (!label.is_empty()).then(|| label.to_string())
}
