use std::fmt;

use serde::Serialize;

use crate::{
    blocks::BlockIndex,
    buffer::LineBuffer,
    directives::{Payload, RenderDirective, RenderMode},
};

const PREVIEW: usize = 60;

#[derive(Debug, Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
    pub directives: Vec<DirectiveSnap>,
}

#[derive(Debug, Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub lines: (usize, usize),
    pub language: Option<String>,
    pub closed: bool,
}

#[derive(Debug, Serialize)]
pub struct DirectiveSnap {
    pub line: usize,
    pub span: (usize, usize),
    pub mode: String,
    pub text: String,
}

pub fn normalize(buffer: &LineBuffer, index: &BlockIndex, directives: &[RenderDirective]) -> Snap {
    let blocks = index
        .all_ranges()
        .into_iter()
        .map(|b| BlockSnap {
            kind: b.kind.label().to_string(),
            lines: (b.start_line, b.end_line),
            language: b.language.clone(),
            closed: b.closed,
        })
        .collect();

    let directives = directives
        .iter()
        .map(|d| {
            let (mode, text) = match &d.mode {
                RenderMode::Raw { style } => (
                    format!("raw({})", style.label()),
                    buffer.slice(d.span),
                ),
                RenderMode::Elided => ("elided".to_string(), buffer.slice(d.span)),
                RenderMode::Rendered(payload) => describe(payload),
            };
            DirectiveSnap {
                line: d.line,
                span: (d.span.start, d.span.end),
                mode,
                text: preview(&text, PREVIEW),
            }
        })
        .collect();

    Snap { blocks, directives }
}

fn describe(payload: &Payload) -> (String, String) {
    match payload {
        Payload::Line { markup } => ("line".into(), markup.clone()),
        Payload::Code { language, markup } => (format!("code({language})"), markup.clone()),
        Payload::Table { markup } => ("table".into(), markup.clone()),
        Payload::Math { markup } => ("math".into(), markup.clone()),
        Payload::Diagram { key, source } => {
            (format!("diagram({})", key.line), source.replace('\n', "\\n"))
        }
        Payload::Error { message, .. } => ("error".into(), message.clone()),
    }
}

/// Truncates to at most `max` bytes on a char boundary, adding "..." if cut.
pub fn preview(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

impl fmt::Display for Snap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "blocks:")?;
        for b in &self.blocks {
            write!(f, "  {} {}-{}", b.kind, b.lines.0, b.lines.1)?;
            if let Some(lang) = &b.language {
                write!(f, " {lang}")?;
            }
            if !b.closed {
                write!(f, " (unclosed)")?;
            }
            writeln!(f)?;
        }
        write!(f, "directives:")?;
        for d in &self.directives {
            write!(f, "\n  {} {}..{} {}", d.line, d.span.0, d.span.1, d.mode)?;
            if !d.text.is_empty() {
                write!(f, " {}", d.text)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("hello", 10), "hello");
        assert_eq!(preview("hello", 5), "hello");
    }

    #[test]
    fn preview_truncates_long_text() {
        assert_eq!(preview("hello world", 5), "hello...");
        assert_eq!(preview("hello", 0), "...");
    }

    #[test]
    fn preview_respects_char_boundaries() {
        assert_eq!(preview("日本語", 4), "日...");
    }
}
