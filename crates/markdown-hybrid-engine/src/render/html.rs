use futures::{FutureExt, future::BoxFuture};
use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{Options, Parser, html};

use crate::{
    blocks::kinds::Table,
    tasks::{TaskToken, find_task_token, is_checked},
};

use super::{DiagramRenderer, MarkupRenderer, RenderContext, RenderError};

/// Default renderer producing HTML fragments.
///
/// Lines go through pulldown-cmark one at a time, so block constructs that
/// span lines (lists, quotes) render as single-item fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn render_task(line: &str, token: TaskToken) -> String {
        let rest = line.get(token.token_end..).unwrap_or("").trim_start();
        let state = if is_checked(token.marker) {
            "task task-done"
        } else {
            "task"
        };
        let glyph = match token.marker {
            ' ' => '☐',
            'x' | 'X' => '☑',
            _ => '◩',
        };
        format!(
            r#"<span class="{state}"><span class="task-checkbox" data-marker="{marker}">{glyph}</span> {content}</span>"#,
            marker = encode_double_quoted_attribute(&token.marker.to_string()),
            content = render_inline(rest),
        )
    }
}

impl MarkupRenderer for HtmlRenderer {
    fn render_line(&self, text: &str, ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        if let Some(token) = find_task_token(text, ctx.options) {
            return Ok(Self::render_task(text, token));
        }
        Ok(render_markdown(text))
    }

    fn render_table(&self, rows: &[&str], _ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        if rows.is_empty() {
            return Err(RenderError::Table("table has no rows".to_string()));
        }

        let mut out = String::from("<table>");
        let mut body_open = false;
        for (i, row) in rows.iter().enumerate() {
            if i > 0 && Table::is_separator(row) {
                continue;
            }
            let cells = Table::cells(row);
            if i == 0 {
                out.push_str("<thead><tr>");
                for cell in &cells {
                    out.push_str(&format!("<th>{}</th>", render_inline(cell)));
                }
                out.push_str("</tr></thead>");
                continue;
            }
            if !body_open {
                out.push_str("<tbody>");
                body_open = true;
            }
            out.push_str("<tr>");
            for cell in &cells {
                out.push_str(&format!("<td>{}</td>", render_inline(cell)));
            }
            out.push_str("</tr>");
        }
        if body_open {
            out.push_str("</tbody>");
        }
        out.push_str("</table>");
        Ok(out)
    }

    fn render_math(&self, text: &str, _ctx: &RenderContext<'_>) -> Result<String, RenderError> {
        check_braces(text).map_err(RenderError::Math)?;
        Ok(format!(
            r#"<div class="math math-display">{}</div>"#,
            encode_text(text)
        ))
    }

    fn render_code(
        &self,
        text: &str,
        language: &str,
        _ctx: &RenderContext<'_>,
    ) -> Result<String, RenderError> {
        if language.is_empty() {
            return Ok(format!("<code>{}</code>", encode_text(text)));
        }
        Ok(format!(
            r#"<code class="language-{}">{}</code>"#,
            encode_double_quoted_attribute(language),
            encode_text(text)
        ))
    }
}

/// Diagram renderer that resolves immediately with the escaped source.
///
/// Useful for hosts without a diagram engine, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceDiagramRenderer;

impl DiagramRenderer for SourceDiagramRenderer {
    fn render_diagram(&self, source: &str) -> BoxFuture<'static, Result<String, RenderError>> {
        let html = format!(r#"<pre class="mermaid">{}</pre>"#, encode_text(source));
        futures::future::ready(Ok(html)).boxed()
    }
}

fn markdown_options() -> Options {
    Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, markdown_options());
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out.trim_end().to_string()
}

/// Renders inline content, dropping the paragraph wrapper.
fn render_inline(text: &str) -> String {
    let html = render_markdown(text);
    match html.strip_prefix("<p>").and_then(|s| s.strip_suffix("</p>")) {
        Some(inner) => inner.to_string(),
        None => html,
    }
}

/// Rejects TeX with unbalanced braces; escaped braces do not count.
fn check_braces(tex: &str) -> Result<(), String> {
    let mut depth: i64 = 0;
    let mut chars = tex.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err("unexpected '}'".to_string());
                }
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(format!("{depth} unclosed '{{'"));
    }
    Ok(())
}
