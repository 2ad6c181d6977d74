//! Renderer calls that never fail.
//!
//! Each helper invokes one renderer method and, on error, substitutes a
//! [`Payload::Error`] carrying the message and the escaped source, so one
//! bad block cannot abort the rest of the pass.

use html_escape::{encode_double_quoted_attribute, encode_text};
use log::warn;

use crate::directives::Payload;

use super::{MarkupRenderer, RenderContext, RenderError};

pub fn line_payload(renderer: &dyn MarkupRenderer, text: &str, ctx: &RenderContext<'_>) -> Payload {
    match renderer.render_line(text, ctx) {
        Ok(markup) => Payload::Line { markup },
        Err(err) => error_payload(&err, text),
    }
}

pub fn code_payload(
    renderer: &dyn MarkupRenderer,
    text: &str,
    language: &str,
    ctx: &RenderContext<'_>,
) -> Payload {
    match renderer.render_code(text, language, ctx) {
        Ok(markup) => Payload::Code {
            language: language.to_string(),
            markup,
        },
        Err(err) => error_payload(&err, text),
    }
}

pub fn table_payload(
    renderer: &dyn MarkupRenderer,
    rows: &[&str],
    ctx: &RenderContext<'_>,
) -> Payload {
    match renderer.render_table(rows, ctx) {
        Ok(markup) => Payload::Table { markup },
        Err(err) => error_payload(&err, &rows.join("\n")),
    }
}

pub fn math_payload(renderer: &dyn MarkupRenderer, text: &str, ctx: &RenderContext<'_>) -> Payload {
    match renderer.render_math(text, ctx) {
        Ok(markup) => Payload::Math { markup },
        Err(err) => error_payload(&err, text),
    }
}

/// Inline error markup: the message as a tooltip over the raw source.
pub fn error_markup(message: &str, source: &str) -> String {
    format!(
        r#"<span class="render-error" title="{}"><code>{}</code></span>"#,
        encode_double_quoted_attribute(message),
        encode_text(source)
    )
}

pub fn error_payload(err: &RenderError, source: &str) -> Payload {
    let message = err.to_string();
    warn!("{message}");
    Payload::Error {
        markup: error_markup(&message, source),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{options::RenderOptions, render::HtmlRenderer};
    use pretty_assertions::assert_eq;

    struct FailingRenderer;

    impl MarkupRenderer for FailingRenderer {
        fn render_line(&self, _: &str, _: &RenderContext<'_>) -> Result<String, RenderError> {
            Err(RenderError::Line("boom".into()))
        }
        fn render_table(&self, _: &[&str], _: &RenderContext<'_>) -> Result<String, RenderError> {
            Err(RenderError::Table("boom".into()))
        }
        fn render_math(&self, _: &str, _: &RenderContext<'_>) -> Result<String, RenderError> {
            Err(RenderError::Math("boom".into()))
        }
        fn render_code(
            &self,
            _: &str,
            _: &str,
            _: &RenderContext<'_>,
        ) -> Result<String, RenderError> {
            Err(RenderError::Code("boom".into()))
        }
    }

    #[test]
    fn success_wraps_markup() {
        let opts = RenderOptions::default();
        let ctx = RenderContext::new(&opts);
        assert_eq!(
            code_payload(&HtmlRenderer, "x", "rs", &ctx),
            Payload::Code {
                language: "rs".into(),
                markup: r#"<code class="language-rs">x</code>"#.into()
            }
        );
    }

    #[test]
    fn failure_becomes_error_payload() {
        let opts = RenderOptions::default();
        let ctx = RenderContext::new(&opts);
        let payload = math_payload(&FailingRenderer, "a<b", &ctx);
        assert_eq!(
            payload,
            Payload::Error {
                message: "Failed to typeset math: boom".into(),
                markup: r#"<span class="render-error" title="Failed to typeset math: boom"><code>a&lt;b</code></span>"#.into(),
            }
        );
    }

    #[test]
    fn table_error_keeps_every_row() {
        let opts = RenderOptions::default();
        let ctx = RenderContext::new(&opts);
        let payload = table_payload(&FailingRenderer, &["|a|", "|b|"], &ctx);
        assert!(payload.markup().unwrap().contains("|a|\n|b|"));
    }
}
