//! # Render Decision Engine
//!
//! Turns a [`BlockIndex`], a [`FocusSet`] and the visible line range into the
//! ordered list of [`RenderDirective`]s a host realizes as widgets.
//!
//! ## Policy
//!
//! - **Plain lines**: rendered one by one, viewport only. Focused and blank
//!   lines are left alone.
//! - **Blocks**: focused if any line is focused. Focused blocks show raw with
//!   a style tag; unfocused blocks collapse according to their kind.
//! - **Frontmatter**: always raw.
//!
//! Block directives cover whole blocks regardless of the viewport.

pub mod types;

use log::debug;

use crate::{
    blocks::{BlockIndex, BlockRange},
    buffer::{LineBuffer, Span},
    focus::FocusSet,
    options::RenderOptions,
    render::{
        MarkupRenderer, RenderContext,
        dispatch::{code_payload, line_payload, math_payload, table_payload},
    },
};

pub use types::{DiagramKey, LineRange, Payload, RenderDirective, RenderMode};

/// Inputs for one recomputation. Borrowed for the duration of the pass.
pub struct DirectivePass<'a> {
    pub buffer: &'a LineBuffer,
    pub index: &'a BlockIndex,
    pub focus: &'a FocusSet,
    pub renderer: &'a dyn MarkupRenderer,
    pub options: &'a RenderOptions,
}

impl<'a> DirectivePass<'a> {
    /// Compute directives for `viewport`, sorted by span start.
    ///
    /// Raw mode yields no directives at all.
    pub fn run(&self, viewport: LineRange) -> Vec<RenderDirective> {
        if self.options.is_raw() {
            return Vec::new();
        }

        let ctx = RenderContext::new(self.options);
        let mut out = Vec::new();

        self.plain_lines(viewport, &ctx, &mut out);
        for block in self.index.code_blocks() {
            if block.is_mermaid() {
                self.mermaid_block(block, &mut out);
            } else {
                self.code_block(block, &ctx, &mut out);
            }
        }
        for block in self.index.tables() {
            self.table(block, &ctx, &mut out);
        }
        for block in self.index.math_blocks() {
            self.math_block(block, &ctx, &mut out);
        }
        if let Some(block) = self.index.frontmatter() {
            self.raw_block(block, &mut out);
        }

        out.sort_by_key(|d| (d.span.start, d.line));
        debug!(
            "computed {} directives for lines {}..={}",
            out.len(),
            viewport.first,
            viewport.last
        );
        out
    }

    fn span(&self, line: usize) -> Span {
        self.buffer.line(line).map(|l| l.span).unwrap_or_default()
    }

    fn text(&self, line: usize) -> &str {
        self.buffer.line_text(line)
    }

    fn plain_lines(
        &self,
        viewport: LineRange,
        ctx: &RenderContext<'_>,
        out: &mut Vec<RenderDirective>,
    ) {
        let last = viewport.last.min(self.buffer.line_count());
        for number in viewport.first.max(1)..=last {
            let Some(line) = self.buffer.line(number) else {
                continue;
            };
            if self.focus.contains(number) || line.is_blank() || !self.index.is_plain(number) {
                continue;
            }
            let payload = line_payload(self.renderer, &line.text, ctx);
            out.push(RenderDirective::rendered(number, line.span, payload));
        }
    }

    fn raw_block(&self, block: &BlockRange, out: &mut Vec<RenderDirective>) {
        out.extend(
            block
                .lines()
                .map(|n| RenderDirective::raw(n, self.span(n), block.kind)),
        );
    }

    fn elide(&self, lines: impl Iterator<Item = usize>, out: &mut Vec<RenderDirective>) {
        out.extend(lines.map(|n| RenderDirective::elided(n, self.span(n))));
    }

    fn code_block(
        &self,
        block: &BlockRange,
        ctx: &RenderContext<'_>,
        out: &mut Vec<RenderDirective>,
    ) {
        if self.focus.touches_block(block) || !block.has_interior() {
            self.raw_block(block, out);
            return;
        }

        let language = block.language.as_deref().unwrap_or("");
        self.elide(std::iter::once(block.start_line), out);
        for n in block.interior() {
            let payload = code_payload(self.renderer, self.text(n), language, ctx);
            out.push(RenderDirective::rendered(n, self.span(n), payload));
        }
        if block.closed {
            self.elide(std::iter::once(block.end_line), out);
        }
    }

    fn mermaid_block(&self, block: &BlockRange, out: &mut Vec<RenderDirective>) {
        if self.focus.touches_block(block) {
            self.raw_block(block, out);
            return;
        }

        let payload = Payload::Diagram {
            key: DiagramKey {
                line: block.start_line,
            },
            source: self.join(block.interior()),
        };
        out.push(RenderDirective::rendered(
            block.start_line,
            self.span(block.start_line),
            payload,
        ));
        self.elide((block.start_line + 1)..=block.end_line, out);
    }

    fn table(
        &self,
        block: &BlockRange,
        ctx: &RenderContext<'_>,
        out: &mut Vec<RenderDirective>,
    ) {
        if self.focus.touches_block(block) {
            self.raw_block(block, out);
            return;
        }

        let rows: Vec<&str> = block.lines().map(|n| self.text(n)).collect();
        let payload = table_payload(self.renderer, &rows, ctx);
        out.push(RenderDirective::rendered(
            block.start_line,
            self.span(block.start_line),
            payload,
        ));
        self.elide((block.start_line + 1)..=block.end_line, out);
    }

    fn math_block(
        &self,
        block: &BlockRange,
        ctx: &RenderContext<'_>,
        out: &mut Vec<RenderDirective>,
    ) {
        if self.focus.touches_block(block) {
            self.raw_block(block, out);
            return;
        }

        let tex = self.join(block.interior());
        let payload = math_payload(self.renderer, &tex, ctx);
        out.push(RenderDirective::rendered(
            block.start_line,
            self.span(block.start_line),
            payload,
        ));
        self.elide((block.start_line + 1)..=block.end_line, out);
    }

    fn join(&self, lines: impl Iterator<Item = usize>) -> String {
        lines.map(|n| self.text(n)).collect::<Vec<_>>().join("\n")
    }
}

/// Convenience wrapper around [`DirectivePass::run`].
pub fn compute_directives(
    buffer: &LineBuffer,
    index: &BlockIndex,
    focus: &FocusSet,
    viewport: LineRange,
    renderer: &dyn MarkupRenderer,
    options: &RenderOptions,
) -> Vec<RenderDirective> {
    DirectivePass {
        buffer,
        index,
        focus,
        renderer,
        options,
    }
    .run(viewport)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        blocks::{BlockKind, compute_block_index},
        focus::{SelectionRange, compute_focused_lines},
        options::ViewMode,
        render::HtmlRenderer,
    };
    use pretty_assertions::assert_eq;

    fn run(text: &str, caret: Option<usize>) -> Vec<RenderDirective> {
        run_with(text, caret, &RenderOptions::default())
    }

    fn run_with(text: &str, caret: Option<usize>, options: &RenderOptions) -> Vec<RenderDirective> {
        let buffer = LineBuffer::new(text);
        let index = compute_block_index(&buffer);
        let selections: Vec<_> = caret.into_iter().map(SelectionRange::caret).collect();
        let focus = compute_focused_lines(&buffer, &selections, caret.is_some());
        compute_directives(
            &buffer,
            &index,
            &focus,
            LineRange::all(buffer.line_count()),
            &HtmlRenderer,
            options,
        )
    }

    fn modes(directives: &[RenderDirective]) -> Vec<(usize, &'static str)> {
        directives
            .iter()
            .map(|d| {
                let tag = match &d.mode {
                    RenderMode::Raw { .. } => "raw",
                    RenderMode::Elided => "elided",
                    RenderMode::Rendered(Payload::Error { .. }) => "error",
                    RenderMode::Rendered(_) => "rendered",
                };
                (d.line, tag)
            })
            .collect()
    }

    #[test]
    fn unfocused_heading_renders() {
        let out = run("# Title\nbody\n", Some(9));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].line, 1);
        assert_eq!(out[0].span, Span::new(0, 7));
        assert!(out[0].payload().unwrap().markup().unwrap().contains("<h1>Title</h1>"));
    }

    #[test]
    fn focused_heading_has_no_directive() {
        let out = run("# Title\n", Some(0));
        assert!(out.is_empty());
    }

    #[test]
    fn blank_lines_never_replaced() {
        let out = run("a\n   \nb", None);
        assert_eq!(modes(&out), vec![(1, "rendered"), (3, "rendered")]);
    }

    #[test]
    fn plain_lines_limited_to_viewport() {
        let buffer = LineBuffer::new("a\nb\nc\nd\ne");
        let index = compute_block_index(&buffer);
        let out = compute_directives(
            &buffer,
            &index,
            &FocusSet::default(),
            LineRange::new(2, 3),
            &HtmlRenderer,
            &RenderOptions::default(),
        );
        assert_eq!(modes(&out), vec![(2, "rendered"), (3, "rendered")]);
    }

    #[test]
    fn blocks_ignore_viewport() {
        let buffer = LineBuffer::new("```js\nx\n```\nplain");
        let index = compute_block_index(&buffer);
        let out = compute_directives(
            &buffer,
            &index,
            &FocusSet::default(),
            LineRange::new(4, 4),
            &HtmlRenderer,
            &RenderOptions::default(),
        );
        assert_eq!(
            modes(&out),
            vec![(1, "elided"), (2, "rendered"), (3, "elided"), (4, "rendered")]
        );
    }

    #[test]
    fn unfocused_code_block_elides_fences() {
        let out = run("```js\nconsole.log(1)\n```", None);
        assert_eq!(modes(&out), vec![(1, "elided"), (2, "rendered"), (3, "elided")]);
        assert_eq!(
            out[1].payload(),
            Some(&Payload::Code {
                language: "js".into(),
                markup: r#"<code class="language-js">console.log(1)</code>"#.into()
            })
        );
    }

    #[test]
    fn focus_anywhere_reveals_whole_code_block() {
        for caret in [0, 8, 22] {
            let out = run("```js\nconsole.log(1)\n```", Some(caret));
            assert_eq!(modes(&out), vec![(1, "raw"), (2, "raw"), (3, "raw")]);
            assert!(out.iter().all(|d| d.mode
                == RenderMode::Raw {
                    style: BlockKind::CodeBlock
                }));
        }
    }

    #[test]
    fn empty_code_block_stays_visible() {
        let out = run("```\n```", None);
        assert_eq!(modes(&out), vec![(1, "raw"), (2, "raw")]);
    }

    #[test]
    fn unclosed_code_block_elides_opener_only() {
        let out = run("```py\ncode", None);
        assert_eq!(modes(&out), vec![(1, "elided"), (2, "rendered")]);
    }

    #[test]
    fn mermaid_collapses_to_diagram() {
        let out = run("```mermaid\ngraph TD\nA-->B\n```", None);
        assert_eq!(
            modes(&out),
            vec![(1, "rendered"), (2, "elided"), (3, "elided"), (4, "elided")]
        );
        assert_eq!(
            out[0].payload(),
            Some(&Payload::Diagram {
                key: DiagramKey { line: 1 },
                source: "graph TD\nA-->B".into()
            })
        );
    }

    #[test]
    fn math_collapses_to_first_line() {
        let out = run("$$\nx^2\n$$", None);
        assert_eq!(modes(&out), vec![(1, "rendered"), (2, "elided"), (3, "elided")]);
        assert_eq!(
            out[0].payload(),
            Some(&Payload::Math {
                markup: r#"<div class="math math-display">x^2</div>"#.into()
            })
        );
    }

    #[test]
    fn empty_math_block_renders_empty_tex() {
        let out = run("$$\n$$", None);
        assert_eq!(
            out[0].payload(),
            Some(&Payload::Math {
                markup: r#"<div class="math math-display"></div>"#.into()
            })
        );
    }

    #[test]
    fn math_error_is_inline() {
        let out = run("$$\n\\frac{a\n$$\nafter", None);
        assert_eq!(
            modes(&out),
            vec![(1, "error"), (2, "elided"), (3, "elided"), (4, "rendered")]
        );
    }

    #[test]
    fn table_collapses_and_reveals() {
        let text = "| a | b |\n| - | - |\n| 1 | 2 |";
        let out = run(text, None);
        assert_eq!(modes(&out), vec![(1, "rendered"), (2, "elided"), (3, "elided")]);
        assert!(matches!(out[0].payload(), Some(Payload::Table { .. })));

        let out = run(text, Some(12));
        assert_eq!(modes(&out), vec![(1, "raw"), (2, "raw"), (3, "raw")]);
    }

    #[test]
    fn frontmatter_is_always_raw() {
        let out = run("---\ntitle: x\n---\nbody", None);
        assert_eq!(
            modes(&out),
            vec![(1, "raw"), (2, "raw"), (3, "raw"), (4, "rendered")]
        );
        assert_eq!(
            out[0].mode,
            RenderMode::Raw {
                style: BlockKind::Frontmatter
            }
        );
    }

    #[test]
    fn raw_mode_emits_nothing() {
        let opts = RenderOptions {
            mode: ViewMode::Raw,
            ..RenderOptions::default()
        };
        assert!(run_with("# a\n$$\nx\n$$", None, &opts).is_empty());
    }

    #[test]
    fn directives_sorted_by_span() {
        let out = run("| a |\n\n$$\nx\n$$\ntext\n```\ny\n```", None);
        let starts: Vec<_> = out.iter().map(|d| d.span.start).collect();
        let mut sorted = starts.clone();
        sorted.sort();
        assert_eq!(starts, sorted);
    }
}
