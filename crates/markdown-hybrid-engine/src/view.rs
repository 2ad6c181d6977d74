//! Host-facing facade tying the pipeline together.

use std::collections::HashSet;

use log::debug;

use crate::{
    blocks::{BlockIndex, compute_block_index},
    buffer::{Edit, LineBuffer},
    click::{ClickAction, WidgetClick, resolve_click},
    diagram::{DiagramCompletion, DiagramSlots, DiagramState, DiagramTask},
    directives::{DiagramKey, DirectivePass, LineRange, Payload, RenderDirective},
    focus::{FocusSet, SelectionRange, compute_focused_lines},
    options::RenderOptions,
    render::{DiagramRenderer, HtmlRenderer, MarkupRenderer, SourceDiagramRenderer},
    sequence::{LatestSlot, Ticket},
};

/// Output of one recomputation.
#[derive(Debug)]
pub struct ViewUpdate {
    pub directives: Vec<RenderDirective>,
    /// Renders the host should drive and hand back to
    /// [`HybridView::complete_diagram`].
    pub diagram_tasks: Vec<DiagramTask>,
}

/// A document with its cached block index, options and renderers.
///
/// The index is rebuilt only when the text actually changes; selection,
/// focus and viewport changes reuse it.
pub struct HybridView {
    buffer: LineBuffer,
    index: BlockIndex,
    version: u64,
    options: RenderOptions,
    renderer: Box<dyn MarkupRenderer>,
    diagram_renderer: Box<dyn DiagramRenderer>,
    diagrams: DiagramSlots,
    backlinks: LatestSlot<Vec<String>>,
}

impl HybridView {
    /// A view using [`HtmlRenderer`] and [`SourceDiagramRenderer`].
    pub fn new(text: &str, options: RenderOptions) -> Self {
        Self::with_renderers(
            text,
            options,
            Box::new(HtmlRenderer),
            Box::new(SourceDiagramRenderer),
        )
    }

    pub fn with_renderers(
        text: &str,
        options: RenderOptions,
        renderer: Box<dyn MarkupRenderer>,
        diagram_renderer: Box<dyn DiagramRenderer>,
    ) -> Self {
        let buffer = LineBuffer::new(text);
        let index = compute_block_index(&buffer);
        Self {
            buffer,
            index,
            version: 0,
            options,
            renderer,
            diagram_renderer,
            diagrams: DiagramSlots::new(),
            backlinks: LatestSlot::new(),
        }
    }

    pub fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// Bumped on every text change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the document. Returns false when the text is unchanged.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.buffer.text() == text {
            return false;
        }
        self.replace_buffer(LineBuffer::new(text));
        true
    }

    pub fn apply_edit(&mut self, edit: &Edit) {
        let next = self.buffer.with_edit(edit);
        self.replace_buffer(next);
    }

    fn replace_buffer(&mut self, buffer: LineBuffer) {
        self.buffer = buffer;
        self.index = compute_block_index(&self.buffer);
        self.version += 1;
        debug!(
            "document v{}: {} lines re-indexed",
            self.version,
            self.buffer.line_count()
        );
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn index(&self) -> &BlockIndex {
        &self.index
    }

    pub fn focused_lines(&self, selections: &[SelectionRange], has_focus: bool) -> FocusSet {
        compute_focused_lines(&self.buffer, selections, has_focus)
    }

    /// Recompute directives for the visible range plus the configured margin,
    /// scheduling renders for any diagram whose source is new.
    pub fn directives(
        &mut self,
        selections: &[SelectionRange],
        has_focus: bool,
        viewport: LineRange,
    ) -> ViewUpdate {
        let focus = self.focused_lines(selections, has_focus);
        let viewport = viewport.expand(self.options.viewport_margin, self.buffer.line_count());
        let directives = DirectivePass {
            buffer: &self.buffer,
            index: &self.index,
            focus: &focus,
            renderer: self.renderer.as_ref(),
            options: &self.options,
        }
        .run(viewport);

        let live: HashSet<DiagramKey> = self
            .index
            .mermaid_blocks()
            .map(|b| DiagramKey { line: b.start_line })
            .collect();
        self.diagrams.retain(&live);

        let diagram_tasks = directives
            .iter()
            .filter_map(|d| match d.payload() {
                Some(Payload::Diagram { key, source }) => {
                    self.diagrams
                        .schedule(*key, source, self.diagram_renderer.as_ref())
                }
                _ => None,
            })
            .collect();

        ViewUpdate {
            directives,
            diagram_tasks,
        }
    }

    pub fn complete_diagram(&mut self, completion: DiagramCompletion) -> bool {
        self.diagrams.complete(completion)
    }

    pub fn diagram_state(&self, key: DiagramKey) -> Option<&DiagramState> {
        self.diagrams.state(key)
    }

    pub fn diagram_markup(&self, key: DiagramKey) -> Option<String> {
        self.diagrams.markup(key)
    }

    /// Resolve a click on the widget drawn over `directive_line`.
    pub fn click(&self, directive_line: usize, click: &WidgetClick) -> ClickAction {
        resolve_click(&self.buffer, directive_line, &click.target(), &self.options)
    }

    pub fn request_backlinks(&mut self) -> Ticket {
        self.backlinks.request()
    }

    /// Store a backlinks response unless a newer request has been issued.
    pub fn apply_backlinks(&mut self, ticket: Ticket, links: Vec<String>) -> bool {
        self.backlinks.apply(ticket, links)
    }

    pub fn backlinks(&self) -> Option<&[String]> {
        self.backlinks.get().map(Vec::as_slice)
    }
}
