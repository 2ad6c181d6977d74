//! # Renderers
//!
//! The engine only decides *what* gets rendered. Turning text into markup is
//! delegated to a [`MarkupRenderer`] (synchronous, per line or per block) and
//! a [`DiagramRenderer`] (asynchronous, mermaid blocks).
//!
//! - **`html`**: `HtmlRenderer`, the default pulldown-cmark based renderer, and
//!   `SourceDiagramRenderer`, which echoes diagram source
//! - **`dispatch`**: calls a renderer and folds failures into inline error payloads

pub mod dispatch;
pub mod html;

use futures::future::BoxFuture;
use thiserror::Error;

use crate::options::RenderOptions;

pub use html::{HtmlRenderer, SourceDiagramRenderer};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Failed to render line: {0}")]
    Line(String),
    #[error("Failed to render code block: {0}")]
    Code(String),
    #[error("Failed to render table: {0}")]
    Table(String),
    #[error("Failed to typeset math: {0}")]
    Math(String),
    #[error("Failed to render diagram: {0}")]
    Diagram(String),
}

/// Feature toggles a renderer may consult.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub options: &'a RenderOptions,
}

impl<'a> RenderContext<'a> {
    pub fn new(options: &'a RenderOptions) -> Self {
        Self { options }
    }
}

/// Converts raw source into display markup.
///
/// Implementations must be pure functions of their inputs and the context.
/// Errors never abort a render pass; the caller substitutes an error payload.
pub trait MarkupRenderer {
    fn render_line(&self, text: &str, ctx: &RenderContext<'_>) -> Result<String, RenderError>;

    /// `rows` holds every raw row, separator row included.
    fn render_table(&self, rows: &[&str], ctx: &RenderContext<'_>) -> Result<String, RenderError>;

    fn render_math(&self, text: &str, ctx: &RenderContext<'_>) -> Result<String, RenderError>;

    /// Renders one line of a code block. `language` is empty when untagged.
    fn render_code(
        &self,
        text: &str,
        language: &str,
        ctx: &RenderContext<'_>,
    ) -> Result<String, RenderError>;
}

/// Renders diagram source asynchronously.
///
/// The returned future must not borrow the renderer; it is driven by the host
/// after the synchronous pass has finished.
pub trait DiagramRenderer {
    fn render_diagram(&self, source: &str) -> BoxFuture<'static, Result<String, RenderError>>;
}
