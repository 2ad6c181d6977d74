//! # markdown-hybrid-engine
//!
//! Decides, line by line, whether a markdown document is shown as raw source
//! or as rendered output, driven by where the cursor is.
//!
//! ## Pipeline
//!
//! 1. **`blocks`**: index code, math, table and frontmatter ranges
//! 2. **`focus`**: resolve selections into focused lines
//! 3. **`directives`**: combine both into per-line render directives
//! 4. **`render`** / **`diagram`**: produce markup, synchronously or not
//! 5. **`click`**: map clicks on rendered widgets back to edits and selections
//!
//! [`HybridView`] wires these together for hosts.

pub mod blocks;
pub mod buffer;
pub mod click;
pub mod diagram;
pub mod directives;
pub mod focus;
pub mod io;
pub mod options;
pub mod render;
pub mod sequence;
pub mod snapshot;
pub mod tasks;
pub mod view;

// Re-export key types for easier usage
pub use blocks::{BlockIndex, BlockKind, BlockRange, compute_block_index};
pub use buffer::{Edit, LineBuffer, LineRef, Span};
pub use click::{ClickAction, ClickTarget, WidgetClick, map_click_to_offset, resolve_click};
pub use diagram::{DiagramCompletion, DiagramSlots, DiagramState, DiagramTask};
pub use directives::{
    DiagramKey, LineRange, Payload, RenderDirective, RenderMode, compute_directives,
};
pub use focus::{FocusSet, SelectionRange, compute_focused_lines};
pub use io::*;
pub use options::{RenderOptions, Theme, ViewMode};
pub use render::{
    DiagramRenderer, HtmlRenderer, MarkupRenderer, RenderContext, RenderError,
    SourceDiagramRenderer,
};
pub use view::{HybridView, ViewUpdate};
