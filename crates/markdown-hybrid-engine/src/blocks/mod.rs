//! # Block Indexing
//!
//! Cheap line-scan classification of a buffer into block ranges. This is not
//! a markdown parser: it recognises just enough structure to decide which
//! lines render as a unit.
//!
//! ## Phases
//!
//! 1. **Line Classification** (`classify`): each line gets a `LineClass` of
//!    local facts (fence signature, `$$` delimiter, table row shape)
//!
//! 2. **Range Building** (`builder`): forward passes resolve context, in this
//!    order: frontmatter, fenced code, math (skipping code lines), tables
//!    (skipping code and math lines)
//!
//! ## Modules
//!
//! - **`types`**: `BlockKind`, `BlockRange`
//! - **`kinds`**: per-kind syntax knowledge (`CodeFence`, `MathBlock`, `Table`, `Frontmatter`)
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`builder`**: `compute_block_index` and the per-kind builders
//! - **`index`**: `BlockIndex` with per-kind membership sets
//!
//! ## Key Invariants
//!
//! - A line belongs to at most one block kind; mermaid lines are a subset of
//!   code lines, not a separate kind
//! - An unterminated fence extends to the last line of the document
//! - An unmatched `$$` or an unterminated frontmatter produces no range

pub mod builder;
pub mod classify;
pub mod index;
pub mod kinds;
pub mod types;

pub use builder::compute_block_index;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use index::BlockIndex;
pub use types::{BlockKind, BlockRange};
