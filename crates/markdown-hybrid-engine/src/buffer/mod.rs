//! # Buffer Snapshot
//!
//! Line-addressable, immutable view over an `xi_rope::Rope`.
//!
//! - **`span`**: byte ranges shared by lines and directives
//! - **`lines`**: `LineBuffer`, offset ↔ line translation
//! - **`edit`**: `Edit`, the mutation request handed back to the host

pub mod edit;
pub mod lines;
pub mod span;

pub use edit::Edit;
pub use lines::{LineBuffer, LineRef};
pub use span::Span;
