//! # Snapshot Testing Support
//!
//! Utilities for testing the pipeline via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts an index and its directives into a stable `Snap`
//!   with a line-oriented `Display` for inline `insta` snapshots
//! - **`invariants`**: Runtime checks for indexer and directive correctness
//!   (ranges in bounds, one block kind per line, one directive per line)

pub mod invariants;
pub mod normalize;

pub use invariants::{check as invariants, check_directives};
pub use normalize::{Snap, normalize};
