use serde::Serialize;

/// A buffer mutation request: replace `[from, to)` with `insert`.
///
/// The host may accept or silently drop it (a read-only guard, for example).
/// Nothing waits on the outcome; the next pass reflects whatever buffer the
/// host ends up with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edit {
    pub from: usize,
    pub to: usize,
    pub insert: String,
}

impl Edit {
    pub fn replace(from: usize, to: usize, insert: impl Into<String>) -> Self {
        Self {
            from,
            to,
            insert: insert.into(),
        }
    }
}
