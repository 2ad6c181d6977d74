//! Asynchronous diagram rendering with latest-wins completion.
//!
//! The directive pass only places a [`Payload::Diagram`](crate::directives::Payload)
//! placeholder. [`DiagramSlots`] hands out a [`DiagramTask`] when a block's
//! source is new or changed; the host drives the future and feeds the
//! [`DiagramCompletion`] back. A completion whose generation no longer matches
//! its slot is dropped, so a slow render can never overwrite a newer one.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    sync::atomic::{AtomicU64, Ordering},
};

use futures::{FutureExt, future::BoxFuture};
use html_escape::encode_text;
use log::debug;

use crate::{
    directives::DiagramKey,
    render::{DiagramRenderer, RenderError},
};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagramState {
    Pending,
    Ready(String),
    Failed(String),
}

#[derive(Debug)]
struct Slot {
    source: String,
    generation: u64,
    state: DiagramState,
}

/// An in-flight render. Not cancellable; superseded tasks resolve into
/// completions that [`DiagramSlots::complete`] discards.
pub struct DiagramTask {
    pub key: DiagramKey,
    pub generation: u64,
    future: BoxFuture<'static, Result<String, RenderError>>,
}

impl DiagramTask {
    pub fn into_future(self) -> BoxFuture<'static, DiagramCompletion> {
        let DiagramTask {
            key,
            generation,
            future,
        } = self;
        future
            .map(move |result| DiagramCompletion {
                key,
                generation,
                result,
            })
            .boxed()
    }
}

impl fmt::Debug for DiagramTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagramTask")
            .field("key", &self.key)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramCompletion {
    pub key: DiagramKey,
    pub generation: u64,
    pub result: Result<String, RenderError>,
}

#[derive(Debug, Default)]
pub struct DiagramSlots {
    slots: HashMap<DiagramKey, Slot>,
}

impl DiagramSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a render unless the slot already holds this exact source.
    pub fn schedule(
        &mut self,
        key: DiagramKey,
        source: &str,
        renderer: &dyn DiagramRenderer,
    ) -> Option<DiagramTask> {
        if self.slots.get(&key).is_some_and(|s| s.source == source) {
            return None;
        }

        let generation = next_generation();
        self.slots.insert(
            key,
            Slot {
                source: source.to_string(),
                generation,
                state: DiagramState::Pending,
            },
        );
        Some(DiagramTask {
            key,
            generation,
            future: renderer.render_diagram(source),
        })
    }

    /// Apply a finished render. Returns false when it was stale.
    pub fn complete(&mut self, completion: DiagramCompletion) -> bool {
        let Some(slot) = self.slots.get_mut(&completion.key) else {
            debug!(
                "dropping diagram render for removed block at line {}",
                completion.key.line
            );
            return false;
        };
        if slot.generation != completion.generation {
            debug!(
                "dropping stale diagram render for line {} (generation {}, current {})",
                completion.key.line, completion.generation, slot.generation
            );
            return false;
        }
        slot.state = match completion.result {
            Ok(markup) => DiagramState::Ready(markup),
            Err(err) => DiagramState::Failed(err.to_string()),
        };
        true
    }

    /// Drop every slot whose key is not in `live`.
    pub fn retain(&mut self, live: &HashSet<DiagramKey>) {
        self.slots.retain(|key, _| live.contains(key));
    }

    pub fn state(&self, key: DiagramKey) -> Option<&DiagramState> {
        self.slots.get(&key).map(|s| &s.state)
    }

    /// Display markup for a slot: the diagram, the error text, or nothing yet.
    pub fn markup(&self, key: DiagramKey) -> Option<String> {
        match self.state(key)? {
            DiagramState::Pending => None,
            DiagramState::Ready(markup) => Some(markup.clone()),
            DiagramState::Failed(message) => Some(format!(
                r#"<span class="render-error diagram-error">{}</span>"#,
                encode_text(message)
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
