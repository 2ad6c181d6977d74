use serde::{Deserialize, Serialize};

/// Whether the view mixes rendered output in, or shows source only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Hybrid,
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Options threaded into every directive and click computation.
///
/// There is no global mode state; hosts keep one of these and pass it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub mode: ViewMode,
    pub theme: Theme,
    pub line_numbers: bool,
    /// Recognise and cycle through `task_markers` instead of plain `[ ]`/`[x]`.
    pub custom_task_markers: bool,
    /// Ordered marker cycle used when `custom_task_markers` is on.
    pub task_markers: Vec<char>,
    /// Extra lines rendered above and below the visible range.
    pub viewport_margin: usize,
}

impl RenderOptions {
    pub const DEFAULT_TASK_MARKERS: [char; 4] = [' ', 'x', '/', '-'];
    pub const DEFAULT_VIEWPORT_MARGIN: usize = 5;

    pub fn is_raw(&self) -> bool {
        self.mode == ViewMode::Raw
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: ViewMode::Hybrid,
            theme: Theme::Light,
            line_numbers: false,
            custom_task_markers: false,
            task_markers: Self::DEFAULT_TASK_MARKERS.to_vec(),
            viewport_margin: Self::DEFAULT_VIEWPORT_MARGIN,
        }
    }
}
