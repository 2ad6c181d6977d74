/// Signature of a line that opens or closes a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenceSig {
    /// Text following the backtick run, trimmed. Empty when absent.
    pub info: String,
}

/// Fenced code block syntax knowledge.
pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    /// Language tag that routes a block to the diagram renderer.
    pub const MERMAID: &'static str = "mermaid";

    /// Returns the fence signature if the trimmed line starts with a fence marker.
    ///
    /// Any fence-looking line toggles fence state; an info string on what
    /// turns out to be a closing line is simply ignored by the builder.
    pub fn sig(line: &str) -> Option<FenceSig> {
        let t = line.trim();
        if !t.starts_with(Self::BACKTICKS) {
            return None;
        }
        Some(FenceSig {
            info: t.trim_start_matches('`').trim().to_string(),
        })
    }

    /// The language tag of an opening fence, if any.
    pub fn language(sig: &FenceSig) -> Option<String> {
        let lang = sig.info.split_whitespace().next()?;
        Some(lang.to_string())
    }

    pub fn is_mermaid(language: Option<&str>) -> bool {
        language == Some(Self::MERMAID)
    }
}
