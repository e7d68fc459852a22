//! Error taxonomy (spec §7) and the control-flow result type that replaces
//! the reference implementation's exception-based scene/application control
//! (spec §9 REDESIGN FLAGS).

use thiserror::Error;

/// Genuine failures. `ResizeScreenError`, `StopApplication` and `NextScene`
/// in the original are control flow, not errors — see [`UpdateOutcome`].
#[derive(Debug, Error)]
pub enum StagecraftError {
    #[error("terminal I/O failure")]
    Driver(#[from] std::io::Error),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("invalid fields: {0:?}")]
    InvalidFields(Vec<String>),

    #[error("layout conflict: {0}")]
    Highlander(&'static str),
}

/// Result of an `Effect::update` or `Widget::process_event` call that wants
/// to influence scene/application control flow, modelled as a value instead
/// of an exception per spec §9.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Nothing special; keep running this scene.
    Continue,
    /// Move to the named scene (or the next one in sequence if `None`).
    NextScene(Option<String>),
    /// Unwind the player loop entirely with this message.
    Stop(String),
}

impl UpdateOutcome {
    pub fn is_continue(&self) -> bool {
        matches!(self, UpdateOutcome::Continue)
    }
}

/// The scene that was active when the terminal resized, returned to the
/// caller so it can rebuild the `Screen` and resume (spec §4.2, §4.6).
#[derive(Debug, Clone)]
pub struct ResizeScreenError {
    pub message: String,
    pub scene_name: Option<String>,
}

impl std::fmt::Display for ResizeScreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ResizeScreenError {}
