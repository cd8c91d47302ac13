//! The two event kinds crossing the runtime/screen boundary.

use block_model::{Color, ScriptableId};

#[derive(Debug, Clone, PartialEq)]
pub enum StopTarget {
    All,
    OtherScriptsInSprite,
    /// Natural termination, or any other token — both just end this Thread.
    This,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEventKind {
    Say(Option<String>),
    Think(Option<String>),
    Clear,
    Stamp,
    Stop(StopTarget),
}

/// Emitted from a handler, through the scheduler, out of `tick`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
    pub scriptable: ScriptableId,
    pub kind: ScriptEventKind,
}

impl ScriptEvent {
    pub fn new(scriptable: ScriptableId, kind: ScriptEventKind) -> Self {
        Self { scriptable, kind }
    }

    pub fn say(scriptable: ScriptableId, message: Option<String>) -> Self {
        Self::new(scriptable, ScriptEventKind::Say(message))
    }

    pub fn think(scriptable: ScriptableId, message: Option<String>) -> Self {
        Self::new(scriptable, ScriptEventKind::Think(message))
    }

    pub fn stop(scriptable: ScriptableId, target: StopTarget) -> Self {
        Self::new(scriptable, ScriptEventKind::Stop(target))
    }
}

/// Consumed by `tick`. Stage coordinates: origin at centre, +y
/// up, ±240 x ±180.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenEvent {
    KeyPressed(String),
    MouseDown,
    MouseUp,
}

/// Used only for the `touching color` family, to keep `Color` in scope
/// for callers that need it without reaching into `block_model` directly.
pub type PenColor = Color;
