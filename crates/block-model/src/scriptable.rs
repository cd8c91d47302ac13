//! Scriptable (Stage/Sprite), and the small value types it owns
//! (Variable, List, Costume, Sound, Color).

use std::collections::HashMap;

use crate::block::Script;
use crate::value::Value;

/// Index into `Project::scriptables`. Index `0` is always the Stage.
///
/// An index rather than a reference or `Rc`: the `Project → interpreter
/// → Project` and `Scriptable → Project` links are back-edges for
/// lookup, not ownership, so they're modelled with an arena index
/// instead of a weak handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScriptableId(pub u32);

impl ScriptableId {
    pub const STAGE: ScriptableId = ScriptableId(0);

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for Color {
    /// `kurt.Color("#00f")` — the default pen colour in the source.
    fn default() -> Self {
        Color::rgb(0, 0, 255)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Variable {
    pub value: Value,
    pub watcher_is_visible: bool,
}

impl Variable {
    pub fn new(value: Value) -> Self {
        Self { value, watcher_is_visible: false }
    }
}

#[derive(Debug, Clone, Default)]
pub struct List {
    pub items: Vec<Value>,
}

/// Enough of a costume to drive `bounds()`: a rotation centre and
/// an image size. Pixel data is the loader's concern, out of scope here.
#[derive(Debug, Clone)]
pub struct Costume {
    pub name: String,
    pub rotation_center: (f64, f64),
    pub size: (f64, f64),
}

#[derive(Debug, Clone)]
pub struct Sound {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationStyle {
    Normal,
    LeftRight,
    None,
}

impl Default for RotationStyle {
    fn default() -> Self {
        RotationStyle::Normal
    }
}

/// Fields shared by Stage and Sprite. The
/// graphic-effects map and `instrument` are populated once at
/// interpreter construction (`augment`) —
/// present here as plain fields with sensible defaults so augmentation
/// is simply "overwrite with the canonical initial state", which is
/// idempotent by construction.
#[derive(Debug, Clone)]
pub struct ScriptableCore {
    pub name: String,
    pub scripts: Vec<Script>,
    pub variables: HashMap<String, Variable>,
    pub lists: HashMap<String, List>,
    pub costumes: Vec<Costume>,
    pub costume_index: usize,
    pub sounds: Vec<Sound>,
    pub size: f64,
    pub volume: f64,
    pub is_visible: bool,
    pub is_draggable: bool,
    pub graphic_effects: HashMap<&'static str, f64>,
    pub instrument: f64,
}

pub const GRAPHIC_EFFECT_NAMES: [&str; 7] =
    ["brightness", "color", "fisheye", "ghost", "mosaic", "pixelate", "whirl"];

impl ScriptableCore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scripts: Vec::new(),
            variables: HashMap::new(),
            lists: HashMap::new(),
            costumes: Vec::new(),
            costume_index: 0,
            sounds: Vec::new(),
            size: 100.0,
            volume: 100.0,
            is_visible: true,
            is_draggable: false,
            graphic_effects: HashMap::new(),
            instrument: 1.0,
        }
    }

    pub fn costume(&self) -> Option<&Costume> {
        self.costumes.get(self.costume_index)
    }
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub core: ScriptableCore,
}

/// Stage size in Scratch coordinates.
pub const STAGE_SIZE: (f64, f64) = (480.0, 360.0);

impl Stage {
    pub fn new() -> Self {
        Self { core: ScriptableCore::new("Stage") }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Sprite {
    pub core: ScriptableCore,
    pub position: (f64, f64),
    pub direction: f64,
    pub rotation_style: RotationStyle,
    pub is_pen_down: bool,
    pub pen_size: f64,
    pub pen_color: Color,
    pub pen_hue: f64,
    pub pen_shade: f64,
}

impl Sprite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            core: ScriptableCore::new(name),
            position: (0.0, 0.0),
            direction: 90.0,
            rotation_style: RotationStyle::Normal,
            is_pen_down: false,
            pen_size: 1.0,
            pen_color: Color::default(),
            pen_hue: 0.0,
            pen_shade: 0.0,
        }
    }
}

/// Stage or Sprite — an enum rather than a trait object
/// since the interpreter frequently needs to match on which one it has
/// (position/direction only exist on sprites, stage size is fixed).
#[derive(Debug, Clone)]
pub enum Scriptable {
    Stage(Stage),
    Sprite(Sprite),
}

impl Scriptable {
    pub fn core(&self) -> &ScriptableCore {
        match self {
            Scriptable::Stage(s) => &s.core,
            Scriptable::Sprite(s) => &s.core,
        }
    }

    pub fn core_mut(&mut self) -> &mut ScriptableCore {
        match self {
            Scriptable::Stage(s) => &mut s.core,
            Scriptable::Sprite(s) => &mut s.core,
        }
    }

    pub fn name(&self) -> &str {
        &self.core().name
    }

    pub fn position(&self) -> (f64, f64) {
        match self {
            Scriptable::Stage(_) => (0.0, 0.0),
            Scriptable::Sprite(s) => s.position,
        }
    }

    pub fn direction(&self) -> f64 {
        match self {
            Scriptable::Stage(_) => 90.0,
            Scriptable::Sprite(s) => s.direction,
        }
    }

    pub fn is_sprite(&self) -> bool {
        matches!(self, Scriptable::Sprite(_))
    }

    pub fn as_sprite(&self) -> Option<&Sprite> {
        match self {
            Scriptable::Sprite(s) => Some(s),
            Scriptable::Stage(_) => None,
        }
    }

    pub fn as_sprite_mut(&mut self) -> Option<&mut Sprite> {
        match self {
            Scriptable::Sprite(s) => Some(s),
            Scriptable::Stage(_) => None,
        }
    }
}

/// Augment a freshly constructed Scriptable with the per-run fields the
/// interpreter owns. Idempotent: re-running it simply resets to the
/// canonical initial state.
pub fn augment(scriptable: &mut Scriptable) {
    let core = scriptable.core_mut();
    core.graphic_effects = GRAPHIC_EFFECT_NAMES.iter().map(|&name| (name, 0.0)).collect();
    core.instrument = 1.0;

    if let Scriptable::Sprite(sprite) = scriptable {
        sprite.is_pen_down = false;
        sprite.pen_size = 1.0;
        sprite.pen_color = Color::default();
        sprite.pen_hue = 0.0;
        sprite.pen_shade = 0.0;
    }
}
