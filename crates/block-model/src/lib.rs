//! Data-contract types shared between a project loader, the
//! interpreter, and a screen backend: Value, Scriptable, Block/Script,
//! Project. Contains no parsing and no execution semantics — see
//! `block-interpreter` for the runtime.

pub mod block;
pub mod builder;
pub mod project;
pub mod scriptable;
pub mod value;

pub use block::{Arg, Block, BlockShape, BlockType, Command, Insert, InsertKind, InsertShape, Script};
pub use project::Project;
pub use scriptable::{
    augment, Color, Costume, List, RotationStyle, Scriptable, ScriptableCore, ScriptableId,
    Sound, Sprite, Stage, Variable, GRAPHIC_EFFECT_NAMES, STAGE_SIZE,
};
pub use value::{ListRef, Scope, SoundRef, Value, VarRef};
