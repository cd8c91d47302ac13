//! Project: the arena of Scriptables plus global state.

use std::collections::HashMap;

use crate::scriptable::{List, ScriptableId, Stage, Variable};
use crate::value::Value;
use crate::Scriptable;

/// The whole loaded program: every Stage/Sprite, execution order, and
/// the global (stage-scoped) variables/lists the source calls
/// "for all sprites" variables.
///
/// Building one is the loader's job (out of scope here); this crate
/// only defines the shape and a few constructors used by tests and the
/// REPL demo.
#[derive(Debug, Clone)]
pub struct Project {
    /// Index 0 is always the Stage (`ScriptableId::STAGE`).
    scriptables: Vec<Scriptable>,
    /// Sprite draw/processing order, stage excluded. Hat triggering
    /// iterates scripts in this order each round.
    actor_order: Vec<ScriptableId>,
    pub tempo: f64,
}

impl Project {
    pub fn new() -> Self {
        Self {
            scriptables: vec![Scriptable::Stage(Stage::new())],
            actor_order: Vec::new(),
            tempo: 60.0,
        }
    }

    pub fn add_sprite(&mut self, sprite: crate::scriptable::Sprite) -> ScriptableId {
        let id = ScriptableId(self.scriptables.len() as u32);
        self.scriptables.push(Scriptable::Sprite(sprite));
        self.actor_order.push(id);
        id
    }

    pub fn stage(&self) -> &Scriptable {
        &self.scriptables[ScriptableId::STAGE.index()]
    }

    pub fn stage_mut(&mut self) -> &mut Scriptable {
        &mut self.scriptables[ScriptableId::STAGE.index()]
    }

    pub fn get(&self, id: ScriptableId) -> &Scriptable {
        &self.scriptables[id.index()]
    }

    pub fn get_mut(&mut self, id: ScriptableId) -> &mut Scriptable {
        &mut self.scriptables[id.index()]
    }

    pub fn get_sprite(&self, name: &str) -> Option<ScriptableId> {
        self.scriptables
            .iter()
            .enumerate()
            .find(|(_, s)| s.name() == name)
            .map(|(i, _)| ScriptableId(i as u32))
    }

    /// All scriptable ids, stage first, then sprites in `actor_order`.
    pub fn iter_ids(&self) -> impl Iterator<Item = ScriptableId> + '_ {
        std::iter::once(ScriptableId::STAGE).chain(self.actor_order.iter().copied())
    }

    pub fn actor_order(&self) -> &[ScriptableId] {
        &self.actor_order
    }

    /// `go to front`: no-op for the Stage, which has no
    /// position in the actor order.
    pub fn move_actor_to_front(&mut self, id: ScriptableId) {
        if let Some(pos) = self.actor_order.iter().position(|&a| a == id) {
            self.actor_order.remove(pos);
            self.actor_order.push(id);
        }
    }

    /// `go back layers`: move `id` back by `n` positions,
    /// clamped at the front of the list. No-op for the Stage.
    pub fn move_actor_back(&mut self, id: ScriptableId, n: usize) {
        if let Some(pos) = self.actor_order.iter().position(|&a| a == id) {
            self.actor_order.remove(pos);
            let new_pos = pos.saturating_sub(n);
            self.actor_order.insert(new_pos, id);
        }
    }

    pub fn len(&self) -> usize {
        self.scriptables.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    /// Global ("for all sprites") variables, stored on the Stage like
    /// the source does.
    pub fn global_variables(&self) -> &HashMap<String, Variable> {
        &self.stage().core().variables
    }

    pub fn global_variables_mut(&mut self) -> &mut HashMap<String, Variable> {
        &mut self.stage_mut().core_mut().variables
    }

    pub fn global_lists(&self) -> &HashMap<String, List> {
        &self.stage().core().lists
    }

    pub fn global_lists_mut(&mut self) -> &mut HashMap<String, List> {
        &mut self.stage_mut().core_mut().lists
    }

    pub fn set_global(&mut self, name: impl Into<String>, value: Value) {
        self.global_variables_mut()
            .entry(name.into())
            .or_insert_with(Default::default)
            .value = value;
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}
