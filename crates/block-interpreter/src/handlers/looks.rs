//! Looks block handlers: costumes, say/think, effects, size, layering.

use block_model::{Block, ScriptableId, Value};

use crate::error::Result;
use crate::evaluator::{arg_number, arg_text};
use crate::exec::{Exec, Once, Step};
use crate::scheduler::Interpreter;

/// Shared by `switch to costume`/`switch backdrop to`: numeric names
/// index (1-based, wrapping) into the costume list, otherwise match by
/// name (`set_costume` in the source).
fn set_costume(interp: &mut Interpreter, scriptable: ScriptableId, name: &str) {
    let core = interp.project.get(scriptable).core();
    if let Ok(n) = name.trim().parse::<f64>() {
        let count = core.costumes.len();
        if count > 0 {
            // 1-based: costume "1" is index 0.
            let index = (n.round() as i64 - 1).rem_euclid(count as i64) as usize;
            interp.project.get_mut(scriptable).core_mut().costume_index = index;
        }
        return;
    }
    if let Some(pos) = core.costumes.iter().position(|c| c.name == name) {
        interp.project.get_mut(scriptable).core_mut().costume_index = pos;
    }
}

pub fn compile_switch_costume(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let name = arg_text(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        set_costume(interp, scriptable, &name);
        Ok(None)
    })))
}

pub fn compile_next_costume(_interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let core = interp.project.get_mut(scriptable).core_mut();
        if !core.costumes.is_empty() {
            core.costume_index = (core.costume_index + 1) % core.costumes.len();
        }
        Ok(None)
    })))
}

pub fn eval_costume_number(interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number((interp.project.get(scriptable).core().costume_index + 1) as f64))
}

pub fn compile_say(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let message = arg_text(interp, scriptable, block, 0)?;
    Ok(crate::exec::once(crate::event::ScriptEvent::say(scriptable, Some(message))))
}

pub fn compile_think(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let message = arg_text(interp, scriptable, block, 0)?;
    Ok(crate::exec::once(crate::event::ScriptEvent::think(scriptable, Some(message))))
}

/// `say for secs` / `think for secs`: show the bubble, wait out the
/// duration against the clock, then clear it. Three states:
/// show the message, wait, clear it.
struct ForSecs {
    scriptable: ScriptableId,
    message: Option<String>,
    secs: f64,
    think: bool,
    stage: u8,
    end_time: Option<f64>,
}

impl Exec for ForSecs {
    fn poll(&mut self, interp: &mut Interpreter) -> Step {
        loop {
            match self.stage {
                0 => {
                    self.stage = 1;
                    let event = if self.think {
                        crate::event::ScriptEvent::think(self.scriptable, self.message.take())
                    } else {
                        crate::event::ScriptEvent::say(self.scriptable, self.message.take())
                    };
                    return Step::Emit(event);
                }
                1 => {
                    let end = *self.end_time.get_or_insert_with(|| interp.clock.now() + self.secs);
                    if interp.clock.now() >= end {
                        self.stage = 2;
                        continue;
                    }
                    return Step::Yield;
                }
                _ => {
                    self.stage = 3;
                    let event = if self.think {
                        crate::event::ScriptEvent::think(self.scriptable, None)
                    } else {
                        crate::event::ScriptEvent::say(self.scriptable, None)
                    };
                    return Step::Emit(event);
                }
            }
        }
    }
}

pub fn compile_say_for_secs(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let message = arg_text(interp, scriptable, block, 0)?;
    let secs = arg_number(interp, scriptable, block, 1)?;
    Ok(Box::new(ForSecs { scriptable, message: Some(message), secs, think: false, stage: 0, end_time: None }))
}

pub fn compile_think_for_secs(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let message = arg_text(interp, scriptable, block, 0)?;
    let secs = arg_number(interp, scriptable, block, 1)?;
    Ok(Box::new(ForSecs { scriptable, message: Some(message), secs, think: true, stage: 0, end_time: None }))
}

pub fn compile_change_effect(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let effect = arg_text(interp, scriptable, block, 0)?;
    let delta = arg_number(interp, scriptable, block, 1)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let core = interp.project.get_mut(scriptable).core_mut();
        if let Some(v) = core.graphic_effects.get_mut(effect.as_str()) {
            *v += delta;
        }
        Ok(None)
    })))
}

pub fn compile_set_effect(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let effect = arg_text(interp, scriptable, block, 0)?;
    let value = arg_number(interp, scriptable, block, 1)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let core = interp.project.get_mut(scriptable).core_mut();
        if let Some(v) = core.graphic_effects.get_mut(effect.as_str()) {
            *v = value;
        }
        Ok(None)
    })))
}

pub fn compile_clear_effects(_interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        for v in interp.project.get_mut(scriptable).core_mut().graphic_effects.values_mut() {
            *v = 0.0;
        }
        Ok(None)
    })))
}

pub fn compile_change_size(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let delta = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.get_mut(scriptable).core_mut().size += delta;
        Ok(None)
    })))
}

pub fn compile_set_size(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.get_mut(scriptable).core_mut().size = value;
        Ok(None)
    })))
}

pub fn eval_size(interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(interp.project.get(scriptable).core().size))
}

pub fn compile_show(_interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.get_mut(scriptable).core_mut().is_visible = true;
        Ok(None)
    })))
}

pub fn compile_hide(_interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.get_mut(scriptable).core_mut().is_visible = false;
        Ok(None)
    })))
}

pub fn compile_go_to_front(_interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        crate::hats::go_to_front(interp, scriptable);
        Ok(None)
    })))
}

pub fn compile_go_back_layers(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let n = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.move_actor_back(scriptable, n.max(0.0) as usize);
        Ok(None)
    })))
}

/// `switch backdrop to` / `next backdrop` / `background #` delegate to
/// the Stage's own costume machinery, regardless of which
/// scriptable's script invoked them.
pub fn compile_switch_backdrop(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let name = arg_text(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        set_costume(interp, ScriptableId::STAGE, &name);
        Ok(None)
    })))
}

pub fn compile_next_backdrop(_interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let core = interp.project.get_mut(ScriptableId::STAGE).core_mut();
        if !core.costumes.is_empty() {
            core.costume_index = (core.costume_index + 1) % core.costumes.len();
        }
        Ok(None)
    })))
}

pub fn eval_background_number(interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number((interp.project.get(ScriptableId::STAGE).core().costume_index + 1) as f64))
}

