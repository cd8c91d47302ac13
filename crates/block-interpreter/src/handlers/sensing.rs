//! Sensing block handlers: touching, ask/answer, mouse, timer, attributes.

use block_model::{Block, ScriptableId, Value};

use crate::error::{InterpError, Result};
use crate::evaluator::{arg_text, arg_value};
use crate::exec::{Exec, FromFn, Once};
use crate::geometry::bounds;
use crate::handlers::pen::color_from_value;
use crate::scheduler::Interpreter;
use crate::screen::AskStream;

pub fn eval_touching(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let target = arg_value(interp, scriptable, block, 0)?;
    let rect = bounds(interp.project.get(scriptable));
    let result = match target {
        Value::Edge => rect.off_stage(),
        Value::MousePointer => {
            let mouse = interp.screen.get_mouse_pos();
            rect.collide_point(mouse) && interp.screen.touching_mouse(scriptable)
        }
        Value::Sprite(other) => {
            rect.collide_rect(bounds(interp.project.get(other))) && interp.screen.touching_sprite(scriptable, other)
        }
        _ => false,
    };
    Ok(Value::Bool(result))
}

pub fn eval_touching_color(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let color = color_from_value(&arg_value(interp, scriptable, block, 0)?);
    Ok(Value::Bool(interp.screen.touching_color(scriptable, color)))
}

pub fn eval_color_is_touching_color(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let color = color_from_value(&arg_value(interp, scriptable, block, 0)?);
    let over = color_from_value(&arg_value(interp, scriptable, block, 1)?);
    Ok(Value::Bool(interp.screen.touching_color_over(scriptable, color, over)))
}

/// `ask and wait`: blocked while another ask is in flight (`ask_lock`),
/// then polls the Screen's answer stream once per frame until it
/// produces a non-empty answer.
pub fn compile_ask_and_wait(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let prompt = arg_text(interp, scriptable, block, 0)?;
    let mut stream: Option<Box<dyn AskStream>> = None;
    let mut locked = false;
    Ok(Box::new(FromFn(move |interp: &mut Interpreter| {
        if !locked {
            if interp.ask_lock {
                return crate::exec::Step::Yield;
            }
            interp.ask_lock = true;
            locked = true;
        }
        let stream = stream.get_or_insert_with(|| interp.screen.ask(scriptable, &prompt));
        match stream.poll_answer() {
            Some(answer) if !answer.is_empty() => {
                interp.answer = answer;
                interp.ask_lock = false;
                crate::exec::Step::Done
            }
            _ => crate::exec::Step::Yield,
        }
    })))
}

pub fn eval_answer(interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Text(interp.answer.clone()))
}

pub fn eval_mouse_x(interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(interp.screen.get_mouse_pos().0))
}

pub fn eval_mouse_y(interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(interp.screen.get_mouse_pos().1))
}

pub fn eval_mouse_down(interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Bool(interp.screen.is_mouse_down()))
}

pub fn eval_key_pressed(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let key = arg_text(interp, scriptable, block, 0)?;
    Ok(Value::Bool(interp.screen.is_key_pressed(&key)))
}

pub fn eval_distance_to(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let target = arg_value(interp, scriptable, block, 0)?;
    let (x, y) = interp.project.get(scriptable).position();
    let (ox, oy) = match target {
        Value::MousePointer => interp.screen.get_mouse_pos(),
        Value::Sprite(id) => interp.project.get(id).position(),
        Value::Stage => (0.0, 0.0),
        _ => (x, y),
    };
    Ok(Value::Number(((x - ox).powi(2) + (y - oy).powi(2)).sqrt()))
}

pub fn compile_reset_timer(_interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.timer_start = interp.clock.now();
        Ok(None)
    })))
}

pub fn eval_timer(interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(interp.clock.now() - interp.timer_start))
}

/// `getAttribute:of:`: the named built-in attributes first, falling
/// back to a variable of that name on the target scriptable.
pub fn eval_attribute_of(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let name = arg_text(interp, scriptable, block, 0)?;
    let target = arg_value(interp, scriptable, block, 1)?;
    let target_id = match target {
        Value::Sprite(id) => id,
        Value::Stage => ScriptableId::STAGE,
        _ => return Err(InterpError::MissingEntity(name)),
    };
    match name.as_str() {
        "x position" => Ok(Value::Number(interp.project.get(target_id).position().0)),
        "y position" => Ok(Value::Number(interp.project.get(target_id).position().1)),
        "direction" => Ok(Value::Number(interp.project.get(target_id).direction())),
        "costume #" => Ok(Value::Number((interp.project.get(target_id).core().costume_index + 1) as f64)),
        "size" => Ok(Value::Number(interp.project.get(target_id).core().size)),
        "volume" => Ok(Value::Number(interp.project.get(target_id).core().volume)),
        _ => match interp.project.get(target_id).core().variables.get(&name) {
            Some(var) => Ok(var.value.clone()),
            None => Err(InterpError::MissingEntity(name)),
        },
    }
}

pub fn eval_loudness(_interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(20.0))
}
