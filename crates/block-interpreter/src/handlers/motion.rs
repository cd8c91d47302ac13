//! Motion block handlers: position, direction, gliding, pointing.

use block_model::{Block, ScriptableId, Value};

use crate::error::Result;
use crate::evaluator::{arg_number, arg_value};
use crate::exec::{Exec, Once};
use crate::scheduler::Interpreter;

fn set_position(interp: &mut Interpreter, scriptable: ScriptableId, x: f64, y: f64) {
    let (is_pen_down, pen_color, pen_size, old_pos) = {
        let sprite = interp.project.get(scriptable).as_sprite();
        match sprite {
            Some(s) => (s.is_pen_down, s.pen_color, s.pen_size, s.position),
            None => return,
        }
    };
    if is_pen_down {
        interp.screen.draw_line(old_pos, (x, y), pen_color, pen_size);
    }
    if let Some(sprite) = interp.project.get_mut(scriptable).as_sprite_mut() {
        sprite.position = (x, y);
    }
}

pub fn compile_move_steps(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let distance = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let (direction, (x, y)) = {
            let s = interp.project.get(scriptable);
            (s.direction(), s.position())
        };
        let radians = direction.to_radians();
        let (nx, ny) = (x + radians.sin() * distance, y + radians.cos() * distance);
        set_position(interp, scriptable, nx, ny);
        Ok(None)
    })))
}

/// Normalizes into the source's `get_direction` range, matching
/// `(direction + 179) % 360 - 179` exactly.
fn normalize_direction(direction: f64) -> f64 {
    (direction + 179.0).rem_euclid(360.0) - 179.0
}

pub fn compile_turn_left(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let angle = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(sprite) = interp.project.get_mut(scriptable).as_sprite_mut() {
            sprite.direction = normalize_direction(sprite.direction - angle);
        }
        Ok(None)
    })))
}

pub fn compile_turn_right(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let angle = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(sprite) = interp.project.get_mut(scriptable).as_sprite_mut() {
            sprite.direction = normalize_direction(sprite.direction + angle);
        }
        Ok(None)
    })))
}

pub fn compile_point_in_direction(
    interp: &mut Interpreter,
    scriptable: ScriptableId,
    block: &Block,
) -> Result<Box<dyn Exec>> {
    let direction = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(sprite) = interp.project.get_mut(scriptable).as_sprite_mut() {
            sprite.direction = normalize_direction(direction);
        }
        Ok(None)
    })))
}

pub fn compile_point_towards(
    interp: &mut Interpreter,
    scriptable: ScriptableId,
    block: &Block,
) -> Result<Box<dyn Exec>> {
    let target = arg_value(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let (x, y) = interp.project.get(scriptable).position();
        let (ox, oy) = match target {
            Value::MousePointer => interp.screen.get_mouse_pos(),
            Value::Sprite(id) => interp.project.get(id).position(),
            Value::Stage => (0.0, 0.0),
            _ => return Ok(None),
        };
        let (dx, dy) = (ox - x, oy - y);
        if let Some(sprite) = interp.project.get_mut(scriptable).as_sprite_mut() {
            // atan2(dx, dy), not (dy, dx) — "up" is 0 degrees.
            sprite.direction = dx.atan2(dy).to_degrees();
        }
        Ok(None)
    })))
}

pub fn compile_go_to_xy(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let x = arg_number(interp, scriptable, block, 0)?;
    let y = arg_number(interp, scriptable, block, 1)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        set_position(interp, scriptable, x, y);
        Ok(None)
    })))
}

pub fn compile_go_to_sprite(
    interp: &mut Interpreter,
    scriptable: ScriptableId,
    block: &Block,
) -> Result<Box<dyn Exec>> {
    let target = arg_value(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let (x, y) = match target {
            Value::MousePointer => interp.screen.get_mouse_pos(),
            Value::Sprite(id) => interp.project.get(id).position(),
            Value::Stage => (0.0, 0.0),
            _ => return Ok(None),
        };
        set_position(interp, scriptable, x, y);
        Ok(None)
    })))
}

pub fn compile_glide(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let duration = arg_number(interp, scriptable, block, 0)?;
    let end_x = arg_number(interp, scriptable, block, 1)?;
    let end_y = arg_number(interp, scriptable, block, 2)?;
    let (start_x, start_y) = interp.project.get(scriptable).position();
    let mut start_time: Option<f64> = None;
    Ok(Box::new(crate::exec::FromFn(move |interp: &mut Interpreter| {
        let now = interp.clock.now();
        let start_time = *start_time.get_or_insert(now);
        let end_time = start_time + duration;
        if now > end_time {
            return crate::exec::Step::Done;
        }
        let t = if duration > 0.0 { (now - start_time) / duration } else { 1.0 };
        set_position(interp, scriptable, start_x * (1.0 - t) + end_x * t, start_y * (1.0 - t) + end_y * t);
        crate::exec::Step::Yield
    })))
}

pub fn compile_change_x(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let delta = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let (x, y) = interp.project.get(scriptable).position();
        set_position(interp, scriptable, x + delta, y);
        Ok(None)
    })))
}

pub fn compile_set_x(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let (_, y) = interp.project.get(scriptable).position();
        set_position(interp, scriptable, value, y);
        Ok(None)
    })))
}

pub fn compile_change_y(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let delta = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let (x, y) = interp.project.get(scriptable).position();
        set_position(interp, scriptable, x, y + delta);
        Ok(None)
    })))
}

pub fn compile_set_y(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let (x, _) = interp.project.get(scriptable).position();
        set_position(interp, scriptable, x, value);
        Ok(None)
    })))
}

pub fn eval_x_position(interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(interp.project.get(scriptable).position().0))
}

pub fn eval_y_position(interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(interp.project.get(scriptable).position().1))
}

pub fn eval_direction(interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(normalize_direction(interp.project.get(scriptable).direction())))
}
