//! Pen block handlers: drawing, colour, stamping.

use block_model::{Block, Color, ScriptableId};

use crate::error::Result;
use crate::evaluator::{arg_number, arg_value};
use crate::exec::{once, Exec, Once};
use crate::scheduler::Interpreter;

/// Scratch colors are picked as packed 24-bit RGB numbers (`0xRRGGBB`)
/// rather than a dedicated Value variant; this decodes one the same
/// way `penColor:`/`touching color` consume whatever the color-picker
/// insert produced.
pub(crate) fn color_from_value(value: &block_model::Value) -> Color {
    let packed = value.as_number().unwrap_or(0.0) as i64 as u32;
    Color::rgb(
        ((packed >> 16) & 0xFF) as u8,
        ((packed >> 8) & 0xFF) as u8,
        (packed & 0xFF) as u8,
    )
}

pub fn compile_pen_clear(_interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(once(crate::event::ScriptEvent::new(scriptable, crate::event::ScriptEventKind::Clear)))
}

pub fn compile_pen_down(_interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(s) = interp.project.get_mut(scriptable).as_sprite_mut() {
            s.is_pen_down = true;
        }
        Ok(None)
    })))
}

pub fn compile_pen_up(_interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(s) = interp.project.get_mut(scriptable).as_sprite_mut() {
            s.is_pen_down = false;
        }
        Ok(None)
    })))
}

pub fn compile_set_pen_color(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_value(interp, scriptable, block, 0)?;
    let color = color_from_value(&value);
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(s) = interp.project.get_mut(scriptable).as_sprite_mut() {
            s.pen_color = color;
        }
        Ok(None)
    })))
}

pub fn compile_change_pen_hue(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let delta = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(s) = interp.project.get_mut(scriptable).as_sprite_mut() {
            s.pen_hue += delta;
        }
        Ok(None)
    })))
}

pub fn compile_set_pen_hue(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(s) = interp.project.get_mut(scriptable).as_sprite_mut() {
            s.pen_hue = value;
        }
        Ok(None)
    })))
}

pub fn compile_change_pen_shade(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let delta = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(s) = interp.project.get_mut(scriptable).as_sprite_mut() {
            s.pen_shade += delta;
        }
        Ok(None)
    })))
}

pub fn compile_set_pen_shade(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(s) = interp.project.get_mut(scriptable).as_sprite_mut() {
            s.pen_shade = value;
        }
        Ok(None)
    })))
}

pub fn compile_change_pen_size(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let delta = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(s) = interp.project.get_mut(scriptable).as_sprite_mut() {
            s.pen_size += delta;
        }
        Ok(None)
    })))
}

pub fn compile_set_pen_size(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(s) = interp.project.get_mut(scriptable).as_sprite_mut() {
            s.pen_size = value;
        }
        Ok(None)
    })))
}

pub fn compile_stamp(_interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(once(crate::event::ScriptEvent::new(scriptable, crate::event::ScriptEventKind::Stamp)))
}
