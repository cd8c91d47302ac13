//! Sound block handlers: playback, volume, tempo, drums and notes.

use block_model::{Block, ScriptableId, Value};

use crate::error::Result;
use crate::evaluator::{arg_number, arg_text};
use crate::exec::{Exec, FromFn, Once, Step};
use crate::scheduler::Interpreter;

pub fn compile_play_sound(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let name = arg_text(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.screen.play_sound(&name);
        Ok(None)
    })))
}

pub fn compile_play_sound_until_done(
    interp: &mut Interpreter,
    scriptable: ScriptableId,
    block: &Block,
) -> Result<Box<dyn Exec>> {
    let name = arg_text(interp, scriptable, block, 0)?;
    let mut stream = None;
    Ok(Box::new(FromFn(move |interp: &mut Interpreter| {
        let stream = stream.get_or_insert_with(|| interp.screen.play_sound_until_done(&name));
        if stream.poll_playing() {
            Step::Yield
        } else {
            Step::Done
        }
    })))
}

pub fn compile_stop_all_sounds(_interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.screen.stop_sounds();
        Ok(None)
    })))
}

fn beat_seconds(interp: &Interpreter, beats: f64) -> f64 {
    beats * 60.0 / interp.project.tempo
}

pub fn compile_rest_for_beats(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let beats = arg_number(interp, scriptable, block, 0)?;
    let mut end_time = None;
    Ok(Box::new(FromFn(move |interp: &mut Interpreter| {
        let end = *end_time.get_or_insert_with(|| interp.clock.now() + beat_seconds(interp, beats));
        if interp.clock.now() >= end {
            Step::Done
        } else {
            Step::Yield
        }
    })))
}

pub fn compile_play_drum(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let drum = arg_number(interp, scriptable, block, 0)?;
    let beats = arg_number(interp, scriptable, block, 1)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let secs = beat_seconds(interp, beats);
        interp.screen.play_drum(drum, secs);
        Ok(None)
    })))
}

pub fn compile_play_note(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let note = arg_number(interp, scriptable, block, 0)?;
    let beats = arg_number(interp, scriptable, block, 1)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let secs = beat_seconds(interp, beats);
        interp.screen.play_note(note, secs);
        Ok(None)
    })))
}

pub fn compile_set_instrument(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.get_mut(scriptable).core_mut().instrument = value;
        Ok(None)
    })))
}

pub fn compile_change_volume(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let delta = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.get_mut(scriptable).core_mut().volume += delta;
        Ok(None)
    })))
}

pub fn compile_set_volume(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.get_mut(scriptable).core_mut().volume = value;
        Ok(None)
    })))
}

pub fn eval_volume(interp: &mut Interpreter, scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(interp.project.get(scriptable).core().volume))
}

pub fn compile_change_tempo(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let delta = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.tempo += delta;
        Ok(None)
    })))
}

pub fn compile_set_tempo(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let value = arg_number(interp, scriptable, block, 0)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        interp.project.tempo = value;
        Ok(None)
    })))
}

pub fn eval_tempo(interp: &mut Interpreter, _scriptable: ScriptableId, _block: &Block) -> Result<Value> {
    Ok(Value::Number(interp.project.tempo))
}
