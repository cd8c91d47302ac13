//! Control-flow block handlers: wait, loops, broadcast, stop.

use std::cell::Cell;
use std::rc::Rc;

use block_model::{Block, ScriptableId};

use crate::error::Result;
use crate::evaluator::{arg_bool, arg_body_at, arg_number, arg_text, compile_body};
use crate::event::{ScriptEvent, StopTarget};
use crate::exec::{Exec, FromFn, Step};
use crate::hats::RECEIVE;
use crate::scheduler::Interpreter;

pub fn compile_wait_secs(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let secs = arg_number(interp, scriptable, block, 0)?;
    let mut end_time = None;
    Ok(Box::new(FromFn(move |interp: &mut Interpreter| {
        let end = *end_time.get_or_insert_with(|| interp.clock.now() + secs);
        if interp.clock.now() >= end {
            Step::Done
        } else {
            Step::Yield
        }
    })))
}

/// `forever`: run the body to completion, yield once, repeat without
/// end — `while 1: yield run_script(...); yield`.
struct Forever {
    scriptable: ScriptableId,
    body: Vec<Block>,
    current: Option<Box<dyn Exec>>,
}

impl Exec for Forever {
    fn poll(&mut self, interp: &mut Interpreter) -> Step {
        if self.current.is_none() {
            self.current = Some(compile_body(self.scriptable, &self.body));
        }
        match self.current.as_mut().expect("just populated").poll(interp) {
            Step::Done => {
                self.current = None;
                Step::Yield
            }
            other => other,
        }
    }
}

pub fn compile_forever(_interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let body = arg_body_at(block, 0);
    Ok(Box::new(Forever { scriptable, body, current: None }))
}

/// `repeat`: run the body `times` times, yielding once between each
/// run. `times` is rounded up once, at the start.
struct Repeat {
    scriptable: ScriptableId,
    body: Vec<Block>,
    remaining: i64,
    current: Option<Box<dyn Exec>>,
}

impl Exec for Repeat {
    fn poll(&mut self, interp: &mut Interpreter) -> Step {
        if self.remaining <= 0 {
            return Step::Done;
        }
        if self.current.is_none() {
            self.current = Some(compile_body(self.scriptable, &self.body));
        }
        match self.current.as_mut().expect("just populated").poll(interp) {
            Step::Done => {
                self.current = None;
                self.remaining -= 1;
                Step::Yield
            }
            other => other,
        }
    }
}

pub fn compile_repeat(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let times = arg_number(interp, scriptable, block, 0)?;
    let body = arg_body_at(block, 1);
    Ok(Box::new(Repeat { scriptable, body, remaining: times.ceil() as i64, current: None }))
}

pub fn compile_broadcast(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let message = arg_text(interp, scriptable, block, 0)?;
    Ok(Box::new(crate::exec::Once::new(move |interp: &mut Interpreter| {
        crate::hats::trigger_hats(interp, RECEIVE, Some(&message), None);
        Ok(None)
    })))
}

/// `broadcast and wait`: trigger every matching receiver, then yield
/// until all of them have finished. The shared counter mirrors
/// the source's `threads = set(...)` / callback-driven `.remove`.
struct BroadcastAndWait {
    message: String,
    remaining: Option<Rc<Cell<i64>>>,
}

impl Exec for BroadcastAndWait {
    fn poll(&mut self, interp: &mut Interpreter) -> Step {
        match &self.remaining {
            None => {
                let remaining = Rc::new(Cell::new(0i64));
                {
                    let remaining = remaining.clone();
                    let mut factory = move || -> Box<dyn FnOnce()> {
                        remaining.set(remaining.get() + 1);
                        let remaining = remaining.clone();
                        Box::new(move || remaining.set(remaining.get() - 1))
                    };
                    crate::hats::trigger_hats(interp, RECEIVE, Some(&self.message), Some(&mut factory));
                }
                let done = remaining.get() <= 0;
                self.remaining = Some(remaining);
                if done {
                    Step::Done
                } else {
                    Step::Yield
                }
            }
            Some(remaining) => {
                if remaining.get() <= 0 {
                    Step::Done
                } else {
                    Step::Yield
                }
            }
        }
    }
}

pub fn compile_broadcast_and_wait(
    interp: &mut Interpreter,
    scriptable: ScriptableId,
    block: &Block,
) -> Result<Box<dyn Exec>> {
    let message = arg_text(interp, scriptable, block, 0)?;
    Ok(Box::new(BroadcastAndWait { message, remaining: None }))
}

pub fn compile_if(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let condition = arg_bool(interp, scriptable, block, 0)?;
    let body = if condition { arg_body_at(block, 1) } else { Vec::new() };
    Ok(compile_body(scriptable, &body))
}

pub fn compile_if_else(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let condition = arg_bool(interp, scriptable, block, 0)?;
    let body = if condition { arg_body_at(block, 1) } else { arg_body_at(block, 2) };
    Ok(compile_body(scriptable, &body))
}

/// `wait until`: unlike other boolean inserts, the condition is
/// re-evaluated against the current scriptable state every frame
/// rather than once at compile time.
pub fn compile_wait_until(_interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let block = block.clone();
    Ok(Box::new(FromFn(move |interp: &mut Interpreter| match arg_bool(interp, scriptable, &block, 0) {
        Ok(true) => Step::Done,
        Ok(false) => Step::Yield,
        Err(e) => Step::Error(e),
    })))
}

struct RepeatUntil {
    scriptable: ScriptableId,
    block: Block,
    current: Option<Box<dyn Exec>>,
}

impl Exec for RepeatUntil {
    fn poll(&mut self, interp: &mut Interpreter) -> Step {
        if self.current.is_none() {
            match arg_bool(interp, self.scriptable, &self.block, 0) {
                Ok(true) => return Step::Done,
                Ok(false) => {}
                Err(e) => return Step::Error(e),
            }
            let body = arg_body_at(&self.block, 1);
            self.current = Some(compile_body(self.scriptable, &body));
        }
        match self.current.as_mut().expect("just populated").poll(interp) {
            Step::Done => {
                self.current = None;
                Step::Yield
            }
            other => other,
        }
    }
}

pub fn compile_repeat_until(_interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    Ok(Box::new(RepeatUntil { scriptable, block: block.clone(), current: None }))
}

pub fn compile_stop_script(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let which = arg_text(interp, scriptable, block, 0)?;
    let target = match which.as_str() {
        "all" => StopTarget::All,
        "other scripts in sprite" => StopTarget::OtherScriptsInSprite,
        _ => StopTarget::This,
    };
    Ok(crate::exec::once(ScriptEvent::stop(scriptable, target)))
}
