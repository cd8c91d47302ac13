//! The hand-written coroutine abstraction standing in for the
//! source's generators — there are no first-class generators on
//! stable Rust. A `Thread` owns one boxed `Exec`; the scheduler calls
//! `poll` once per scheduling step and keeps calling it, within the
//! same frame, for as long as it returns `Emit` — exactly mirroring
//! `Thread.tick()`'s `while event: yield event; event = generator.next()`.
//!
//! Nested bodies (forever/repeat/if/.. bodies, whole scripts) are
//! built as `Sequence`/combinator `Exec`s rather than flattened by a
//! generic runtime walker, which is how the source's own
//! `flatten_generators` would do it. A
//! `Sequence` compiles each of its blocks just before running it, not
//! up front, so a statement's arguments see the effects of the
//! statements that ran before it (`set x to 5; move (x position)`
//! must read the *new* x).
//!
//! Every `poll` takes the `Interpreter` by reference rather than
//! capturing it, since a Thread's Exec lives inside the Interpreter's
//! own thread map — capturing would be self-referential. The scheduler
//! temporarily removes a Thread's Exec from the map before polling it.

use block_model::{Block, ScriptableId};

use crate::error::InterpError;
use crate::event::ScriptEvent;
use crate::scheduler::Interpreter;

/// What one `poll` produced.
pub enum Step {
    /// Cooperative yield point — advance one frame, resume here next tick.
    Yield,
    /// Surface this event to the scheduler/screen; poll again immediately.
    Emit(ScriptEvent),
    /// This Exec has nothing further to run.
    Done,
    /// Fatal to this Thread only; the scheduler removes it and
    /// continues the others.
    Error(InterpError),
}

/// `!Send` by default: there is exactly one executor, driven from
/// `Interpreter::tick`, never handed across threads.
pub trait Exec {
    fn poll(&mut self, interp: &mut Interpreter) -> Step;
}

/// Runs a list of blocks in order on one scriptable, compiling
/// (evaluating args and dispatching) each one lazily, right before it
/// first runs.
pub struct Sequence {
    scriptable: ScriptableId,
    blocks: Vec<Block>,
    index: usize,
    current: Option<Box<dyn Exec>>,
}

impl Sequence {
    pub fn new(scriptable: ScriptableId, blocks: Vec<Block>) -> Self {
        Self { scriptable, blocks, index: 0, current: None }
    }

    pub fn empty(scriptable: ScriptableId) -> Self {
        Self::new(scriptable, Vec::new())
    }
}

impl Exec for Sequence {
    fn poll(&mut self, interp: &mut Interpreter) -> Step {
        loop {
            if self.current.is_none() {
                match self.blocks.get(self.index) {
                    None => return Step::Done,
                    Some(block) => match crate::dispatch::compile_command(interp, self.scriptable, block) {
                        Ok(exec) => self.current = Some(exec),
                        Err(e) => return Step::Error(e),
                    },
                }
            }
            let child = self.current.as_mut().expect("just populated");
            match child.poll(interp) {
                Step::Done => {
                    self.current = None;
                    self.index += 1;
                    continue;
                }
                other => return other,
            }
        }
    }
}

/// Wraps a `FnMut` that runs exactly once, optionally producing a
/// ScriptEvent, for the many zero-yield stack blocks (motion, looks,
/// variable/list mutators, ...).
pub struct Once<F: FnMut(&mut Interpreter) -> Result<Option<ScriptEvent>, InterpError>> {
    f: Option<F>,
}

impl<F: FnMut(&mut Interpreter) -> Result<Option<ScriptEvent>, InterpError>> Once<F> {
    pub fn new(f: F) -> Self {
        Self { f: Some(f) }
    }
}

impl<F: FnMut(&mut Interpreter) -> Result<Option<ScriptEvent>, InterpError>> Exec for Once<F> {
    fn poll(&mut self, interp: &mut Interpreter) -> Step {
        match self.f.take() {
            Some(mut f) => match f(interp) {
                Ok(Some(event)) => Step::Emit(event),
                Ok(None) => Step::Done,
                Err(e) => Step::Error(e),
            },
            None => Step::Done,
        }
    }
}

/// A boxed Exec built from a closure polled directly — the escape
/// hatch used by control-flow handlers (`wait`, `glide`, `forever`, ...)
/// that need hand-rolled state across polls.
pub struct FromFn<F: FnMut(&mut Interpreter) -> Step>(pub F);

impl<F: FnMut(&mut Interpreter) -> Step> Exec for FromFn<F> {
    fn poll(&mut self, interp: &mut Interpreter) -> Step {
        (self.0)(interp)
    }
}

pub fn once(event: ScriptEvent) -> Box<dyn Exec> {
    let mut emitted = false;
    Box::new(FromFn(move |_interp| {
        if emitted {
            Step::Done
        } else {
            emitted = true;
            Step::Emit(event.clone())
        }
    }))
}

pub fn noop() -> Box<dyn Exec> {
    Box::new(FromFn(|_interp| Step::Done))
}
