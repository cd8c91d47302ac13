//! Top-level runtime state, the Script→Thread map, and the
//! cooperative per-frame round.

use std::collections::HashMap;

use block_model::{List, ListRef, Project, Scope, ScriptableId, VarRef, Variable};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::InterpreterConfig;
use crate::event::{ScreenEvent, ScriptEvent, ScriptEventKind, StopTarget};
use crate::exec::{Exec, Step};
use crate::screen::Screen;
use crate::time::{Clock, SystemClock};

/// Identifies a Script for the purposes of the thread map: the
/// scriptable that owns it plus its position in that scriptable's
/// script list. The project model has no separate Script identity of
/// its own — a scriptable/index pair is the stable handle a
/// loader-built `Vec<Script>` naturally offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScriptId {
    pub scriptable: ScriptableId,
    pub index: usize,
}

/// A running Script. `callback` is invoked when the Thread
/// finishes for any reason other than `Interpreter::stop()` — the
/// mechanism `broadcast and wait` uses to know when every
/// triggered receiver has completed.
pub struct Thread {
    exec: Box<dyn Exec>,
    pub scriptable: ScriptableId,
    callback: Option<Box<dyn FnOnce()>>,
}

impl Thread {
    pub fn new(exec: Box<dyn Exec>, scriptable: ScriptableId, callback: Option<Box<dyn FnOnce()>>) -> Self {
        Self { exec, scriptable, callback }
    }
}

/// Top-level runtime state.
pub struct Interpreter {
    pub project: Project,
    pub screen: Box<dyn Screen>,
    pub clock: Box<dyn Clock>,
    threads: HashMap<ScriptId, Thread>,
    pub timer_start: f64,
    pub answer: String,
    pub ask_lock: bool,
    pub drag_sprite: Option<ScriptableId>,
    pub drag_offset: (f64, f64),
    pub has_dragged: bool,
    pub(crate) rng: StdRng,
}

impl Interpreter {
    pub fn new(project: Project, screen: Box<dyn Screen>) -> Self {
        Self::with_config(project, screen, Box::new(SystemClock::new()), &InterpreterConfig::default())
    }

    pub fn with_clock(project: Project, screen: Box<dyn Screen>, clock: Box<dyn Clock>) -> Self {
        Self::with_config(project, screen, clock, &InterpreterConfig::default())
    }

    /// `config.rng_seed` makes `pick random` / list `"any"` reproducible
    /// under test; `None` seeds from the OS entropy source instead.
    pub fn with_config(mut project: Project, screen: Box<dyn Screen>, clock: Box<dyn Clock>, config: &InterpreterConfig) -> Self {
        let ids: Vec<ScriptableId> = project.iter_ids().collect();
        for id in ids {
            block_model::augment(project.get_mut(id));
        }
        let timer_start = clock.now();
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            project,
            screen,
            clock,
            threads: HashMap::new(),
            timer_start,
            answer: String::new(),
            ask_lock: false,
            drag_sprite: None,
            drag_offset: (0.0, 0.0),
            has_dragged: false,
            rng,
        }
    }

    /// Trigger every `whenGreenFlag` hat.
    pub fn start(&mut self) {
        self.stop();
        crate::hats::trigger_hats(self, crate::hats::GREEN_FLAG, None, None);
    }

    /// Drop all Threads without invoking their callbacks, and reset ask
    /// state.
    pub fn stop(&mut self) {
        self.threads.clear();
        self.answer = String::new();
        self.ask_lock = false;
    }

    /// Replace any existing Thread for `id` (finishing it first — its
    /// callback still fires, matching the source's restart-finishes-prior
    /// behaviour) and start running `exec` as a new one.
    pub fn push_thread(&mut self, id: ScriptId, exec: Box<dyn Exec>, scriptable: ScriptableId, callback: Option<Box<dyn FnOnce()>>) {
        if let Some(prev) = self.threads.remove(&id) {
            Self::finish(prev);
        }
        self.threads.insert(id, Thread::new(exec, scriptable, callback));
    }

    pub fn thread_count(&self) -> usize {
        self.threads.len()
    }

    /// Resolve a rebound `var` insert to its cell.
    pub fn variable(&self, r: &VarRef) -> Option<&Variable> {
        match r.scope {
            Scope::Local(id) => self.project.get(id).core().variables.get(&r.name),
            Scope::Global => self.project.global_variables().get(&r.name),
        }
    }

    pub fn variable_mut(&mut self, r: &VarRef) -> Option<&mut Variable> {
        match r.scope {
            Scope::Local(id) => self.project.get_mut(id).core_mut().variables.get_mut(&r.name),
            Scope::Global => self.project.global_variables_mut().get_mut(&r.name),
        }
    }

    /// Resolve a rebound `list` insert to its cell.
    pub fn list(&self, r: &ListRef) -> Option<&List> {
        match r.scope {
            Scope::Local(id) => self.project.get(id).core().lists.get(&r.name),
            Scope::Global => self.project.global_lists().get(&r.name),
        }
    }

    pub fn list_mut(&mut self, r: &ListRef) -> Option<&mut List> {
        match r.scope {
            Scope::Local(id) => self.project.get_mut(id).core_mut().lists.get_mut(&r.name),
            Scope::Global => self.project.global_lists_mut().get_mut(&r.name),
        }
    }

    fn finish(thread: Thread) {
        if let Some(cb) = thread.callback {
            cb();
        }
    }

    fn drag_step(&mut self) {
        if let Some(sprite) = self.drag_sprite {
            let (mx, my) = self.screen.get_mouse_pos();
            let (ox, oy) = self.drag_offset;
            let new_pos = (mx + ox, my + oy);
            if let Some(s) = self.project.get_mut(sprite).as_sprite_mut() {
                if s.position != new_pos {
                    self.has_dragged = true;
                    s.position = new_pos;
                }
            }
        }
    }

    fn handle_screen_event(&mut self, event: &ScreenEvent) {
        match event {
            ScreenEvent::KeyPressed(name) => {
                crate::hats::trigger_hats(self, crate::hats::KEY_PRESSED, Some(name), None);
            }
            ScreenEvent::MouseDown => crate::hats::handle_mouse_down(self),
            ScreenEvent::MouseUp => crate::hats::handle_mouse_up(self),
        }
    }

    /// Execute one frame. Call no more than 40 times per second.
    pub fn tick(&mut self, events: &[ScreenEvent]) -> Vec<ScriptEvent> {
        self.drag_step();
        for event in events {
            self.handle_screen_event(event);
        }

        let mut out = Vec::new();
        'pass: loop {
            let keys: Vec<ScriptId> = self.threads.keys().copied().collect();
            for key in keys {
                let mut thread = match self.threads.remove(&key) {
                    Some(t) => t,
                    None => continue, // already removed earlier this pass
                };
                let mut mutated = false;
                loop {
                    match thread.exec.poll(self) {
                        Step::Yield => {
                            self.threads.insert(key, thread);
                            break;
                        }
                        Step::Done => {
                            tracing::trace!(scriptable = ?thread.scriptable, "thread finished");
                            Self::finish(thread);
                            mutated = true;
                            break;
                        }
                        Step::Emit(event) => match &event.kind {
                            ScriptEventKind::Stop(StopTarget::All) => {
                                tracing::debug!("stop all: tick ends early");
                                self.stop();
                                return out;
                            }
                            ScriptEventKind::Stop(StopTarget::OtherScriptsInSprite) => {
                                let scriptable = thread.scriptable;
                                let siblings: Vec<ScriptId> = self
                                    .threads
                                    .iter()
                                    .filter(|(k, t)| **k != key && t.scriptable == scriptable)
                                    .map(|(k, _)| *k)
                                    .collect();
                                for sibling in siblings {
                                    if let Some(t) = self.threads.remove(&sibling) {
                                        Self::finish(t);
                                    }
                                }
                                self.threads.insert(key, thread);
                                mutated = true;
                                break;
                            }
                            ScriptEventKind::Stop(StopTarget::This) => {
                                Self::finish(thread);
                                mutated = true;
                                break;
                            }
                            _ => {
                                out.push(event);
                                continue;
                            }
                        },
                        Step::Error(e) => {
                            tracing::warn!(scriptable = ?thread.scriptable, error = %e, "thread raised, removing");
                            mutated = true;
                            break;
                        }
                    }
                }
                if mutated {
                    continue 'pass;
                }
            }
            break;
        }
        out
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("threads", &self.threads.len())
            .field("answer", &self.answer)
            .field("ask_lock", &self.ask_lock)
            .finish()
    }
}
