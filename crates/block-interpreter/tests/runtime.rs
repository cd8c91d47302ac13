//! End-to-end scheduler/evaluator behaviour.
//!
//! Builds small Projects by hand (mirroring the REPL demo's use of
//! `block_model::builder`, since this crate never parses project
//! files) and drives them through `Interpreter::tick`, asserting on
//! the `ScriptEvent`s surfaced and on post-tick interpreter state.

use std::cell::Cell;
use std::rc::Rc;

use block_interpreter::{Interpreter, ManualClock, NullScreen, ScriptEvent, ScriptEventKind, Screen};
use block_model::builder::{block, body, expr, hat, num, script, text};
use block_model::{Command, Project, ScriptableId, Sprite, Value};

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn interpreter_with_manual_clock(project: Project) -> (Interpreter, Rc<ManualClock>) {
    let clock = Rc::new(ManualClock::new());
    let interp = Interpreter::with_clock(project, Box::new(NullScreen), Box::new(clock.clone()));
    (interp, clock)
}

fn says<'a>(events: &'a [ScriptEvent], scriptable: ScriptableId) -> Vec<&'a str> {
    events
        .iter()
        .filter_map(|e| match (&e.kind, e.scriptable == scriptable) {
            (ScriptEventKind::Say(Some(text)), true) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn any_say(events: &[ScriptEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match &e.kind {
            ScriptEventKind::Say(Some(text)) => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

// ─── green flag + say ──────────────────────────────────────────────────────

#[test]
fn green_flag_say_emits_on_first_tick() {
    let mut project = Project::new();
    project
        .stage_mut()
        .core_mut()
        .scripts
        .push(script(vec![hat(Command::WhenGreenFlag, vec![]), block(Command::Say, vec![text("hi")])]));

    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();

    let events = interp.tick(&[]);
    assert_eq!(says(&events, ScriptableId::STAGE), vec!["hi"]);
    assert_eq!(interp.thread_count(), 0, "thread should finish in the same frame");
}

// ─── wait composition ───────────────────────────────────────────────────────

#[test]
fn wait_secs_delays_subsequent_say_until_duration_elapses() {
    let mut project = Project::new();
    project.stage_mut().core_mut().scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        block(Command::Say, vec![text("a")]),
        block(Command::WaitSecs, vec![num(0.1)]),
        block(Command::Say, vec![text("b")]),
    ]));

    let (mut interp, clock) = interpreter_with_manual_clock(project);
    interp.start();

    let frame0 = interp.tick(&[]);
    assert_eq!(any_say(&frame0), vec!["a"]);

    // frames 1..3 at 40Hz (0.025s each) stay under the 0.1s wait.
    for _ in 0..3 {
        clock.advance(0.025);
        let events = interp.tick(&[]);
        assert!(any_say(&events).is_empty());
    }

    // frame 4 crosses the 0.1s threshold.
    clock.advance(0.025);
    let frame4 = interp.tick(&[]);
    assert_eq!(any_say(&frame4), vec!["b"]);

    assert_eq!(interp.thread_count(), 0);
}

// ─── broadcast / receive ────────────────────────────────────────────────────

#[test]
fn broadcast_triggers_matching_receiver_same_frame() {
    let mut project = Project::new();
    project
        .stage_mut()
        .core_mut()
        .scripts
        .push(script(vec![hat(Command::WhenGreenFlag, vec![]), block(Command::Broadcast, vec![text("go")])]));

    let mut sprite = Sprite::new("Sprite1");
    sprite
        .core
        .scripts
        .push(script(vec![hat(Command::WhenIReceive, vec![text("go")]), block(Command::Say, vec![text("ok")])]));
    let sprite_id = project.add_sprite(sprite);

    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();

    let events = interp.tick(&[]);
    assert_eq!(says(&events, sprite_id), vec!["ok"]);
    assert_eq!(any_say(&events).len(), 1, "exactly one say event this frame");
    assert_eq!(interp.thread_count(), 0, "both broadcaster and receiver finish the same frame");
}

// ─── broadcast and wait ─────────────────────────────────────────────────────

#[test]
fn broadcast_and_wait_orders_after_receiver() {
    let mut project = Project::new();
    project.stage_mut().core_mut().scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        block(Command::BroadcastAndWait, vec![text("m")]),
        block(Command::Say, vec![text("done")]),
    ]));

    let mut sprite = Sprite::new("Sprite1");
    sprite.core.scripts.push(script(vec![
        hat(Command::WhenIReceive, vec![text("m")]),
        block(Command::WaitSecs, vec![num(0.05)]),
        block(Command::Say, vec![text("ok")]),
    ]));
    project.add_sprite(sprite);

    let (mut interp, clock) = interpreter_with_manual_clock(project);
    interp.start();

    // Frame 0: broadcaster triggers the receiver's Thread and yields on it.
    let frame0 = interp.tick(&[]);
    assert!(any_say(&frame0).is_empty());

    // Frame 1: the receiver runs for the first time, capturing its wait's
    // baseline against the clock's current (still zero) value.
    let frame1 = interp.tick(&[]);
    assert!(any_say(&frame1).is_empty());

    // Advance past the receiver's 0.05s wait.
    clock.advance(0.06);
    let mut all_events = Vec::new();
    for _ in 0..3 {
        all_events.extend(interp.tick(&[]));
        if interp.thread_count() == 0 {
            break;
        }
    }

    let order: Vec<&str> = any_say(&all_events);
    let ok_pos = order.iter().position(|s| *s == "ok").expect("ok said");
    let done_pos = order.iter().position(|s| *s == "done").expect("done said");
    assert!(ok_pos < done_pos, "\"done\" must not be said until after \"ok\": {order:?}");
}

// ─── stop all ───────────────────────────────────────────────────────────────

#[test]
fn stop_all_empties_threads() {
    let mut project = Project::new();
    project
        .stage_mut()
        .core_mut()
        .scripts
        .push(script(vec![hat(Command::WhenGreenFlag, vec![]), block(Command::Forever, vec![body(vec![])])]));

    let mut sprite = Sprite::new("Sprite1");
    sprite
        .core
        .scripts
        .push(script(vec![hat(Command::WhenGreenFlag, vec![]), block(Command::Forever, vec![body(vec![])])]));
    sprite.core.scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        block(Command::WaitSecs, vec![num(0.01)]),
        block(Command::StopScript, vec![text("all")]),
    ]));
    project.add_sprite(sprite);

    let (mut interp, clock) = interpreter_with_manual_clock(project);
    interp.start();
    assert_eq!(interp.thread_count(), 3);

    interp.tick(&[]);
    clock.advance(0.02);
    interp.tick(&[]);

    assert_eq!(interp.thread_count(), 0);
    assert_eq!(interp.answer, "");
    assert!(!interp.ask_lock);
}

// ─── ask serialisation ──────────────────────────────────────────────────────

/// A screen whose `ask` answers only after `answer_after` polls, so a
/// test can observe `ask_lock` contention across two concurrent asks.
struct SlowAskScreen {
    answer_after: u32,
}

struct SlowAskStream {
    remaining: Cell<u32>,
    answer: String,
}

impl block_interpreter::AskStream for SlowAskStream {
    fn poll_answer(&mut self) -> Option<String> {
        if self.remaining.get() == 0 {
            Some(self.answer.clone())
        } else {
            self.remaining.set(self.remaining.get() - 1);
            Some(String::new())
        }
    }
}

impl Screen for SlowAskScreen {
    fn get_mouse_pos(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
    fn is_mouse_down(&self) -> bool {
        false
    }
    fn is_key_pressed(&self, _name: &str) -> bool {
        false
    }
    fn touching_mouse(&self, _sprite: ScriptableId) -> bool {
        false
    }
    fn touching_sprite(&self, _sprite: ScriptableId, _other: ScriptableId) -> bool {
        false
    }
    fn touching_color(&self, _sprite: ScriptableId, _color: block_model::Color) -> bool {
        false
    }
    fn touching_color_over(&self, _sprite: ScriptableId, _c: block_model::Color, _o: block_model::Color) -> bool {
        false
    }
    fn ask(&mut self, scriptable: ScriptableId, _prompt: &str) -> Box<dyn block_interpreter::AskStream> {
        Box::new(SlowAskStream { remaining: Cell::new(self.answer_after), answer: format!("{scriptable:?}") })
    }
    fn play_sound(&mut self, _sound_name: &str) {}
    fn play_sound_until_done(&mut self, _sound_name: &str) -> Box<dyn block_interpreter::SoundStream> {
        unimplemented!("not exercised by this test")
    }
    fn stop_sounds(&mut self) {}
    fn draw_line(&mut self, _s: (f64, f64), _e: (f64, f64), _c: block_model::Color, _sz: f64) {}
    fn play_drum(&mut self, _drum: f64, _secs: f64) {}
    fn play_note(&mut self, _note: f64, _secs: f64) {}
}

#[test]
fn ask_serialises_across_sprites() {
    let mut project = Project::new();
    let mut a = Sprite::new("A");
    a.core
        .scripts
        .push(script(vec![hat(Command::WhenGreenFlag, vec![]), block(Command::AskAndWait, vec![text("?")])]));
    project.add_sprite(a);
    let mut b = Sprite::new("B");
    b.core
        .scripts
        .push(script(vec![hat(Command::WhenGreenFlag, vec![]), block(Command::AskAndWait, vec![text("?")])]));
    project.add_sprite(b);

    let mut interp = Interpreter::new(project, Box::new(SlowAskScreen { answer_after: 2 }));
    interp.start();

    let mut saw_lock_while_two_threads_alive = false;
    for _ in 0..10 {
        interp.tick(&[]);
        if interp.thread_count() == 2 {
            saw_lock_while_two_threads_alive = interp.ask_lock;
        }
        if interp.thread_count() == 0 {
            break;
        }
    }
    assert!(saw_lock_while_two_threads_alive, "the lock should be held while both asks are pending");
    assert_eq!(interp.thread_count(), 0, "both asks eventually resolve");
    assert!(!interp.ask_lock, "lock released once both asks finish");
}

// ─── Invariants & boundary behaviours ───────────────────────────────────────

#[test]
fn invariant_pushing_the_same_script_twice_replaces_the_thread() {
    let mut project = Project::new();
    project
        .stage_mut()
        .core_mut()
        .scripts
        .push(script(vec![hat(Command::WhenGreenFlag, vec![]), block(Command::Forever, vec![body(vec![])])]));
    let mut interp = Interpreter::new(project, Box::new(NullScreen));

    block_interpreter::hats::trigger_hats(&mut interp, Command::WhenGreenFlag, None, None);
    assert_eq!(interp.thread_count(), 1);
    block_interpreter::hats::trigger_hats(&mut interp, Command::WhenGreenFlag, None, None);
    assert_eq!(interp.thread_count(), 1, "re-triggering the same Script replaces its Thread, not adds a second one");
}

#[test]
fn invariant_stop_resets_ask_state() {
    let mut project = Project::new();
    project
        .stage_mut()
        .core_mut()
        .scripts
        .push(script(vec![hat(Command::WhenGreenFlag, vec![]), block(Command::Forever, vec![body(vec![])])]));
    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();
    interp.answer = "stale".into();
    interp.ask_lock = true;

    interp.stop();

    assert_eq!(interp.thread_count(), 0);
    assert_eq!(interp.answer, "");
    assert!(!interp.ask_lock);
}

#[test]
fn boundary_repeat_zero_runs_body_zero_times() {
    let mut project = Project::new();
    project.stage_mut().core_mut().scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        block(Command::Repeat, vec![num(0.0), body(vec![block(Command::Say, vec![text("nope")])])]),
        block(Command::Say, vec![text("after")]),
    ]));
    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();
    let events = interp.tick(&[]);
    assert_eq!(any_say(&events), vec!["after"]);
}

#[test]
fn boundary_repeat_fractional_count_rounds_up() {
    let mut project = Project::new();
    project.set_global("n", Value::Number(0.0));
    let set_to = block(Command::SetVarTo, vec![text("n"), num(0.0)]);
    let change = block(Command::ChangeVarBy, vec![text("n"), num(1.0)]);
    project.stage_mut().core_mut().scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        set_to,
        block(Command::Repeat, vec![num(0.4), body(vec![change])]),
    ]));

    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();
    interp.tick(&[]);

    let value = interp.project.global_variables().get("n").unwrap().value.clone();
    assert_eq!(value, Value::Number(1.0), "repeat(0.4) runs its body once (ceiling)");
}

#[test]
fn boundary_item_of_out_of_range_returns_empty_string() {
    let mut project = Project::new();
    project.set_global("result", Value::Text(String::new()));
    project.stage_mut().core_mut().scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        block(
            Command::SetVarTo,
            vec![text("result"), expr(block(Command::ItemOfList, vec![num(5.0), text("xs")]))],
        ),
    ]));

    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();
    interp.tick(&[]);

    let value = interp.project.global_variables().get("result").unwrap().value.clone();
    assert_eq!(value, Value::Text(String::new()));
}

#[test]
fn invariant_direction_normalizes_to_open_closed_range() {
    for (input, expected) in [
        (541.0, -179.0),
        (270.0, -90.0),
        (0.0, 0.0),
        (180.0, 180.0),
        (-180.0, 180.0),
        (180.5, 180.5),
    ] {
        let mut project = Project::new();
        let id = project.add_sprite(Sprite::new("s"));
        project.get_mut(id).as_sprite_mut().unwrap().core.scripts.push(script(vec![
            hat(Command::WhenGreenFlag, vec![]),
            block(Command::PointInDirection, vec![num(input)]),
        ]));

        let mut interp = Interpreter::new(project, Box::new(NullScreen));
        interp.start();
        interp.tick(&[]);

        assert_eq!(interp.project.get(id).direction(), expected, "normalizing {input}");
    }
}

#[test]
fn round_trip_set_x_and_y_then_read_position() {
    let mut project = Project::new();
    let id = project.add_sprite(Sprite::new("s"));
    project.get_mut(id).as_sprite_mut().unwrap().core.scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        block(Command::SetXTo, vec![num(42.0)]),
        block(Command::SetYTo, vec![num(-17.0)]),
    ]));

    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();
    interp.tick(&[]);

    assert_eq!(interp.project.get(id).position(), (42.0, -17.0));
}

#[test]
fn round_trip_set_size_then_read_size() {
    let mut project = Project::new();
    let id = project.add_sprite(Sprite::new("s"));
    project.get_mut(id).as_sprite_mut().unwrap().core.scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        block(Command::SetSizeTo, vec![num(150.0)]),
    ]));

    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();
    interp.tick(&[]);

    assert_eq!(interp.project.get(id).core().size, 150.0);
}

#[test]
fn switch_costume_to_number_is_one_based() {
    let mut project = Project::new();
    let id = project.add_sprite(Sprite::new("s"));
    {
        let sprite = project.get_mut(id).as_sprite_mut().unwrap();
        sprite.core.costumes.push(block_model::Costume {
            name: "a".into(),
            rotation_center: (0.0, 0.0),
            size: (10.0, 10.0),
        });
        sprite.core.costumes.push(block_model::Costume {
            name: "b".into(),
            rotation_center: (0.0, 0.0),
            size: (10.0, 10.0),
        });
        sprite.core.scripts.push(script(vec![
            hat(Command::WhenGreenFlag, vec![]),
            block(Command::SwitchCostumeTo, vec![text("1")]),
        ]));
    }

    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();
    interp.tick(&[]);

    assert_eq!(interp.project.get(id).core().costume_index, 0, "costume \"1\" is the first (index 0) costume");
}

#[test]
fn seeded_rng_makes_pick_random_reproducible() {
    use block_interpreter::InterpreterConfig;

    fn run_with_seed(seed: u64) -> f64 {
        let mut project = Project::new();
        project.set_global("n", Value::Number(0.0));
        project.stage_mut().core_mut().scripts.push(script(vec![
            hat(Command::WhenGreenFlag, vec![]),
            block(
                Command::SetVarTo,
                vec![text("n"), expr(block(Command::PickRandom, vec![num(1.0), num(1_000_000.0)]))],
            ),
        ]));
        let config = InterpreterConfig { rng_seed: Some(seed), ..InterpreterConfig::default() };
        let mut interp = Interpreter::with_config(project, Box::new(NullScreen), Box::new(block_interpreter::SystemClock::new()), &config);
        interp.start();
        interp.tick(&[]);
        interp.project.global_variables().get("n").unwrap().value.as_number().unwrap()
    }

    assert_eq!(run_with_seed(42), run_with_seed(42), "same seed must pick the same value");
}

#[test]
fn broadcast_and_wait_with_no_receivers_completes_same_frame() {
    let mut project = Project::new();
    project.stage_mut().core_mut().scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        block(Command::BroadcastAndWait, vec![text("nobody-listens")]),
        block(Command::Say, vec![text("done")]),
    ]));

    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();
    let events = interp.tick(&[]);

    assert_eq!(any_say(&events), vec!["done"], "no receivers means no wait");
    assert_eq!(interp.thread_count(), 0);
}

#[test]
fn stop_other_scripts_in_sprite_leaves_the_caller_running() {
    let mut project = Project::new();
    let mut sprite = Sprite::new("s");
    sprite
        .core
        .scripts
        .push(script(vec![hat(Command::WhenGreenFlag, vec![]), block(Command::Forever, vec![body(vec![])])]));
    sprite.core.scripts.push(script(vec![
        hat(Command::WhenGreenFlag, vec![]),
        block(Command::StopScript, vec![text("other scripts in sprite")]),
        block(Command::Forever, vec![body(vec![])]),
    ]));
    project.add_sprite(sprite);

    let mut interp = Interpreter::new(project, Box::new(NullScreen));
    interp.start();
    assert_eq!(interp.thread_count(), 2);
    interp.tick(&[]);
    assert_eq!(interp.thread_count(), 1, "the sibling forever-script is cancelled, the caller keeps running");
}
