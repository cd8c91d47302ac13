//! Mapping ScreenEvents (and the `broadcast`/`broadcast and wait`
//! handlers) to hat activations.

use block_model::{Command, Value};

use crate::evaluator::compile_body;
use crate::geometry::bounds;
use crate::scheduler::{Interpreter, ScriptId};

pub const GREEN_FLAG: Command = Command::WhenGreenFlag;
pub const KEY_PRESSED: Command = Command::WhenKeyPressed;
pub const CLICKED: Command = Command::WhenClicked;
pub const RECEIVE: Command = Command::WhenIReceive;

/// A hat's first literal argument, used for the key/message-name match
/// in `trigger_scriptable_hats` (`hat.args and hat.args[0] == arg`).
/// Hat args are always literal text in a well-formed project.
fn hat_arg_text(hat: &block_model::Block) -> Option<&str> {
    match hat.args.first()? {
        block_model::Arg::Value(Value::Text(s)) => Some(s.as_str()),
        _ => None,
    }
}

/// A factory producing one fresh completion callback per Thread
/// triggered, so `broadcast and wait` can decrement a shared
/// counter once for each receiver it spawned.
pub type CallbackFactory<'a> = &'a mut dyn FnMut() -> Box<dyn FnOnce()>;

/// Push a new Thread for every script on `scriptable` whose hat matches
/// `command` (and, if given, whose first arg equals `arg`).
pub fn trigger_scriptable_hats(
    interp: &mut Interpreter,
    scriptable: block_model::ScriptableId,
    command: Command,
    arg: Option<&str>,
    mut callback_factory: Option<CallbackFactory<'_>>,
) {
    let script_count = interp.project.get(scriptable).core().scripts.len();
    for index in 0..script_count {
        let matches = {
            let script = &interp.project.get(scriptable).core().scripts[index];
            let hat = match script.hat() {
                Some(h) => h,
                None => continue,
            };
            hat.block_type.command == command
                && match arg {
                    None => true,
                    Some(expected) => hat_arg_text(hat) == Some(expected),
                }
        };
        if !matches {
            continue;
        }
        let blocks = interp.project.get(scriptable).core().scripts[index].blocks.clone();
        let exec = compile_body(scriptable, &blocks);
        let id = ScriptId { scriptable, index };
        let callback = callback_factory.as_mut().map(|f| f());
        tracing::trace!(?scriptable, ?command, "hat triggered");
        interp.push_thread(id, exec, scriptable, callback);
    }
}

/// Trigger matching hats across every scriptable, stage first
/// (`Interpreter.trigger_hats`). `broadcast` is project-wide regardless
/// of which scriptable's script called it.
pub fn trigger_hats(
    interp: &mut Interpreter,
    command: Command,
    arg: Option<&str>,
    mut callback_factory: Option<CallbackFactory<'_>>,
) {
    let ids: Vec<_> = interp.project.iter_ids().collect();
    for id in ids {
        trigger_scriptable_hats(interp, id, command, arg, callback_factory.as_deref_mut());
    }
}

/// `mouse_down`: pick the topmost visible sprite under the
/// mouse that passes the screen's precise-touch test; drag it if
/// draggable, else fire `whenClicked` on it. Falls back to the Stage
/// when no sprite qualifies.
pub fn handle_mouse_down(interp: &mut Interpreter) {
    let mouse_pos = interp.screen.get_mouse_pos();
    let mut hit = None;
    for &id in interp.project.actor_order().iter().rev() {
        let rect = bounds(interp.project.get(id));
        if rect.collide_point(mouse_pos) && interp.screen.touching_mouse(id) {
            hit = Some(id);
            break;
        }
    }
    let scriptable = hit.unwrap_or(block_model::ScriptableId::STAGE);

    let is_draggable = interp.project.get(scriptable).core().is_draggable;
    if is_draggable {
        let (x, y) = interp.project.get(scriptable).position();
        interp.drag_offset = (x - mouse_pos.0, y - mouse_pos.1);
        interp.drag_sprite = Some(scriptable);
        interp.has_dragged = false;
        go_to_front(interp, scriptable);
    } else {
        trigger_scriptable_hats(interp, scriptable, CLICKED, None, None);
    }
}

/// `mouse_up`: fire `whenClicked` on the drag sprite if it was
/// never actually dragged, then end the drag regardless.
pub fn handle_mouse_up(interp: &mut Interpreter) {
    if let Some(sprite) = interp.drag_sprite.take() {
        if !interp.has_dragged {
            trigger_scriptable_hats(interp, sprite, CLICKED, None, None);
        }
    }
}

/// `go to front`: move a sprite to the end of the actor
/// order (drawn last, i.e. on top). A no-op for the Stage, which has
/// no position in the actor order.
pub fn go_to_front(interp: &mut Interpreter, scriptable: block_model::ScriptableId) {
    interp.project.move_actor_to_front(scriptable);
}
