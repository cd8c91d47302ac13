//! The expression evaluator, insert-driven coercion and
//! rebinding. Command (stack/c-shape) compilation lives in
//! `dispatch::compile_command`; this module is the synchronous,
//! reporter/boolean half plus the shared coercion helper both halves
//! use when resolving an argument against its `Insert`.

use block_model::{Arg, Block, BlockShape, Insert, InsertKind, InsertShape, Scope, Value};
use block_model::{ListRef, ScriptableId, SoundRef, VarRef};

use crate::error::Result;
use crate::exec::Exec;
use crate::scheduler::Interpreter;

/// Evaluate a reporter/boolean expression block to a scalar `Value`.
/// Hats never evaluate as expressions — the empty value, matching
/// `evaluate()`'s `return []` for `shape == "hat"`.
pub fn eval_value(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    if block.block_type.shape() == BlockShape::Hat {
        return Ok(Value::Empty);
    }
    crate::dispatch::eval_reporter(interp, scriptable, block)
}

/// Evaluate one argument slot against its `Insert` descriptor: literal
/// values and nested expression blocks are both coerced/rebound the
/// same way: only `unevaluated` (C-shape body) slots skip coercion
/// entirely, returning the body untouched to the caller.
pub fn eval_arg(
    interp: &mut Interpreter,
    scriptable: ScriptableId,
    arg: &Arg,
    insert: &Insert,
) -> Result<Value> {
    if insert.unevaluated {
        return Ok(Value::Empty);
    }
    let raw = match arg {
        Arg::Value(v) => v.clone(),
        Arg::Expr(block) => eval_value(interp, scriptable, block)?,
        Arg::Body(_) => Value::Empty,
    };
    Ok(coerce_for_insert(interp, scriptable, raw, insert))
}

/// Evaluate every argument of `block` in lockstep with its BlockType's
/// inserts (left to right).
pub fn eval_args(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Vec<Value>> {
    block
        .args
        .iter()
        .zip(block.block_type.inserts.iter())
        .map(|(arg, insert)| eval_arg(interp, scriptable, arg, insert))
        .collect()
}

/// The unevaluated body of a C-shape argument slot (`Arg::Body`), or
/// an empty body if none was supplied — mirrors `body = body or []`
/// in the source's `if`/`if-else`/`forever` handlers.
pub fn arg_body(arg: &Arg) -> &[Block] {
    match arg {
        Arg::Body(blocks) => blocks,
        _ => &[],
    }
}

/// Numeric-string coercion, then string/menu coercion, then
/// kind-specific name rebinding. Idempotent — re-applying the same
/// insert to an already-rebound value (a Sprite/Var/List/Sound handle,
/// or a Number) is a no-op since none of the match arms touch a value
/// that isn't textual.
pub fn coerce_for_insert(
    interp: &mut Interpreter,
    scriptable: ScriptableId,
    mut value: Value,
    insert: &Insert,
) -> Value {
    if let Value::Text(ref s) = value {
        if let Ok(n) = s.trim().parse::<f64>() {
            value = Value::Number(n);
        }
    }

    if matches!(insert.shape, InsertShape::StringShape | InsertShape::ReadonlyMenu) {
        value = Value::Text(value.to_display_string());
    }

    match insert.kind {
        InsertKind::SpriteOrStage
        | InsertKind::SpriteOrMouse
        | InsertKind::StageOrThis
        | InsertKind::SpriteOnly
        | InsertKind::Touching => {
            if let Value::Text(name) = &value {
                value = match name.as_str() {
                    "mouse-pointer" => Value::MousePointer,
                    "edge" => Value::Edge,
                    "Stage" => Value::Stage,
                    other => match interp.project.get_sprite(other) {
                        Some(id) => Value::Sprite(id),
                        None => value,
                    },
                };
            }
        }
        InsertKind::Var => {
            if let Value::Text(name) = value {
                let scope = if interp.project.get(scriptable).core().variables.contains_key(&name) {
                    Scope::Local(scriptable)
                } else {
                    Scope::Global
                };
                value = Value::Var(VarRef { scope, name });
            }
        }
        InsertKind::ListKind => {
            if let Value::Text(name) = value {
                let scope = if interp.project.get(scriptable).core().lists.contains_key(&name) {
                    Scope::Local(scriptable)
                } else {
                    Scope::Global
                };
                value = Value::List(ListRef { scope, name });
            }
        }
        InsertKind::Sound => {
            if let Value::Text(name) = &value {
                let found = interp
                    .project
                    .get(scriptable)
                    .core()
                    .sounds
                    .iter()
                    .any(|sound| &sound.name == name);
                if found {
                    value = Value::Sound(SoundRef { scriptable, name: name.clone() });
                }
            }
        }
        _ => {}
    }

    value
}

/// Evaluate the `i`th argument of `block` against its matching insert.
pub fn arg_value(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block, i: usize) -> Result<Value> {
    eval_arg(interp, scriptable, &block.args[i], &block.block_type.inserts[i])
}

pub fn arg_number(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block, i: usize) -> Result<f64> {
    let value = arg_value(interp, scriptable, block, i)?;
    value.as_number().ok_or_else(|| crate::error::InterpError::ArgumentTypeError {
        command: block.block_type.command,
        found: value.type_name().to_string(),
    })
}

pub fn arg_text(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block, i: usize) -> Result<String> {
    Ok(arg_value(interp, scriptable, block, i)?.to_display_string())
}

pub fn arg_bool(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block, i: usize) -> Result<bool> {
    Ok(arg_value(interp, scriptable, block, i)?.truthy())
}

/// The raw, unevaluated block list of a C-shape body argument.
pub fn arg_body_at(block: &Block, i: usize) -> Vec<Block> {
    arg_body(&block.args[i]).to_vec()
}

/// Compile the runnable part of a script (everything after the hat, or
/// the whole thing when pushed without a hat) into one Exec. Each
/// block is only resolved against the live interpreter state once the
/// `Sequence` actually reaches it — see `exec::Sequence`.
pub fn compile_body(scriptable: ScriptableId, blocks: &[Block]) -> Box<dyn Exec> {
    Box::new(crate::exec::Sequence::new(scriptable, blocks.to_vec()))
}
