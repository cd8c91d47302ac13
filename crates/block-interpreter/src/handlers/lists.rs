//! List block handlers: add, delete, insert, replace, query.

use block_model::{Block, ListRef, ScriptableId, Value};
use rand::Rng;

use crate::error::{InterpError, Result};
use crate::evaluator::arg_value;
use crate::exec::{Exec, Once};
use crate::scheduler::Interpreter;

fn list_ref(value: Value, command: block_model::Command) -> Result<ListRef> {
    match value {
        Value::List(r) => Ok(r),
        other => Err(InterpError::ArgumentTypeError { command, found: other.type_name().to_string() }),
    }
}

/// Resolve a `delete`/`insert at`/`replace item`/`item of` index token
/// against a list's current length, matching the source's `'last'`/
/// `'any'`/1-based-number handling. Returns `None` for `'all'`, which
/// only `delete of` treats specially.
fn resolve_index(interp: &mut Interpreter, token: &str, len: usize) -> Option<usize> {
    match token {
        "last" => if len == 0 { None } else { Some(len) },
        "any" => if len == 0 { None } else { Some(interp.rng.random_range(1..=len)) },
        other => other.trim().parse::<f64>().ok().map(|n| n.round() as usize),
    }
}

pub fn eval_list(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let r = list_ref(arg_value(interp, scriptable, block, 0)?, block.block_type.command)?;
    let joined = interp
        .list(&r)
        .map(|l| l.items.iter().map(Value::to_display_string).collect::<Vec<_>>().join(" "))
        .unwrap_or_default();
    Ok(Value::Text(joined))
}

pub fn compile_add_to_list(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let item = arg_value(interp, scriptable, block, 0)?;
    let r = list_ref(arg_value(interp, scriptable, block, 1)?, block.block_type.command)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(list) = interp.list_mut(&r) {
            list.items.push(item.clone());
        }
        Ok(None)
    })))
}

pub fn compile_delete_of_list(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let index = arg_value(interp, scriptable, block, 0)?.to_display_string();
    let r = list_ref(arg_value(interp, scriptable, block, 1)?, block.block_type.command)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if index == "all" {
            if let Some(list) = interp.list_mut(&r) {
                list.items.clear();
            }
        } else {
            let len = interp.list(&r).map(|l| l.items.len()).unwrap_or(0);
            if let Some(i) = resolve_index(interp, &index, len) {
                if let Some(list) = interp.list_mut(&r) {
                    if i >= 1 && i <= list.items.len() {
                        list.items.remove(i - 1);
                    }
                }
            }
        }
        Ok(None)
    })))
}

pub fn compile_insert_at_of_list(
    interp: &mut Interpreter,
    scriptable: ScriptableId,
    block: &Block,
) -> Result<Box<dyn Exec>> {
    let item = arg_value(interp, scriptable, block, 0)?;
    let index = arg_value(interp, scriptable, block, 1)?.to_display_string();
    let r = list_ref(arg_value(interp, scriptable, block, 2)?, block.block_type.command)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if index == "last" {
            if let Some(list) = interp.list_mut(&r) {
                list.items.push(item.clone());
            }
        } else {
            let len = interp.list(&r).map(|l| l.items.len()).unwrap_or(0);
            if let Some(i) = resolve_index(interp, &index, len) {
                if let Some(list) = interp.list_mut(&r) {
                    let at = i.saturating_sub(1).min(list.items.len());
                    list.items.insert(at, item.clone());
                }
            }
        }
        Ok(None)
    })))
}

pub fn compile_replace_item_of_with(
    interp: &mut Interpreter,
    scriptable: ScriptableId,
    block: &Block,
) -> Result<Box<dyn Exec>> {
    let index = arg_value(interp, scriptable, block, 0)?.to_display_string();
    let r = list_ref(arg_value(interp, scriptable, block, 1)?, block.block_type.command)?;
    let item = arg_value(interp, scriptable, block, 2)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        let len = interp.list(&r).map(|l| l.items.len()).unwrap_or(0);
        if let Some(i) = resolve_index(interp, &index, len) {
            if let Some(list) = interp.list_mut(&r) {
                if i >= 1 && i <= list.items.len() {
                    list.items[i - 1] = item.clone();
                }
            }
        }
        Ok(None)
    })))
}

pub fn eval_item_of_list(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let index = arg_value(interp, scriptable, block, 0)?.to_display_string();
    let r = list_ref(arg_value(interp, scriptable, block, 1)?, block.block_type.command)?;
    let len = interp.list(&r).map(|l| l.items.len()).unwrap_or(0);
    let result = match resolve_index(interp, &index, len) {
        Some(i) if i >= 1 && i <= len => interp.list(&r).unwrap().items[i - 1].clone(),
        _ => Value::Text(String::new()),
    };
    Ok(result)
}

pub fn eval_line_count_of_list(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let r = list_ref(arg_value(interp, scriptable, block, 0)?, block.block_type.command)?;
    Ok(Value::Number(interp.list(&r).map(|l| l.items.len()).unwrap_or(0) as f64))
}

pub fn eval_list_contains(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let r = list_ref(arg_value(interp, scriptable, block, 0)?, block.block_type.command)?;
    let item = arg_value(interp, scriptable, block, 1)?;
    let found = interp
        .list(&r)
        .map(|l| l.items.iter().any(|v| v.to_display_string() == item.to_display_string()))
        .unwrap_or(false);
    Ok(Value::Bool(found))
}
