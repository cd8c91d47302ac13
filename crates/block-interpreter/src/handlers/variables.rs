//! Variable block handlers: read, set, change, show/hide watcher.

use block_model::{Block, ScriptableId, Value, VarRef};

use crate::error::{InterpError, Result};
use crate::evaluator::arg_value;
use crate::exec::{Exec, Once};
use crate::scheduler::Interpreter;

fn var_ref(value: Value, command: block_model::Command) -> Result<VarRef> {
    match value {
        Value::Var(r) => Ok(r),
        other => Err(InterpError::ArgumentTypeError { command, found: other.type_name().to_string() }),
    }
}

pub fn eval_var(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let r = var_ref(arg_value(interp, scriptable, block, 0)?, block.block_type.command)?;
    Ok(interp.variable(&r).map(|v| v.value.clone()).unwrap_or_default())
}

pub fn compile_set_var_to(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let r = var_ref(arg_value(interp, scriptable, block, 0)?, block.block_type.command)?;
    let value = arg_value(interp, scriptable, block, 1)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(var) = interp.variable_mut(&r) {
            var.value = value.clone();
        }
        Ok(None)
    })))
}

/// `change by`: both operands are coerced through float first, the
/// same way the source's `float(variable.value) + float(delta)` does —
/// a non-numeric existing value resets to the delta alone.
pub fn compile_change_var_by(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let r = var_ref(arg_value(interp, scriptable, block, 0)?, block.block_type.command)?;
    let delta = crate::evaluator::arg_number(interp, scriptable, block, 1)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(var) = interp.variable_mut(&r) {
            let current = var.value.as_number().unwrap_or(0.0);
            var.value = Value::Number(current + delta);
        }
        Ok(None)
    })))
}

pub fn compile_show_variable(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let r = var_ref(arg_value(interp, scriptable, block, 0)?, block.block_type.command)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(var) = interp.variable_mut(&r) {
            var.watcher_is_visible = true;
        }
        Ok(None)
    })))
}

pub fn compile_hide_variable(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Box<dyn Exec>> {
    let r = var_ref(arg_value(interp, scriptable, block, 0)?, block.block_type.command)?;
    Ok(Box::new(Once::new(move |interp: &mut Interpreter| {
        if let Some(var) = interp.variable_mut(&r) {
            var.watcher_is_visible = false;
        }
        Ok(None)
    })))
}
