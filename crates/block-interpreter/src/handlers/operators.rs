//! Arithmetic, comparison, logic, and string operator reporters.

use block_model::{Block, ScriptableId, Value};
use rand::Rng;

use crate::error::Result;
use crate::evaluator::{arg_number, arg_text, arg_value};
use crate::scheduler::Interpreter;

pub fn eval_add(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    Ok(Value::Number(arg_number(interp, scriptable, block, 0)? + arg_number(interp, scriptable, block, 1)?))
}

pub fn eval_sub(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    Ok(Value::Number(arg_number(interp, scriptable, block, 0)? - arg_number(interp, scriptable, block, 1)?))
}

pub fn eval_mul(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    Ok(Value::Number(arg_number(interp, scriptable, block, 0)? * arg_number(interp, scriptable, block, 1)?))
}

pub fn eval_div(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    Ok(Value::Number(arg_number(interp, scriptable, block, 0)? / arg_number(interp, scriptable, block, 1)?))
}

/// Scratch `mod` follows Python's floored-division modulo (sign of the
/// divisor), not Rust's `%` (sign of the dividend) — matches `op.mod`.
pub fn eval_mod(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let a = arg_number(interp, scriptable, block, 0)?;
    let b = arg_number(interp, scriptable, block, 1)?;
    let r = a % b;
    let result = if r != 0.0 && (r < 0.0) != (b < 0.0) { r + b } else { r };
    Ok(Value::Number(result))
}

pub fn eval_pick_random(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let low = arg_number(interp, scriptable, block, 0)?.round() as i64;
    let high = arg_number(interp, scriptable, block, 1)?.round() as i64;
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    let n = interp.rng.random_range(low..=high);
    Ok(Value::Number(n as f64))
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x == y,
        _ => a.to_display_string() == b.to_display_string(),
    }
}

pub fn eval_eq(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let a = arg_value(interp, scriptable, block, 0)?;
    let b = arg_value(interp, scriptable, block, 1)?;
    Ok(Value::Bool(values_equal(&a, &b)))
}

pub fn eval_lt(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let a = arg_value(interp, scriptable, block, 0)?;
    let b = arg_value(interp, scriptable, block, 1)?;
    let result = match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x < y,
        _ => a.to_display_string() < b.to_display_string(),
    };
    Ok(Value::Bool(result))
}

pub fn eval_gt(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let a = arg_value(interp, scriptable, block, 0)?;
    let b = arg_value(interp, scriptable, block, 1)?;
    let result = match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => x > y,
        _ => a.to_display_string() > b.to_display_string(),
    };
    Ok(Value::Bool(result))
}

pub fn eval_and(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let a = arg_value(interp, scriptable, block, 0)?.truthy();
    let b = arg_value(interp, scriptable, block, 1)?.truthy();
    Ok(Value::Bool(a && b))
}

pub fn eval_or(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let a = arg_value(interp, scriptable, block, 0)?.truthy();
    let b = arg_value(interp, scriptable, block, 1)?.truthy();
    Ok(Value::Bool(a || b))
}

pub fn eval_not(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    Ok(Value::Bool(!arg_value(interp, scriptable, block, 0)?.truthy()))
}

pub fn eval_join(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let a = arg_text(interp, scriptable, block, 0)?;
    let b = arg_text(interp, scriptable, block, 1)?;
    Ok(Value::Text(a + &b))
}

/// `letter of`: out-of-range indices report the empty string, matching
/// the source's `except IndexError: return ""` wrapper around every
/// `operator()`-registered function.
pub fn eval_letter_of(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let index = arg_number(interp, scriptable, block, 0)?;
    let text = arg_text(interp, scriptable, block, 1)?;
    let i = index as i64 - 1;
    let letter = if i >= 0 { text.chars().nth(i as usize) } else { None };
    Ok(Value::Text(letter.map(String::from).unwrap_or_default()))
}

pub fn eval_string_length(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    Ok(Value::Number(arg_text(interp, scriptable, block, 0)?.chars().count() as f64))
}

pub fn eval_round(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    Ok(Value::Number(arg_number(interp, scriptable, block, 0)?.round()))
}

pub fn eval_compute_function_of(interp: &mut Interpreter, scriptable: ScriptableId, block: &Block) -> Result<Value> {
    let name = arg_text(interp, scriptable, block, 0)?;
    let arg = arg_number(interp, scriptable, block, 1)?;
    let result = match name.as_str() {
        "abs" => arg.abs(),
        "sqrt" => arg.sqrt(),
        "sin" => arg.to_radians().sin(),
        "cos" => arg.to_radians().cos(),
        "tan" => arg.to_radians().tan(),
        "asin" => arg.asin().to_degrees(),
        "acos" => arg.acos().to_degrees(),
        "atan" => arg.atan().to_degrees(),
        "log" => arg.log10(),
        "ln" => arg.ln(),
        "e ^" => std::f64::consts::E.powf(arg),
        "10 ^" => 10f64.powf(arg),
        _ => f64::NAN,
    };
    Ok(Value::Number(result))
}
