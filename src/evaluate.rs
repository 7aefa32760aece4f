//! CEL guard evaluation (requires the `cel-eval` feature).
//!
//! A guard expression sees each top-level field of the validated object as
//! a variable. A variable the object does not carry is bound to `null`, so
//! `dob == null` holds whether `dob` is null or absent.

use crate::error::{SchemaError, SchemaErrorKind};
use serde_json::Value;
use std::collections::HashMap;

/// Compiles a guard expression to check its syntax.
///
/// # Errors
///
/// Returns `SchemaError { kind: InvalidExpression }` on a compile error.
pub fn compile_guard(expression: &str) -> Result<(), SchemaError> {
    cel::Program::compile(expression).map(|_| ()).map_err(|e| {
        SchemaError::new(
            SchemaErrorKind::InvalidExpression,
            format!("CEL compile error in '{}': {}", expression, e),
        )
    })
}

/// Evaluates a guard expression against an object.
///
/// Returns `true` only for a boolean `true` result. Runtime faults and
/// non-boolean results are logged and treated as a guard that does not hold.
pub fn evaluate_guard(expression: &str, object: &Value) -> bool {
    let program = match cel::Program::compile(expression) {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(expression, error = %e, "CEL guard failed to compile");
            return false;
        }
    };

    let mut cel_ctx = cel::Context::default();
    let fields = object.as_object();
    if let Some(map) = fields {
        for (key, value) in map {
            cel_ctx.add_variable_from_value(key.as_str(), json_to_cel(value));
        }
    }
    for name in program.references().variables() {
        if !fields.is_some_and(|map| map.contains_key(name)) {
            cel_ctx.add_variable_from_value(name, cel::Value::Null);
        }
    }

    match program.execute(&cel_ctx) {
        Ok(cel::Value::Bool(b)) => b,
        Ok(other) => {
            tracing::warn!(expression, result = ?other, "CEL guard returned a non-boolean");
            false
        }
        Err(cel::ExecutionError::NoSuchKey(_)) => false,
        Err(cel::ExecutionError::UndeclaredReference(_)) => false,
        Err(e) => {
            tracing::warn!(expression, error = %e, "CEL guard execution error");
            false
        }
    }
}

/// Convert serde_json::Value → cel::Value.
fn json_to_cel(value: &Value) -> cel::Value {
    use std::sync::Arc;

    match value {
        Value::Null => cel::Value::Null,
        Value::Bool(b) => cel::Value::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                cel::Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                cel::Value::UInt(u)
            } else if let Some(f) = n.as_f64() {
                cel::Value::Float(f)
            } else {
                cel::Value::Null
            }
        }
        Value::String(s) => cel::Value::String(Arc::new(s.clone())),
        Value::Array(arr) => {
            let items: Vec<cel::Value> = arr.iter().map(json_to_cel).collect();
            cel::Value::List(Arc::new(items))
        }
        Value::Object(map) => {
            let entries: HashMap<String, cel::Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), json_to_cel(v)))
                .collect();
            entries.into()
        }
    }
}
