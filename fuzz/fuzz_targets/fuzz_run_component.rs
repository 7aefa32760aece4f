#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use fieldrule::{RuleComponent, catalog};
use libfuzzer_sys::fuzz_target;
use serde_json::{Value, json};

/// Generate a simple arbitrary JSON value from fuzzer bytes.
fn arbitrary_value(u: &mut Unstructured<'_>, depth: u8) -> arbitrary::Result<Value> {
    match u.int_in_range(0..=5)? {
        0 => Ok(Value::Null),
        1 => Ok(Value::Bool(bool::arbitrary(u)?)),
        2 => {
            let n = f64::arbitrary(u)?;
            Ok(serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null))
        }
        3 => Ok(Value::String(String::arbitrary(u)?)),
        4 if depth < 2 => {
            let len = u.int_in_range(0..=5)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(arbitrary_value(u, depth + 1)?);
            }
            Ok(Value::Array(items))
        }
        _ => Ok(Value::Null),
    }
}

fn arbitrary_component(u: &mut Unstructured<'_>) -> arbitrary::Result<RuleComponent> {
    let mut component = match u.int_in_range(0..=6)? {
        0 => catalog::not_empty(),
        1 => catalog::min_length(u.int_in_range(0..=16)?),
        2 => catalog::max_length(u.int_in_range(0..=16)?),
        3 => catalog::min(arbitrary_value(u, 2)?),
        4 => catalog::max(arbitrary_value(u, 2)?),
        5 => catalog::matches(arbitrary_value(u, 2)?),
        _ => catalog::email(),
    };
    component.with_message("bad {|}");
    if bool::arbitrary(u)? {
        component.validate_collection();
    }
    if bool::arbitrary(u)? {
        component.pass_on_null(false);
    }
    Ok(component)
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let component = match arbitrary_component(&mut u) {
        Ok(c) => c,
        Err(_) => return,
    };
    let value = match arbitrary_value(&mut u, 0) {
        Ok(v) => v,
        Err(_) => return,
    };

    let outcome = component.run(&json!({}), &value);
    if let Some(items) = outcome.as_items() {
        assert_eq!(items.error, items.items.iter().any(|c| c.error));
    }
    if !outcome.error() {
        assert!(outcome.message().is_none());
    }
});
