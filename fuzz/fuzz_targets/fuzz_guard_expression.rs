#![no_main]

use fieldrule::evaluate::{compile_guard, evaluate_guard};
use libfuzzer_sys::fuzz_target;
use serde_json::json;

fuzz_target!(|data: &[u8]| {
    let Ok(expression) = std::str::from_utf8(data) else {
        return;
    };
    if compile_guard(expression).is_err() {
        return;
    }
    let object = json!({"age": 30, "dob": null, "tags": ["a"], "name": "ann"});
    let _ = evaluate_guard(expression, &object);
});
