#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use fieldrule::MessageTemplate;
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);

    let source = match String::arbitrary(&mut u) {
        Ok(s) => s,
        Err(_) => return,
    };
    let args: Vec<Value> = match Vec::<String>::arbitrary(&mut u) {
        Ok(v) => v.into_iter().map(Value::String).collect(),
        Err(_) => return,
    };

    let template = MessageTemplate::new(source.clone());
    let rendered = template.render(&args);

    // Without arguments the output is the template minus its placeholders.
    if args.is_empty() {
        assert_eq!(rendered, source.replace("{|}", ""));
    }
});
