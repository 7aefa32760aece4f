use super::common::{ComponentSpec, load_cases};
use serde_json::{Map, Value};

#[derive(Debug, serde::Deserialize)]
struct ComponentCase {
    id: String,
    name: String,
    component: ComponentSpec,
    #[serde(default)]
    object: Option<Value>,
    value: Value,
    expected: Value,
}

#[test]
fn component_suite() {
    let cases: Vec<ComponentCase> = load_cases("components.yaml");
    assert!(!cases.is_empty());

    let mut failures = Vec::new();
    for case in &cases {
        let object = case
            .object
            .clone()
            .unwrap_or_else(|| Value::Object(Map::new()));
        let component = case.component.build();
        let outcome = component.run(&object, &case.value);
        let actual = serde_json::to_value(&outcome).expect("outcome serializes");

        if actual != case.expected {
            failures.push(format!(
                "[{}] {}: expected {}, got {}",
                case.id, case.name, case.expected, actual
            ));
        }
    }

    assert!(
        failures.is_empty(),
        "{} of {} component cases failed:\n{}",
        failures.len(),
        cases.len(),
        failures.join("\n")
    );
}
