use super::common::load_cases;
use fieldrule::MessageTemplate;
use serde_json::Value;

#[derive(Debug, serde::Deserialize)]
struct TemplateCase {
    id: String,
    name: String,
    template: String,
    args: Vec<Value>,
    expected: String,
}

#[test]
fn template_suite() {
    let cases: Vec<TemplateCase> = load_cases("templates.yaml");
    assert!(!cases.is_empty());

    for case in &cases {
        let rendered = MessageTemplate::new(case.template.as_str()).render(&case.args);
        assert_eq!(rendered, case.expected, "[{}] {}", case.id, case.name);
    }
}
