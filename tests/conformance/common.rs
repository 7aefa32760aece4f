use fieldrule::catalog;
use fieldrule::{CompareValue, RuleComponent};
use serde_json::Value;
use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    std::env::var("FIELDRULE_FIXTURES_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

pub fn load_cases<T: serde::de::DeserializeOwned>(file: &str) -> Vec<T> {
    let path = fixtures_dir().join(file);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {:?}: {}", path, e));
    serde_saphyr::from_str(&content).unwrap_or_else(|e| panic!("cannot parse {:?}: {}", path, e))
}

/// Declarative description of one catalog component.
#[derive(Debug, serde::Deserialize)]
pub struct ComponentSpec {
    pub kind: String,
    #[serde(default)]
    pub arg: Value,
    #[serde(default)]
    pub per_item: bool,
    pub message: Option<String>,
}

impl ComponentSpec {
    pub fn build(&self) -> RuleComponent {
        let bound = || self.arg.as_u64().unwrap_or_default() as usize;
        let text = || self.arg.as_str().unwrap_or_default().to_string();
        let mut component = match self.kind.as_str() {
            "not_empty" => catalog::not_empty(),
            "min_length" => catalog::min_length(bound()),
            "max_length" => catalog::max_length(bound()),
            "min" => catalog::min(self.arg.clone()),
            "max" => catalog::max(self.arg.clone()),
            "matches" => catalog::matches(self.arg.clone()),
            "matches_field" => catalog::matches(CompareValue::field(text())),
            "email" => catalog::email(),
            "pattern" => catalog::pattern_str("pattern", &text()).expect("valid pattern"),
            other => panic!("unknown component kind '{}'", other),
        };
        if self.per_item {
            component.validate_collection();
        }
        if let Some(message) = &self.message {
            component.with_message(message.as_str());
        }
        component
    }
}
