use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Key holding the aggregated flag at every level of the JSON result.
/// Fields and components may not use it as their name.
pub const RESERVED_KEY: &str = "error";

// ─── Field input ─────────────────────────────────────────────────────────────

/// A field value tagged as scalar or sequence.
///
/// Resolved once per field before any component runs, so components choose
/// their collection behavior from their declared mode rather than from the
/// value's shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldValue<'a> {
    Scalar(&'a Value),
    Sequence {
        raw: &'a Value,
        items: &'a [Value],
    },
}

impl<'a> FieldValue<'a> {
    pub fn of(value: &'a Value) -> Self {
        match value {
            Value::Array(items) => FieldValue::Sequence { raw: value, items },
            other => FieldValue::Scalar(other),
        }
    }

    /// The untagged value.
    pub fn raw(&self) -> &'a Value {
        match self {
            FieldValue::Scalar(v) => v,
            FieldValue::Sequence { raw, .. } => raw,
        }
    }
}

// ─── Component outcomes ──────────────────────────────────────────────────────

/// Pass/fail for one evaluation of a component.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub error: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Check {
    pub fn pass() -> Self {
        Check::default()
    }

    pub fn fail(message: Option<String>) -> Self {
        Check {
            error: true,
            message,
        }
    }
}

/// Per-element checks for a component in per-item mode.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOutcomes {
    /// True if any element failed.
    pub error: bool,
    pub items: Vec<Check>,
}

impl ItemOutcomes {
    pub fn push(&mut self, check: Check) {
        self.error |= check.error;
        self.items.push(check);
    }

    pub fn get(&self, index: usize) -> Option<&Check> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What one component produced for one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    PerItem(ItemOutcomes),
    Single(Check),
}

impl Outcome {
    pub fn pass() -> Self {
        Outcome::Single(Check::pass())
    }

    pub fn error(&self) -> bool {
        match self {
            Outcome::Single(check) => check.error,
            Outcome::PerItem(items) => items.error,
        }
    }

    /// Failure message of a scalar outcome.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Single(check) => check.message.as_deref(),
            Outcome::PerItem(_) => None,
        }
    }

    pub fn as_single(&self) -> Option<&Check> {
        match self {
            Outcome::Single(check) => Some(check),
            Outcome::PerItem(_) => None,
        }
    }

    pub fn as_items(&self) -> Option<&ItemOutcomes> {
        match self {
            Outcome::PerItem(items) => Some(items),
            Outcome::Single(_) => None,
        }
    }
}

// ─── Rule and field results ──────────────────────────────────────────────────

/// Component outcomes of one rule, keyed by component name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleResult {
    /// OR over every evaluated component, including ones whose name was
    /// later overwritten by a duplicate.
    pub error: bool,
    pub components: IndexMap<String, Outcome>,
}

impl RuleResult {
    /// Records an outcome. A repeated name replaces the earlier outcome in
    /// place.
    pub fn insert(&mut self, name: &str, outcome: Outcome) {
        self.error |= outcome.error();
        self.components.insert(name.to_string(), outcome);
    }

    pub fn component(&self, name: &str) -> Option<&Outcome> {
        self.components.get(name)
    }
}

/// Everything validated under one field: its own rule's component outcomes
/// and, for nested fields, the child object's result.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldResult {
    pub error: bool,
    pub components: IndexMap<String, Outcome>,
    pub nested: Option<ValidationResult>,
}

impl FieldResult {
    pub fn component(&self, name: &str) -> Option<&Outcome> {
        self.components.get(name)
    }

    /// A field of the nested child result.
    pub fn child(&self, field: &str) -> Option<&FieldResult> {
        self.nested.as_ref()?.field(field)
    }
}

impl Serialize for FieldResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(RESERVED_KEY, &self.error)?;
        for (name, outcome) in &self.components {
            if name != RESERVED_KEY {
                map.serialize_entry(name, outcome)?;
            }
        }
        if let Some(nested) = &self.nested {
            for (name, field) in &nested.fields {
                if name != RESERVED_KEY {
                    map.serialize_entry(name, field)?;
                }
            }
        }
        map.end()
    }
}

// ─── ValidationResult ────────────────────────────────────────────────────────

/// The result tree of one `validate` call.
///
/// `error` is the OR of every field beneath it. Created fresh per call and
/// owned by the caller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub error: bool,
    pub fields: IndexMap<String, FieldResult>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        !self.error
    }

    pub fn field(&self, name: &str) -> Option<&FieldResult> {
        self.fields.get(name)
    }

    /// Shortcut for `field(field)?.component(name)`.
    pub fn component(&self, field: &str, name: &str) -> Option<&Outcome> {
        self.field(field)?.component(name)
    }

    pub fn add_rule_result(&mut self, field: &str, result: RuleResult) {
        let entry = self.fields.entry(field.to_string()).or_default();
        entry.error |= result.error;
        entry.components = result.components;
        self.error |= result.error;
    }

    pub fn add_nested_result(&mut self, field: &str, result: ValidationResult) {
        let entry = self.fields.entry(field.to_string()).or_default();
        entry.error |= result.error;
        self.error |= result.error;
        entry.nested = Some(result);
    }

    /// The JSON shape of the tree: `error` at every level, component
    /// outcomes as `{error, message?}`, per-item outcomes as
    /// `{error, items}`, nested entries flattened into their field.
    /// Entries named [`RESERVED_KEY`] are left out so the flag is never
    /// overwritten; [`Validator::check_schema`](crate::Validator::check_schema)
    /// rejects such names up front.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(RESERVED_KEY, &self.error)?;
        for (name, field) in &self.fields {
            if name != RESERVED_KEY {
                map.serialize_entry(name, field)?;
            }
        }
        map.end()
    }
}
