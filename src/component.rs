//! Rule components: one named predicate bound to a field value.
//!
//! A component owns everything needed to test one aspect of a field: the
//! predicate, optional guards, the comparison value, the null policy, the
//! collection mode and the failure message.

use crate::enums::CollectionMode;
use crate::error::{SchemaError, SchemaErrorKind};
use crate::primitives::{NULL, parse_epoch_millis, resolve_field};
use crate::template::MessageTemplate;
use crate::types::{Check, FieldValue, ItemOutcomes, Outcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json_path::JsonPath;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// `(object, resolved field value, resolved compare value) -> valid`.
///
/// The compare value is `null` for components without one.
pub type Predicate = Arc<dyn Fn(&Value, &Value, &Value) -> bool + Send + Sync>;

/// `(object, static args) -> message args`.
pub type ArgProvider = Arc<dyn Fn(&Value, &[Value]) -> Vec<Value> + Send + Sync>;

type GuardFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;
type OperandFn = Arc<dyn Fn(&Value) -> Operand + Send + Sync>;

// ─── Compare values ──────────────────────────────────────────────────────────

/// A compare value produced at validation time.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Value(Value),
    /// Switches the component to date semantics: both sides compare as epoch
    /// milliseconds.
    Date(DateTime<Utc>),
}

impl Operand {
    /// The operand as a message argument. Dates render as RFC 3339.
    pub fn to_display_value(&self) -> Value {
        match self {
            Operand::Value(v) => v.clone(),
            Operand::Date(dt) => Value::String(dt.to_rfc3339()),
        }
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Operand::Value(value)
    }
}

impl From<DateTime<Utc>> for Operand {
    fn from(dt: DateTime<Utc>) -> Self {
        Operand::Date(dt)
    }
}

impl From<Option<DateTime<Utc>>> for Operand {
    fn from(dt: Option<DateTime<Utc>>) -> Self {
        dt.map_or(Operand::Value(Value::Null), Operand::Date)
    }
}

/// What a component compares the field value against.
///
/// Resolved lazily on every run, so it may depend on sibling fields or the
/// current time.
#[derive(Clone)]
pub enum CompareValue {
    Fixed(Value),
    Date(DateTime<Utc>),
    /// A sibling field, as a dot-path from the object root.
    Field(String),
    /// First node selected by a JSONPath query against the object.
    Query { source: String, path: Arc<JsonPath> },
    Provider(OperandFn),
}

impl CompareValue {
    pub fn field(path: impl Into<String>) -> Self {
        CompareValue::Field(path.into())
    }

    /// # Errors
    ///
    /// Returns `SchemaError { kind: InvalidQuery }` if `query` is not valid JSONPath.
    pub fn query(query: &str) -> Result<Self, SchemaError> {
        let path = JsonPath::parse(query).map_err(|e| {
            SchemaError::new(
                SchemaErrorKind::InvalidQuery,
                format!("invalid JSONPath '{}': {}", query, e),
            )
        })?;
        Ok(CompareValue::Query {
            source: query.to_string(),
            path: Arc::new(path),
        })
    }

    pub fn from_fn<F, O>(provider: F) -> Self
    where
        F: Fn(&Value) -> O + Send + Sync + 'static,
        O: Into<Operand>,
    {
        CompareValue::Provider(Arc::new(move |object| provider(object).into()))
    }

    pub fn operand(&self, object: &Value) -> Operand {
        match self {
            CompareValue::Fixed(v) => Operand::Value(v.clone()),
            CompareValue::Date(dt) => Operand::Date(*dt),
            CompareValue::Field(path) => {
                Operand::Value(resolve_field(path, object).cloned().unwrap_or(Value::Null))
            }
            CompareValue::Query { path, .. } => {
                Operand::Value(path.query(object).first().cloned().unwrap_or(Value::Null))
            }
            CompareValue::Provider(f) => f(object),
        }
    }
}

impl fmt::Debug for CompareValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareValue::Fixed(v) => f.debug_tuple("Fixed").field(v).finish(),
            CompareValue::Date(dt) => f.debug_tuple("Date").field(dt).finish(),
            CompareValue::Field(path) => f.debug_tuple("Field").field(path).finish(),
            CompareValue::Query { source, .. } => f.debug_tuple("Query").field(source).finish(),
            CompareValue::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

impl From<Value> for CompareValue {
    fn from(value: Value) -> Self {
        CompareValue::Fixed(value)
    }
}

impl From<DateTime<Utc>> for CompareValue {
    fn from(dt: DateTime<Utc>) -> Self {
        CompareValue::Date(dt)
    }
}

macro_rules! fixed_compare_from {
    ($($t:ty),*) => {
        $(impl From<$t> for CompareValue {
            fn from(v: $t) -> Self {
                CompareValue::Fixed(Value::from(v))
            }
        })*
    };
}

fixed_compare_from!(i32, i64, u32, u64, usize, f64, bool, &str, String);

/// A resolved compare value.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Comparand {
    pub value: Value,
    pub is_date: bool,
}

// ─── Guards ──────────────────────────────────────────────────────────────────

#[derive(Clone)]
enum Guard {
    Fn(GuardFn),
    #[cfg(feature = "cel-eval")]
    Expression(String),
}

impl Guard {
    fn holds(&self, object: &Value) -> bool {
        match self {
            Guard::Fn(f) => f(object),
            #[cfg(feature = "cel-eval")]
            Guard::Expression(expr) => crate::evaluate::evaluate_guard(expr, object),
        }
    }
}

// ─── ComponentOptions ────────────────────────────────────────────────────────

/// Per-component evaluation policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentOptions {
    /// Pass without running the predicate when the field value or the
    /// compare value resolves to null.
    pub pass_on_null: bool,
    /// In aggregate mode, replace a sequence value with its length.
    pub convert_array_to_length: bool,
}

impl Default for ComponentOptions {
    fn default() -> Self {
        ComponentOptions {
            pass_on_null: true,
            convert_array_to_length: false,
        }
    }
}

// ─── RuleComponent ───────────────────────────────────────────────────────────

/// One named, independently testable check for a field.
#[derive(Clone)]
pub struct RuleComponent {
    name: String,
    predicate: Predicate,
    compare: Option<CompareValue>,
    options: ComponentOptions,
    mode: CollectionMode,
    guards: Vec<Guard>,
    template: Option<MessageTemplate>,
    static_args: Vec<Value>,
    arg_provider: Option<ArgProvider>,
}

impl RuleComponent {
    /// Creates a component with default options: `pass_on_null` on, no
    /// length substitution, aggregate mode, no guards, no message.
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value, &Value, &Value) -> bool + Send + Sync + 'static,
    {
        RuleComponent {
            name: name.into(),
            predicate: Arc::new(predicate),
            compare: None,
            options: ComponentOptions::default(),
            mode: CollectionMode::Aggregate,
            guards: Vec::new(),
            template: None,
            static_args: Vec::new(),
            arg_provider: None,
        }
    }

    pub fn compare_value(mut self, compare: impl Into<CompareValue>) -> Self {
        self.compare = Some(compare.into());
        self
    }

    pub fn with_options(mut self, options: ComponentOptions) -> Self {
        self.options = options;
        self
    }

    /// Values passed to the message argument provider after the object.
    pub fn static_args(mut self, args: Vec<Value>) -> Self {
        self.static_args = args;
        self
    }

    pub fn arg_provider<F>(mut self, provider: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        self.arg_provider = Some(Arc::new(provider));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> CollectionMode {
        self.mode
    }

    pub fn options(&self) -> ComponentOptions {
        self.options
    }

    pub fn compare(&self) -> Option<&CompareValue> {
        self.compare.as_ref()
    }

    pub fn template(&self) -> Option<&MessageTemplate> {
        self.template.as_ref()
    }

    // ─── Fluent configuration ────────────────────────────────────────────

    /// Adds a guard. All guards must hold for the component to run; if any
    /// fails the component passes without evaluating.
    ///
    /// Guards should be pure functions of the object.
    pub fn when<F>(&mut self, guard: F) -> &mut Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        self.guards.push(Guard::Fn(Arc::new(guard)));
        self
    }

    /// Adds a CEL guard. The object's top-level fields are the expression's
    /// variables, e.g. `dob == null`.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError { kind: InvalidExpression }` if the expression
    /// does not compile.
    #[cfg(feature = "cel-eval")]
    pub fn when_expr(&mut self, expression: &str) -> Result<&mut Self, SchemaError> {
        crate::evaluate::compile_guard(expression)?;
        self.guards.push(Guard::Expression(expression.to_string()));
        Ok(self)
    }

    /// Sets the failure message. Keeps any argument provider already set.
    pub fn with_message(&mut self, template: impl Into<MessageTemplate>) -> &mut Self {
        self.template = Some(template.into());
        self
    }

    /// Sets the failure message and the provider of its arguments.
    pub fn with_message_args<F>(
        &mut self,
        template: impl Into<MessageTemplate>,
        provider: F,
    ) -> &mut Self
    where
        F: Fn(&Value, &[Value]) -> Vec<Value> + Send + Sync + 'static,
    {
        self.template = Some(template.into());
        self.arg_provider = Some(Arc::new(provider));
        self
    }

    /// Runs the predicate once per element of a sequence value.
    pub fn validate_collection(&mut self) -> &mut Self {
        self.collection_mode(CollectionMode::PerItem)
    }

    pub fn collection_mode(&mut self, mode: CollectionMode) -> &mut Self {
        self.mode = mode;
        self
    }

    pub fn pass_on_null(&mut self, pass: bool) -> &mut Self {
        self.options.pass_on_null = pass;
        self
    }

    // ─── Evaluation ──────────────────────────────────────────────────────

    /// AND of all guards.
    pub fn can_run(&self, object: &Value) -> bool {
        self.guards.iter().all(|g| g.holds(object))
    }

    pub(crate) fn resolve_compare(&self, object: &Value) -> Option<Comparand> {
        let operand = self.compare.as_ref()?.operand(object);
        Some(match operand {
            Operand::Date(dt) => Comparand {
                value: Value::from(dt.timestamp_millis()),
                is_date: true,
            },
            Operand::Value(value) => Comparand {
                value,
                is_date: false,
            },
        })
    }

    pub(crate) fn resolve_value<'v>(&self, value: &'v Value, is_date: bool) -> Cow<'v, Value> {
        if self.mode == CollectionMode::Aggregate
            && self.options.convert_array_to_length
            && let Value::Array(items) = value
        {
            return Cow::Owned(Value::from(items.len()));
        }
        if is_date {
            return Cow::Owned(parse_epoch_millis(value));
        }
        Cow::Borrowed(value)
    }

    /// Tests one value, applying the null policy. Guards are not consulted.
    pub fn is_valid(&self, object: &Value, value: &Value) -> bool {
        let compare = self.resolve_compare(object);
        let (compare_value, is_date) = match &compare {
            // No compare value configured: never suppressed by the null policy.
            None => (&NULL, false),
            Some(c) => {
                if self.options.pass_on_null && c.value.is_null() {
                    return true;
                }
                (&c.value, c.is_date)
            }
        };

        let value = self.resolve_value(value, is_date);
        if self.options.pass_on_null && value.is_null() {
            return true;
        }

        (self.predicate)(object, &value, compare_value)
    }

    /// Renders the failure message, or `None` when no template is set.
    pub fn message_for(&self, object: &Value) -> Option<String> {
        let template = self.template.as_ref()?;
        match &self.arg_provider {
            Some(provider) if template.has_placeholder() => {
                Some(template.render(&provider(object, &self.static_args)))
            }
            _ => Some(template.source().to_string()),
        }
    }

    fn check(&self, object: &Value, value: &Value) -> Check {
        if self.is_valid(object, value) {
            Check::pass()
        } else {
            Check::fail(self.message_for(object))
        }
    }

    /// Evaluates the component against a field value.
    pub fn run(&self, object: &Value, value: &Value) -> Outcome {
        self.run_field(object, FieldValue::of(value))
    }

    pub(crate) fn run_field(&self, object: &Value, input: FieldValue<'_>) -> Outcome {
        if !self.can_run(object) {
            return Outcome::pass();
        }

        match (input, self.mode) {
            (FieldValue::Sequence { items, .. }, CollectionMode::PerItem) => {
                let mut outcomes = ItemOutcomes::default();
                for item in items {
                    outcomes.push(self.check(object, item));
                }
                Outcome::PerItem(outcomes)
            }
            (input, _) => Outcome::Single(self.check(object, input.raw())),
        }
    }
}

impl fmt::Debug for RuleComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleComponent")
            .field("name", &self.name)
            .field("compare", &self.compare)
            .field("options", &self.options)
            .field("mode", &self.mode)
            .field("guards", &self.guards.len())
            .field("template", &self.template.as_ref().map(|t| t.source()))
            .finish()
    }
}
