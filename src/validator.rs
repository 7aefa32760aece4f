//! Validators: a schema of per-field rules plus nested-object delegation.

use crate::error::{SchemaError, SchemaErrorKind, SerializeError};
use crate::primitives::{NULL, is_nullish, resolve_field};
use crate::registry::Registry;
use crate::rule::Rule;
use crate::types::{RESERVED_KEY, ValidationResult};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

/// A validation schema.
///
/// Built once, then used for any number of `validate` calls. A validator
/// shared through an `Arc` is immutable, so concurrent validations are safe
/// as long as predicates, guards and providers are pure.
///
/// ```rust
/// use fieldrule::{RuleBuilder, Validator};
/// use serde_json::json;
///
/// let validator = Validator::new(|c| {
///     c.rule_for("username", |f| {
///         f.not_empty().with_message("username is required");
///     });
/// });
///
/// let result = validator.validate(&json!({"username": null}));
/// assert_eq!(
///     result.component("username", "notEmpty").and_then(|o| o.message()),
///     Some("username is required")
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Validator {
    rules: IndexMap<String, Rule>,
    nested: IndexMap<String, Arc<Validator>>,
}

impl Validator {
    pub fn new<F>(configure: F) -> Self
    where
        F: FnOnce(&mut Validator),
    {
        let mut validator = Validator::default();
        configure(&mut validator);
        validator
    }

    /// Like [`Validator::new`] for configurations that can fail, such as
    /// nested registration or pattern compilation. The finished schema is
    /// checked with [`Validator::check_schema`].
    ///
    /// # Errors
    ///
    /// Returns the first `SchemaError` raised by `configure` or by the
    /// schema check.
    pub fn try_new<F>(configure: F) -> Result<Self, SchemaError>
    where
        F: FnOnce(&mut Validator) -> Result<(), SchemaError>,
    {
        let mut validator = Validator::default();
        configure(&mut validator)?;
        validator.check_schema()?;
        Ok(validator)
    }

    /// Gets or creates the rule for `field` and lets `configure` attach
    /// components to it. Calling this twice for one field extends the same
    /// rule.
    pub fn rule_for<F>(&mut self, field: impl Into<String>, configure: F) -> &mut Rule
    where
        F: FnOnce(&mut Rule),
    {
        let rule = self.rules.entry(field.into()).or_default();
        configure(rule);
        rule
    }

    /// Delegates `field` to a child validator. The child's result is merged
    /// into the field's entry next to the field's own component outcomes.
    /// Fields whose value is not an object are skipped.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError { kind: NestedCollision }` if a component name
    /// of the field's own rule equals a field name of the child, and
    /// `ReservedName` if `field` or a field of the child is named `error`.
    pub fn register_nested(
        &mut self,
        field: impl Into<String>,
        validator: Arc<Validator>,
    ) -> Result<&mut Self, SchemaError> {
        let field = field.into();
        check_reserved(&field, &field)?;
        validator.check_schema().map_err(|e| e.under(&field))?;
        if let Some(rule) = self.rules.get(&field) {
            check_collision(&field, rule, &validator)?;
        }
        self.nested.insert(field, validator);
        Ok(self)
    }

    /// Checks the whole schema, including rules added after a nested
    /// registration and every child validator.
    ///
    /// # Errors
    ///
    /// Returns `ReservedName` for a field or component named `error`, which
    /// would overwrite the flag of the same name in the JSON result, and
    /// `NestedCollision` for a component named like a field of the child
    /// validator on the same field.
    pub fn check_schema(&self) -> Result<(), SchemaError> {
        for (field, rule) in &self.rules {
            check_reserved(field, field)?;
            for component in rule.components() {
                check_reserved(field, component.name())?;
            }
        }
        for (field, child) in &self.nested {
            check_reserved(field, field)?;
            child.check_schema().map_err(|e| e.under(field))?;
            if let Some(rule) = self.rules.get(field) {
                check_collision(field, rule, child)?;
            }
        }
        Ok(())
    }

    pub fn rule(&self, field: &str) -> Option<&Rule> {
        self.rules.get(field)
    }

    pub fn nested(&self, field: &str) -> Option<&Arc<Validator>> {
        self.nested.get(field)
    }

    /// Fields with a rule, in registration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Fields delegated to a child validator, in registration order.
    pub fn nested_fields(&self) -> impl Iterator<Item = &str> {
        self.nested.keys().map(String::as_str)
    }

    /// Registers this validator for `T` in `registry` and hands it back.
    pub fn apply_to<T: 'static>(self: Arc<Self>, registry: &mut Registry) -> Arc<Self> {
        registry.apply_to::<T>(Arc::clone(&self));
        self
    }

    /// Validates an object.
    ///
    /// Never fails: missing and malformed values are reported in the result.
    /// Nested validators recurse without cycle detection.
    pub fn validate(&self, object: &Value) -> ValidationResult {
        let mut result = ValidationResult::default();

        for (field, rule) in &self.rules {
            let value = resolve_field(field, object).unwrap_or(&NULL);
            result.add_rule_result(field, rule.validate(object, value));
        }

        for (field, child) in &self.nested {
            match resolve_field(field, object) {
                Some(value @ Value::Object(_)) => {
                    result.add_nested_result(field, child.validate(value));
                }
                value if is_nullish(value) => {
                    tracing::debug!(field = field.as_str(), "nested field is null; skipped")
                }
                _ => tracing::debug!(field = field.as_str(), "nested field is not an object; skipped"),
            }
        }

        tracing::debug!(
            fields = result.fields.len(),
            error = result.error,
            "validation complete"
        );
        result
    }

    /// Serializes `object` to a JSON value and validates it.
    ///
    /// # Errors
    ///
    /// Returns `SerializeError` if `object` cannot be represented as JSON.
    pub fn validate_serialize<T: Serialize + ?Sized>(
        &self,
        object: &T,
    ) -> Result<ValidationResult, SerializeError> {
        let value = serde_json::to_value(object)?;
        Ok(self.validate(&value))
    }
}

fn check_reserved(field: &str, name: &str) -> Result<(), SchemaError> {
    if name != RESERVED_KEY {
        return Ok(());
    }
    Err(SchemaError::new(
        SchemaErrorKind::ReservedName,
        format!("'{}' is reserved for the result flag", name),
    )
    .at(field))
}

fn check_collision(field: &str, rule: &Rule, child: &Validator) -> Result<(), SchemaError> {
    let collision = rule.components().iter().map(|c| c.name()).find(|name| {
        child.rules.contains_key(*name) || child.nested.contains_key(*name)
    });
    match collision {
        Some(name) => Err(SchemaError::new(
            SchemaErrorKind::NestedCollision,
            format!(
                "component '{}' collides with a field of the nested validator",
                name
            ),
        )
        .at(field)),
        None => Ok(()),
    }
}
