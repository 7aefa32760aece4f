//! Lookup surface for live, per-input checks.
//!
//! A UI layer binds one field of an object to its rule and asks, on every
//! input change, whether each component accepts the raw input. Nothing here
//! depends on a UI runtime.

use crate::error::{BindingError, BindingErrorKind};
use crate::registry::Registry;
use crate::rule::Rule;
use crate::validator::Validator;
use indexmap::IndexMap;
use serde_json::Value;
use std::any::type_name;
use std::sync::Arc;

/// One field of a schema, bound for incremental checks.
#[derive(Clone, Debug)]
pub struct FieldBinding {
    validator: Arc<Validator>,
    field: String,
}

impl FieldBinding {
    /// Binds `field` of the validator registered for `T`.
    ///
    /// # Errors
    ///
    /// `ValidatorMissing` if `T` has no validator, `RuleMissing` if the
    /// validator has no rule for `field`.
    pub fn for_type<T: 'static>(registry: &Registry, field: &str) -> Result<Self, BindingError> {
        let schema = type_name::<T>();
        let validator = registry
            .validator_for::<T>()
            .ok_or_else(|| validator_missing(schema))?;
        FieldBinding::bind(Arc::clone(validator), schema, field)
    }

    /// Binds `field` of the validator registered under `schema`.
    ///
    /// # Errors
    ///
    /// Same as [`FieldBinding::for_type`].
    pub fn for_named(registry: &Registry, schema: &str, field: &str) -> Result<Self, BindingError> {
        let validator = registry
            .validator_named(schema)
            .ok_or_else(|| validator_missing(schema))?;
        FieldBinding::bind(Arc::clone(validator), schema, field)
    }

    /// Binds `field` of a validator the caller already holds. `schema` only
    /// labels errors.
    ///
    /// # Errors
    ///
    /// `RuleMissing` if the validator has no rule for `field`.
    pub fn bind(validator: Arc<Validator>, schema: &str, field: &str) -> Result<Self, BindingError> {
        if validator.rule(field).is_none() {
            return Err(BindingError {
                kind: BindingErrorKind::RuleMissing,
                schema: schema.to_string(),
                field: Some(field.to_string()),
            });
        }
        Ok(FieldBinding {
            validator,
            field: field.to_string(),
        })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    fn rule(&self) -> Option<&Rule> {
        self.validator.rule(&self.field)
    }

    /// Component names, one check each, in rule order.
    pub fn checks(&self) -> Vec<&str> {
        self.rule()
            .map(|r| r.components().iter().map(|c| c.name()).collect())
            .unwrap_or_default()
    }

    /// Runs the named component on a raw input value. `true` means valid;
    /// `None` means the rule has no such component.
    pub fn check(&self, name: &str, object: &Value, input: &Value) -> Option<bool> {
        let component = self.rule()?.component(name)?;
        Some(!component.run(object, input).error())
    }

    /// Every check for one input value, keyed by component name.
    pub fn check_all(&self, object: &Value, input: &Value) -> IndexMap<String, bool> {
        self.rule()
            .map(|r| {
                r.components()
                    .iter()
                    .map(|c| (c.name().to_string(), !c.run(object, input).error()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn validator_missing(schema: &str) -> BindingError {
    BindingError {
        kind: BindingErrorKind::ValidatorMissing,
        schema: schema.to_string(),
        field: None,
    }
}
