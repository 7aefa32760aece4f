//! Explicit association between object types and their validators.
//!
//! Replaces attaching a validator to a type by convention: callers register
//! a validator for a Rust type (or for a schema name when objects arrive as
//! untyped JSON) and look it up here.

use crate::error::SerializeError;
use crate::types::ValidationResult;
use crate::validator::Validator;
use serde::Serialize;
use serde_json::Value;
use std::any::{TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

/// Schema identifier → validator.
///
/// Many objects share one validator; the registry only holds `Arc`s.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    typed: HashMap<TypeId, (&'static str, Arc<Validator>)>,
    named: HashMap<String, Arc<Validator>>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Associates `validator` with `T`, returning the previous association.
    pub fn apply_to<T: 'static>(&mut self, validator: Arc<Validator>) -> Option<Arc<Validator>> {
        self.typed
            .insert(TypeId::of::<T>(), (type_name::<T>(), validator))
            .map(|(_, previous)| previous)
    }

    /// Associates `validator` with a schema name, returning the previous
    /// association.
    pub fn apply_to_named(
        &mut self,
        name: impl Into<String>,
        validator: Arc<Validator>,
    ) -> Option<Arc<Validator>> {
        self.named.insert(name.into(), validator)
    }

    pub fn validator_for<T: 'static>(&self) -> Option<&Arc<Validator>> {
        self.typed.get(&TypeId::of::<T>()).map(|(_, v)| v)
    }

    pub fn validator_named(&self, name: &str) -> Option<&Arc<Validator>> {
        self.named.get(name)
    }

    /// Validates a typed object with its registered validator.
    ///
    /// Returns `None` when no validator is registered for `T`.
    pub fn validate<T: Serialize + 'static>(
        &self,
        object: &T,
    ) -> Option<Result<ValidationResult, SerializeError>> {
        let validator = self.validator_for::<T>()?;
        Some(validator.validate_serialize(object))
    }

    /// Validates a JSON object with the validator registered under `name`.
    ///
    /// Returns `None` when no validator is registered under `name`.
    pub fn validate_named(&self, name: &str, object: &Value) -> Option<ValidationResult> {
        Some(self.validator_named(name)?.validate(object))
    }

    /// Registered type names, for diagnostics.
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.typed.values().map(|(name, _)| *name)
    }
}
