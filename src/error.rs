use serde::{Deserialize, Serialize};
use std::fmt;

/// Error kind for schema-definition failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaErrorKind {
    InvalidPattern,
    InvalidQuery,
    InvalidExpression,
    NestedCollision,
    ReservedName,
}

/// Produced while building a [`Validator`](crate::Validator) when a
/// component argument or a field registration cannot be accepted.
///
/// Never produced by `validate`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl SchemaError {
    pub(crate) fn new(kind: SchemaErrorKind, message: impl Into<String>) -> Self {
        SchemaError {
            kind,
            field: None,
            message: message.into(),
        }
    }

    pub(crate) fn at(mut self, field: &str) -> Self {
        self.field = Some(field.to_string());
        self
    }

    /// Prefixes the field path with the parent field of a nested validator.
    pub(crate) fn under(mut self, parent: &str) -> Self {
        self.field = Some(match self.field.take() {
            Some(field) => format!("{}.{}", parent, field),
            None => parent.to_string(),
        });
        self
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{}: {}", field, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for SchemaError {}

/// Error kind for field binding lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingErrorKind {
    ValidatorMissing,
    RuleMissing,
}

/// Produced by [`FieldBinding`](crate::binding::FieldBinding) when the
/// registry has no validator for a schema or the validator has no rule
/// for the requested field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingError {
    pub kind: BindingErrorKind,
    pub schema: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.kind, &self.field) {
            (BindingErrorKind::ValidatorMissing, _) => {
                write!(f, "no validator registered for {}", self.schema)
            }
            (BindingErrorKind::RuleMissing, Some(field)) => {
                write!(f, "validator for {} has no rule for {}", self.schema, field)
            }
            (BindingErrorKind::RuleMissing, None) => {
                write!(f, "validator for {} has no rule", self.schema)
            }
        }
    }
}

impl std::error::Error for BindingError {}

/// Produced when a typed object cannot be converted into a `serde_json::Value`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SerializeError {
    pub message: String,
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SerializeError {}

impl From<serde_json::Error> for SerializeError {
    fn from(e: serde_json::Error) -> Self {
        SerializeError {
            message: format!("failed to convert object to JSON value: {}", e),
        }
    }
}
