//! Declarative, field-level validation rules for plain data objects.
//!
//! A [`Validator`] maps field names to [`Rule`]s. A rule is an ordered set of
//! [`RuleComponent`]s (required, length and value bounds, equality, pattern
//! and email checks, or custom predicates), each optionally guarded by
//! conditions on the whole object and optionally applied per collection
//! item. Validation produces a [`ValidationResult`] tree:
//!
//! ```text
//! Validator::new(schema) → validate(&object) → ValidationResult
//!                                               ├─ error
//!                                               └─ field → component → {error, message}
//! ```
//!
//! Objects are `serde_json::Value` trees; typed values go through
//! `serde::Serialize` first.
//!
//! # Quick Start
//!
//! ```rust
//! use fieldrule::{CompareValue, RuleBuilder, Validator};
//! use serde_json::json;
//!
//! let validator = Validator::new(|c| {
//!     c.rule_for("age", |f| {
//!         f.min(18).with_message("user must be at least {|}");
//!         f.max(80).with_message("user must be less than {|}");
//!         f.not_empty().when(|user| user["dob"].is_null());
//!     });
//!     c.rule_for("passwordConfirmation", |f| {
//!         f.matches(CompareValue::field("password"))
//!             .with_message("password confirmation must match password");
//!     });
//! });
//!
//! let result = validator.validate(&json!({
//!     "age": 15,
//!     "dob": null,
//!     "password": "secret",
//!     "passwordConfirmation": "secret",
//! }));
//!
//! assert!(result.error);
//! assert_eq!(
//!     result.component("age", "min").and_then(|o| o.message()),
//!     Some("user must be at least 18")
//! );
//! assert!(!result.component("passwordConfirmation", "matches").unwrap().error());
//! ```
//!
//! # Feature Flags
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `cel-eval` | yes     | CEL guard expressions via the [`cel`] crate. Enables [`RuleComponent::when_expr`]. |

pub mod binding;
pub mod catalog;
pub mod component;
pub mod enums;
pub mod error;
#[cfg(feature = "cel-eval")]
pub mod evaluate;
pub mod primitives;
pub mod registry;
pub mod rule;
pub mod template;
pub mod types;
pub mod validator;

pub use component::{CompareValue, ComponentOptions, Operand, RuleComponent};
pub use enums::CollectionMode;
pub use error::*;
pub use registry::Registry;
pub use rule::{Rule, RuleBuilder};
pub use template::MessageTemplate;
pub use types::*;
pub use validator::Validator;
