//! Standard component factories.
//!
//! Each function returns a configured [`RuleComponent`] with no message.
//! Bound components (`min_length`, `max_length`, `min`, `max`, `matches`)
//! supply their bound as the message argument, so a template such as
//! `"must be at least {|}"` renders without a custom provider.
//!
//! | Component   | Name        | `pass_on_null` | Array as length |
//! |-------------|-------------|----------------|-----------------|
//! | `not_empty` | `notEmpty`  | no             | yes             |
//! | `min_length`| `minLength` | yes            | yes             |
//! | `max_length`| `maxLength` | yes            | yes             |
//! | `min`       | `min`       | yes            | no              |
//! | `max`       | `max`       | yes            | no              |
//! | `matches`   | `matches`   | yes            | no              |
//! | `pattern`   | caller's    | yes            | no              |
//! | `email`     | `email`     | yes            | no              |

use crate::component::{CompareValue, ComponentOptions, RuleComponent};
use crate::error::{SchemaError, SchemaErrorKind};
use crate::primitives::{compare_values, display_value, is_blank, value_length, values_equal};
use regex::Regex;
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::LazyLock;

pub const NOT_EMPTY: &str = "notEmpty";
pub const MIN_LENGTH: &str = "minLength";
pub const MAX_LENGTH: &str = "maxLength";
pub const MIN: &str = "min";
pub const MAX: &str = "max";
pub const MATCHES: &str = "matches";
pub const EMAIL: &str = "email";

/// Permissive email shape: something, `@`, something, `.`, something.
pub static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").unwrap());

const LENGTH_OPTIONS: ComponentOptions = ComponentOptions {
    pass_on_null: true,
    convert_array_to_length: true,
};

/// Required value.
///
/// Fails on `null`, `""` and numeric zero, so `0` is never a valid value
/// for a field using this component. A sequence in aggregate mode is
/// replaced by its length, so an empty array fails.
pub fn not_empty() -> RuleComponent {
    RuleComponent::new(NOT_EMPTY, |_, value, _| !is_blank(value)).with_options(
        ComponentOptions {
            pass_on_null: false,
            convert_array_to_length: true,
        },
    )
}

pub fn min_length(min: usize) -> RuleComponent {
    length_bound(MIN_LENGTH, min, Ordering::Less)
}

pub fn max_length(max: usize) -> RuleComponent {
    length_bound(MAX_LENGTH, max, Ordering::Greater)
}

/// Numeric, string or date lower bound (inclusive).
pub fn min(bound: impl Into<CompareValue>) -> RuleComponent {
    value_bound(MIN, bound.into(), Ordering::Less)
}

/// Numeric, string or date upper bound (inclusive).
pub fn max(bound: impl Into<CompareValue>) -> RuleComponent {
    value_bound(MAX, bound.into(), Ordering::Greater)
}

/// Equality with a fixed value, a sibling field or a computed value.
pub fn matches(other: impl Into<CompareValue>) -> RuleComponent {
    let other = other.into();
    let display = other.clone();
    RuleComponent::new(MATCHES, |_, value, compare| values_equal(value, compare))
        .compare_value(other)
        .arg_provider(move |object, _| vec![display.operand(object).to_display_value()])
}

/// Regular-expression match under a caller-chosen component name.
///
/// Strings are matched directly; numbers and booleans are matched on their
/// text form; arrays and objects fail.
pub fn pattern(name: impl Into<String>, re: Regex) -> RuleComponent {
    RuleComponent::new(name, move |_, value, _| match value {
        Value::String(s) => re.is_match(s),
        Value::Number(_) | Value::Bool(_) => re.is_match(&display_value(value)),
        _ => false,
    })
}

/// [`pattern`] from source text.
///
/// # Errors
///
/// Returns `SchemaError { kind: InvalidPattern }` if `source` does not compile.
pub fn pattern_str(name: impl Into<String>, source: &str) -> Result<RuleComponent, SchemaError> {
    let re = Regex::new(source).map_err(|e| {
        SchemaError::new(
            SchemaErrorKind::InvalidPattern,
            format!("invalid regex '{}': {}", source, e),
        )
    })?;
    Ok(pattern(name, re))
}

pub fn email() -> RuleComponent {
    pattern(EMAIL, EMAIL_RE.clone())
}

fn length_bound(name: &str, bound: usize, reject: Ordering) -> RuleComponent {
    RuleComponent::new(name, move |_, value, compare| {
        // Arrays arrive already converted to their length.
        let length = match value {
            Value::Number(n) => n.as_f64(),
            other => value_length(other).map(|n| n as f64),
        };
        match (length, compare.as_f64()) {
            (Some(length), Some(bound)) => length.partial_cmp(&bound).is_some_and(|o| o != reject),
            _ => false,
        }
    })
    .compare_value(bound)
    .with_options(LENGTH_OPTIONS)
    .static_args(vec![Value::from(bound)])
    .arg_provider(|_, args| args.to_vec())
}

fn value_bound(name: &str, bound: CompareValue, reject: Ordering) -> RuleComponent {
    let display = bound.clone();
    RuleComponent::new(name, move |_, value, compare| {
        compare_values(value, compare).is_some_and(|o| o != reject)
    })
    .compare_value(bound)
    .arg_provider(move |object, _| vec![display.operand(object).to_display_value()])
}
