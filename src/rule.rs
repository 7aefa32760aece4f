//! Rules: the ordered components of one field, and the builder surface used
//! to attach catalog components to them.

use crate::catalog;
use crate::component::{CompareValue, RuleComponent};
use crate::error::SchemaError;
use crate::types::{FieldValue, RuleResult};
use regex::Regex;
use serde_json::Value;

/// The ordered set of components validating one field.
///
/// Every component runs on every call; a failure never stops later
/// components.
#[derive(Clone, Debug, Default)]
pub struct Rule {
    components: Vec<RuleComponent>,
}

impl Rule {
    pub fn new() -> Self {
        Rule::default()
    }

    pub fn components(&self) -> &[RuleComponent] {
        &self.components
    }

    /// The component that owns `name` in the result map (the last one added
    /// under that name).
    pub fn component(&self, name: &str) -> Option<&RuleComponent> {
        self.components.iter().rev().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Runs every component against `value`.
    pub fn validate(&self, object: &Value, value: &Value) -> RuleResult {
        let input = FieldValue::of(value);
        let mut result = RuleResult::default();
        for component in &self.components {
            let outcome = component.run_field(object, input);
            tracing::trace!(
                component = component.name(),
                error = outcome.error(),
                "component evaluated"
            );
            result.insert(component.name(), outcome);
        }
        result
    }
}

/// Attaches catalog components to a rule.
///
/// Every method appends a component and returns it, so it can be refined
/// with `when`, `with_message` or `validate_collection`.
pub trait RuleBuilder {
    /// Appends a component. Names are not deduplicated.
    fn add_component(&mut self, component: RuleComponent) -> &mut RuleComponent;

    fn not_empty(&mut self) -> &mut RuleComponent {
        self.add_component(catalog::not_empty())
    }

    fn min_length(&mut self, min: usize) -> &mut RuleComponent {
        self.add_component(catalog::min_length(min))
    }

    fn max_length(&mut self, max: usize) -> &mut RuleComponent {
        self.add_component(catalog::max_length(max))
    }

    fn min(&mut self, bound: impl Into<CompareValue>) -> &mut RuleComponent {
        self.add_component(catalog::min(bound))
    }

    fn max(&mut self, bound: impl Into<CompareValue>) -> &mut RuleComponent {
        self.add_component(catalog::max(bound))
    }

    fn matches(&mut self, other: impl Into<CompareValue>) -> &mut RuleComponent {
        self.add_component(catalog::matches(other))
    }

    fn pattern(&mut self, name: impl Into<String>, re: Regex) -> &mut RuleComponent {
        self.add_component(catalog::pattern(name, re))
    }

    /// # Errors
    ///
    /// Returns `SchemaError { kind: InvalidPattern }` if `source` does not compile.
    fn pattern_str(
        &mut self,
        name: impl Into<String>,
        source: &str,
    ) -> Result<&mut RuleComponent, SchemaError> {
        Ok(self.add_component(catalog::pattern_str(name, source)?))
    }

    fn email(&mut self) -> &mut RuleComponent {
        self.add_component(catalog::email())
    }

    /// A custom check on the field value alone. Null values pass.
    fn must<F>(&mut self, name: impl Into<String>, check: F) -> &mut RuleComponent
    where
        F: Fn(&Value, &Value) -> bool + Send + Sync + 'static,
    {
        self.add_component(RuleComponent::new(name, move |object, value, _| {
            check(object, value)
        }))
    }
}

impl RuleBuilder for Rule {
    fn add_component(&mut self, component: RuleComponent) -> &mut RuleComponent {
        let index = self.components.len();
        self.components.push(component);
        &mut self.components[index]
    }
}
