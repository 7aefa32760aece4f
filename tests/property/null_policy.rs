use fieldrule::{CompareValue, RuleComponent, catalog};
use proptest::prelude::*;
use serde_json::{Value, json};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-1000i64..1000).prop_map(|n| json!(n)),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // A null field value never reaches the predicate under the null policy.
    #[test]
    fn null_value_passes_regardless_of_predicate(compare in scalar()) {
        let component = RuleComponent::new("never", |_, _, _| false).compare_value(compare);
        let root = json!({});
        prop_assert!(!component.run(&root, &Value::Null).error());
    }

    // A null compare value never reaches the predicate under the null policy.
    #[test]
    fn null_compare_passes_regardless_of_predicate(value in scalar()) {
        let component = RuleComponent::new("never", |_, _, _| false)
            .compare_value(CompareValue::field("missing"));
        let root = json!({});
        prop_assert!(!component.run(&root, &value).error());
    }

    // Required fails exactly on null, empty string and zero.
    #[test]
    fn required_fails_only_on_blank(value in scalar()) {
        let blank = matches!(&value, Value::Null)
            || value == json!("")
            || value == json!(0);
        let outcome = catalog::not_empty().run(&json!({}), &value);
        prop_assert_eq!(outcome.error(), blank);
    }

    // A guard that never holds makes any component pass.
    #[test]
    fn false_guard_always_passes(value in scalar()) {
        let mut component = catalog::not_empty();
        component.when(|_| false);
        let root = json!({});
        prop_assert!(!component.run(&root, &value).error());
    }

    // min and max agree with numeric ordering.
    #[test]
    fn bounds_follow_ordering(value in -1000i64..1000, bound in -1000i64..1000) {
        let below = catalog::min(bound).run(&json!({}), &json!(value)).error();
        let above = catalog::max(bound).run(&json!({}), &json!(value)).error();
        prop_assert_eq!(below, value < bound);
        prop_assert_eq!(above, value > bound);
    }
}
