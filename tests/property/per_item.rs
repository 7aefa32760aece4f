use fieldrule::catalog;
use proptest::prelude::*;
use serde_json::{Value, json};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Per-item outcomes line up with the input, and the aggregate flag is
    // the OR of the element flags.
    #[test]
    fn outcomes_parallel_input(items in prop::collection::vec("[ab]{0,2}", 0..12)) {
        let mut component = catalog::not_empty();
        component.validate_collection().with_message("blank");

        let value = Value::Array(items.iter().cloned().map(Value::String).collect());
        let outcome = component.run(&json!({}), &value);
        let outcomes = outcome.as_items().expect("per-item outcome");

        prop_assert_eq!(outcomes.len(), items.len());
        for (item, check) in items.iter().zip(&outcomes.items) {
            prop_assert_eq!(check.error, item.is_empty());
            prop_assert_eq!(check.message.is_some(), item.is_empty());
        }
        prop_assert_eq!(outcomes.error, items.iter().any(String::is_empty));
    }

    // Aggregate mode tests the array length, not the elements.
    #[test]
    fn aggregate_uses_length(items in prop::collection::vec("[ab]{0,2}", 0..12)) {
        let value = Value::Array(items.iter().cloned().map(Value::String).collect());
        let outcome = catalog::not_empty().run(&json!({}), &value);
        prop_assert!(outcome.as_single().is_some());
        prop_assert_eq!(outcome.error(), items.is_empty());
    }
}
