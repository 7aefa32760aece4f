use fieldrule::MessageTemplate;
use proptest::prelude::*;
use serde_json::Value;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // One placeholder and one argument render as prefix + arg + suffix.
    #[test]
    fn single_placeholder_interleaves(
        prefix in "[a-z ]{0,10}",
        suffix in "[a-z ]{0,10}",
        arg in "[a-z0-9]{0,8}",
    ) {
        let template = MessageTemplate::new(format!("{}{{|}}{}", prefix, suffix));
        let rendered = template.render(&[Value::String(arg.clone())]);
        prop_assert_eq!(rendered, format!("{}{}{}", prefix, arg, suffix));
    }

    // Templates without the placeholder token ignore their arguments.
    #[test]
    fn plain_template_is_verbatim(text in "[a-z ]{0,20}", arg in "[a-z]{0,5}") {
        let template = MessageTemplate::new(text.clone());
        prop_assert_eq!(template.render(&[Value::String(arg)]), text);
    }
}
