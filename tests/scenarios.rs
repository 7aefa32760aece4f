//! End-to-end validation of a user signup object with a nested address.

use fieldrule::*;
use serde_json::{Value, json};
use std::sync::Arc;

fn object(yaml: &str) -> Value {
    serde_saphyr::from_str(yaml).expect("valid YAML")
}

fn address_validator() -> Arc<Validator> {
    Arc::new(Validator::new(|c| {
        c.rule_for("line1", |f| {
            f.not_empty().with_message("line1 is required");
        });
    }))
}

fn user_validator() -> Validator {
    Validator::try_new(|c| {
        c.rule_for("username", |f| {
            f.not_empty().with_message("username is required");
        });

        c.rule_for("firstName", |f| {
            f.not_empty().with_message("firstName is required");
            f.min_length(10)
                .with_message("firstName cannot be shorter than {|}");
            f.max_length(20)
                .with_message("firstName cannot be longer than {|}");
        });

        c.rule_for("age", |f| {
            f.min(18).with_message("user must be at least {|}");
            f.max(80).with_message("user must be less than {|}");
            f.not_empty().when(|user| user["dob"].is_null());
        });

        c.rule_for("password", |f| {
            f.not_empty().with_message("password is required");
        });

        c.rule_for("passwordConfirmation", |f| {
            f.not_empty()
                .with_message("password confirmation is required");
            f.matches(CompareValue::field("password"))
                .with_message("password confirmation must match password");
        });

        c.rule_for("tags", |f| {
            f.not_empty()
                .with_message("you must provide at least one tag");
        });

        c.rule_for("categories", |f| {
            f.not_empty()
                .with_message("category cannot be blank")
                .validate_collection();
        });

        c.register_nested("address", address_validator())?;
        Ok(())
    })
    .expect("schema is consistent")
}

const BLANK_USER: &str = r#"
username: null
firstName: null
lastName: null
age: null
dob: null
password: null
passwordConfirmation: null
address:
  line1: null
  postCode: null
tags: []
categories: []
"#;

fn blank_user() -> Value {
    object(BLANK_USER)
}

fn with(mut user: Value, field: &str, value: Value) -> Value {
    user[field] = value;
    user
}

// ─── Required fields ─────────────────────────────────────────────────────────

#[test]
fn username_required() {
    let v = user_validator();
    let result = v.validate(&blank_user());
    assert_eq!(
        result.component("username", "notEmpty"),
        Some(&Outcome::Single(Check::fail(Some(
            "username is required".to_string()
        ))))
    );

    let result = v.validate(&with(blank_user(), "username", json!("bob")));
    assert_eq!(result.component("username", "notEmpty"), Some(&Outcome::pass()));
}

// ─── Collections ─────────────────────────────────────────────────────────────

#[test]
fn tags_checked_as_a_whole() {
    let v = user_validator();
    let result = v.validate(&blank_user());
    let tags = result.component("tags", "notEmpty").unwrap();
    assert!(tags.error());
    assert_eq!(tags.message(), Some("you must provide at least one tag"));

    let result = v.validate(&with(blank_user(), "tags", json!(["x"])));
    assert!(!result.component("tags", "notEmpty").unwrap().error());
}

#[test]
fn categories_checked_per_item() {
    let v = user_validator();

    let result = v.validate(&blank_user());
    let empty = result.component("categories", "notEmpty").unwrap();
    assert!(!empty.error());
    assert!(empty.as_items().unwrap().is_empty());

    let result = v.validate(&with(blank_user(), "categories", json!(["", "test"])));
    let outcome = result.component("categories", "notEmpty").unwrap();
    assert!(outcome.error());
    assert_eq!(
        outcome.as_items().unwrap().items,
        vec![
            Check::fail(Some("category cannot be blank".to_string())),
            Check::pass(),
        ]
    );
    assert_eq!(
        result.to_json()["categories"]["notEmpty"],
        json!({
            "error": true,
            "items": [{"error": true, "message": "category cannot be blank"}, {"error": false}]
        })
    );
}

// ─── Guards and bounds ───────────────────────────────────────────────────────

#[test]
fn age_required_only_without_dob() {
    let v = user_validator();
    let result = v.validate(&blank_user());
    assert!(result.component("age", "notEmpty").unwrap().error());

    let result = v.validate(&with(blank_user(), "dob", json!("1990-04-01")));
    assert!(!result.component("age", "notEmpty").unwrap().error());
}

#[test]
fn age_bounds() {
    let v = user_validator();

    let result = v.validate(&blank_user());
    assert!(!result.component("age", "min").unwrap().error());
    assert!(!result.component("age", "max").unwrap().error());

    let result = v.validate(&with(blank_user(), "age", json!(15)));
    assert_eq!(
        result.component("age", "min").and_then(Outcome::message),
        Some("user must be at least 18")
    );

    let result = v.validate(&with(blank_user(), "age", json!(85)));
    assert_eq!(
        result.component("age", "max").and_then(Outcome::message),
        Some("user must be less than 80")
    );

    let result = v.validate(&with(blank_user(), "age", json!(20)));
    assert!(!result.field("age").unwrap().error);
}

#[test]
fn first_name_length_messages() {
    let v = user_validator();

    let result = v.validate(&with(blank_user(), "firstName", json!("test")));
    assert_eq!(
        result.component("firstName", "minLength").and_then(Outcome::message),
        Some("firstName cannot be shorter than 10")
    );

    let result = v.validate(&with(
        blank_user(),
        "firstName",
        json!("test test test test test test "),
    ));
    assert_eq!(
        result.component("firstName", "maxLength").and_then(Outcome::message),
        Some("firstName cannot be longer than 20")
    );

    let result = v.validate(&with(blank_user(), "firstName", json!("test test ")));
    assert!(!result.field("firstName").unwrap().error);
}

#[test]
fn password_confirmation_matches_sibling() {
    let v = user_validator();

    let result = v.validate(&blank_user());
    assert!(!result.component("passwordConfirmation", "matches").unwrap().error());

    let user = object(
        r#"
password: password
passwordConfirmation: pass--word
"#,
    );
    let result = v.validate(&user);
    assert_eq!(
        result
            .component("passwordConfirmation", "matches")
            .and_then(Outcome::message),
        Some("password confirmation must match password")
    );

    let user = object(
        r#"
password: password
passwordConfirmation: password
"#,
    );
    let result = v.validate(&user);
    assert!(!result.component("passwordConfirmation", "matches").unwrap().error());
}

#[test]
fn matches_constant_added_to_existing_rule() {
    let mut v = user_validator();
    v.rule_for("passwordConfirmation", |f| {
        f.matches("password")
            .with_message("password confirmation must match password");
    });

    // The constant check is the last `matches`, so it owns the result slot.
    let result = v.validate(&with(blank_user(), "passwordConfirmation", json!("password")));
    assert!(!result.component("passwordConfirmation", "matches").unwrap().error());

    let result = v.validate(&with(
        blank_user(),
        "passwordConfirmation",
        json!("pass--word"),
    ));
    assert!(result.component("passwordConfirmation", "matches").unwrap().error());
}

#[test]
fn message_args_from_sibling_field() {
    let v = Validator::new(|c| {
        c.rule_for("age", |f| {
            f.min(CompareValue::field("minAge")).with_message_args(
                "user must be at least {|}",
                |user, _| vec![user["minAge"].clone()],
            );
        });
    });

    let result = v.validate(&json!({"age": 16, "minAge": 21}));
    assert_eq!(
        result.component("age", "min").and_then(Outcome::message),
        Some("user must be at least 21")
    );
    assert!(!v.validate(&json!({"age": 25, "minAge": 21})).error);
}

// ─── Nested objects ──────────────────────────────────────────────────────────

#[test]
fn nested_address_tracks_parent_error() {
    let v = user_validator();
    let valid_top_level = object(
        r#"
username: bob
firstName: bobby tables
age: 30
password: secret
passwordConfirmation: secret
tags: [admin]
categories: [staff]
address:
  line1: null
"#,
    );

    let result = v.validate(&valid_top_level);
    let line1 = result.field("address").and_then(|a| a.child("line1")).unwrap();
    assert!(line1.component("notEmpty").unwrap().error());
    assert!(result.field("address").unwrap().error);
    assert!(result.error);

    let mut fixed = valid_top_level;
    fixed["address"]["line1"] = json!("x");
    let result = v.validate(&fixed);
    assert_eq!(
        result.to_json()["address"]["line1"]["notEmpty"]["error"],
        json!(false)
    );
    assert!(!result.error, "unexpected errors: {}", result.to_json());
}

#[test]
fn nested_result_contains_every_child_key() {
    let v = user_validator();
    let user = blank_user();
    let child = address_validator().validate(&user["address"]);
    let result = v.validate(&user);
    let address = result.field("address").unwrap();
    for key in child.fields.keys() {
        assert!(address.child(key).is_some(), "missing nested key {}", key);
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

#[test]
fn registry_validates_typed_objects() {
    #[derive(serde::Serialize)]
    struct Address {
        line1: Option<String>,
    }

    let mut registry = Registry::new();
    address_validator().apply_to::<Address>(&mut registry);

    let result = registry
        .validate(&Address { line1: None })
        .expect("validator registered")
        .expect("serializable");
    assert!(result.component("line1", "notEmpty").unwrap().error());
}

#[cfg(feature = "cel-eval")]
#[test]
fn cel_guard_matches_closure_guard() {
    let v = Validator::try_new(|c| {
        c.rule_for("age", |_| {}).not_empty().when_expr("dob == null")?;
        Ok(())
    })
    .unwrap();

    let result = v.validate(&json!({"age": null, "dob": null}));
    assert!(result.component("age", "notEmpty").unwrap().error());

    let result = v.validate(&json!({"age": null, "dob": "1990-04-01"}));
    assert!(!result.component("age", "notEmpty").unwrap().error());

    // An omitted dob reads as null for both guard forms.
    let closure = Validator::new(|c| {
        c.rule_for("age", |f| {
            f.not_empty().when(|user| user["dob"].is_null());
        });
    });
    let object = json!({"age": null});
    assert!(closure.validate(&object).component("age", "notEmpty").unwrap().error());
    assert!(v.validate(&object).component("age", "notEmpty").unwrap().error());
}
