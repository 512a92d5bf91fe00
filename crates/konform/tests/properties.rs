//! Invariants of binding, validation and rendering.

mod common;
use common::*;

use konform::{fields, FieldDefinition, RuleSpec};

fn registry() -> Vec<(&'static str, FieldDefinition)> {
    vec![
        ("name", fields::text("Name")),
        ("password", fields::password("Password")),
        ("bio", fields::textarea("Bio", 40, 4)),
        ("send", fields::submit("Send")),
    ]
}

#[test]
fn bound_keys_equal_registry_keys() {
    let inputs: Vec<Vec<(&str, &str)>> = vec![
        vec![],
        vec![("name", "Ada")],
        vec![("name", "Ada"), ("password", "pw"), ("bio", "Hi"), ("send", "1")],
        vec![("unknown", "x"), ("other", "y")],
        vec![("name", "Ada"), ("name", "Grace"), ("extra", "z")],
    ];

    for input in inputs {
        let mut form = form(registry());
        let data = form.bind_data(input.clone());
        let mut keys: Vec<_> = data.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, ["bio", "name", "password", "send"], "input {input:?}");
    }
}

#[test]
fn last_duplicate_input_wins() {
    let mut form = form(registry());
    let data = form.bind_data([("name", "Ada"), ("name", "Grace")]);
    assert_eq!(data.get("name"), Some("Grace"));
}

#[test]
fn forms_without_rules_always_validate() {
    let inputs: Vec<Vec<(&str, &str)>> = vec![
        vec![],
        vec![("name", ""), ("bio", "")],
        vec![("name", "<script>"), ("password", "x")],
    ];

    for input in inputs {
        let mut form = form(registry());
        form.bind_data(input);
        assert!(form.validate().unwrap());
        assert!(form.errors().is_empty());
    }
}

#[test]
fn fields_without_rules_never_have_errors() {
    let mut form = form(vec![
        ("name", fields::text("Name").rule("not_empty")),
        ("bio", fields::textarea("Bio", 40, 4)),
    ]);
    assert!(!form.validate().unwrap());
    assert!(form.errors().contains("name"));
    assert!(!form.errors().contains("bio"));
}

#[test]
fn error_keys_are_registered_fields() {
    let mut form = form(vec![
        ("name", fields::text("Name").rule("not_empty")),
        ("email", fields::text("Email").rule("not_empty").rule("email")),
    ]);
    form.bind_data([("nickname", "")]);
    assert!(!form.validate().unwrap());
    for (field, _) in form.errors().iter() {
        assert!(form.fields().contains(field));
    }
}

#[test]
fn render_is_idempotent() {
    let mut form = form(vec![
        ("name", fields::text("Name").rule("not_empty")),
        ("send", fields::submit("Send")),
    ]);
    form.bind_data([("name", "")]);
    form.validate().unwrap();

    assert_eq!(render(&form), render(&form));
}

#[test]
fn render_order_follows_first_insertion() {
    let form = form(vec![
        ("b", fields::text("B")),
        ("a", fields::text("A")),
        ("c", fields::text("C")),
        ("b", fields::textarea("B again", 10, 2)),
        ("a", fields::password("A again")),
    ]);

    let html = render(&form);
    assert_eq!(rendered_names(&html), ["b", "a", "c"]);
    assert!(html.contains("<textarea"));
    assert!(html.contains(r#"type="password""#));
}

#[test]
fn order_survives_validate_and_render_cycles() {
    let mut form = form(vec![
        ("z", fields::text("Z").rule("not_empty")),
        ("y", fields::text("Y")),
        ("x", fields::text("X").rule("not_empty")),
    ]);
    for _ in 0..3 {
        form.validate().unwrap();
        assert_eq!(rendered_names(&render(&form)), ["z", "y", "x"]);
    }
}

#[test]
fn rule_normalization() {
    let bare = RuleSpec::from("not_empty").normalize().unwrap();
    assert_eq!(bare.id, "not_empty");
    assert!(bare.params.is_empty());

    let list = RuleSpec::with_params("range", ["1", "5"]).normalize().unwrap();
    assert_eq!(list.id, "range");
    assert_eq!(list.params, ["1", "5"]);
}

#[test]
fn element_defaults() {
    let form = form(vec![
        ("notes", FieldDefinition::new("textarea")),
        ("plain", FieldDefinition::default()),
    ]);
    let html = render(&form);

    assert!(html.contains(r#"cols="60" rows="10""#));
    assert!(html.contains(r#"<input type="text" id="id_plain" name="plain" value="">"#));
    assert!(html.contains(">plain</label>"));
}
