// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use serde_json::json;

fn roundtrip(value: Value) -> Value {
    SettingsDocument::from_value(value).to_value()
}

#[yare::parameterized(
    empty_string  = { "" },
    whitespace    = { "  \n" },
    garbage       = { "{not json" },
    top_level_arr = { "[1, 2, 3]" },
    top_level_str = { "\"settings\"" },
    null          = { "null" },
)]
fn load_falls_back_to_empty(raw: &str) {
    let doc = SettingsDocument::load(raw);
    assert_eq!(doc, SettingsDocument::empty());
    assert_eq!(doc.to_value(), json!({}));
}

#[test]
fn load_lifts_known_fields() {
    let doc = SettingsDocument::load(
        r#"{
            "permissions": {"allow": ["Bash(ls)"], "deny": ["WebFetch"]},
            "env": {"FOO": "bar"},
            "apiKeyHelper": "/bin/key",
            "includeCoAuthoredBy": false,
            "verbose": true,
            "cleanupPeriodDays": 30
        }"#,
    );
    assert_eq!(doc.allow(), ["Bash(ls)".to_string()]);
    assert_eq!(doc.deny(), ["WebFetch".to_string()]);
    assert_eq!(doc.env().and_then(|e| e.get("FOO")).map(String::as_str), Some("bar"));
    assert_eq!(doc.api_key_helper(), Some("/bin/key"));
    assert_eq!(doc.include_co_authored_by(), Some(false));
    assert_eq!(doc.verbose(), Some(true));
    assert_eq!(doc.cleanup_period_days(), Some(30));
    assert!(doc.extra().is_empty());
}

#[test]
fn mistyped_known_fields_stay_verbatim() {
    let input = json!({
        "verbose": "yes",
        "apiKeyHelper": null,
        "cleanupPeriodDays": 7.5,
        "env": {"A": 1},
        "permissions": "all",
    });
    let doc = SettingsDocument::from_value(input.clone());
    assert_eq!(doc.verbose(), None);
    assert_eq!(doc.api_key_helper(), None);
    assert!(doc.env().is_none());
    assert!(doc.allow().is_empty());
    assert_eq!(doc.to_value(), input);
}

#[test]
fn unknown_fields_and_nesting_survive_roundtrip() {
    let input = json!({
        "model": "opus",
        "hooks": {"PreToolUse": [{"matcher": "Bash", "hooks": [{"type": "command", "command": "echo"}]}]},
        "feedbackSurveyState": {"lastShownTime": 1_754_000_000_000_u64},
        "ratio": 0.25,
        "nothing": null,
        "permissions": {"allow": [], "defaultMode": "acceptEdits", "additionalDirectories": ["/tmp"]},
    });
    assert_eq!(roundtrip(input.clone()), input);
}

#[test]
fn with_permissions_replaces_only_rule_lists() {
    let doc = SettingsDocument::from_value(json!({
        "permissions": {"allow": ["old"], "deny": ["old-deny"], "defaultMode": "plan"},
        "verbose": true,
    }));
    let doc = doc.with_permissions(vec!["Bash(npm run test:*)".into()], vec![]);
    assert_eq!(
        doc.to_value(),
        json!({
            "permissions": {"allow": ["Bash(npm run test:*)"], "deny": [], "defaultMode": "plan"},
            "verbose": true,
        })
    );
}

#[test]
fn with_permissions_overwrites_malformed_permissions() {
    let doc = SettingsDocument::from_value(json!({"permissions": {"allow": "Bash"}, "x": 1}));
    let doc = doc.with_permissions(vec!["Read".into()], vec!["Write".into()]);
    assert_eq!(
        doc.to_value(),
        json!({"permissions": {"allow": ["Read"], "deny": ["Write"]}, "x": 1})
    );
}

#[test]
fn with_env_replaces_whole_field() {
    let doc = SettingsDocument::from_value(json!({"env": {"OLD": "1"}, "other": [1, 2]}));
    let mut env = IndexMap::new();
    env.insert("NEW".to_string(), "2".to_string());
    let doc = doc.with_env(env);
    assert_eq!(doc.to_value(), json!({"env": {"NEW": "2"}, "other": [1, 2]}));
}

#[test]
fn set_known_scalars() {
    let mut doc = SettingsDocument::from_value(json!({"verbose": "loud", "apiKeyHelper": "x"}));
    doc.set(KnownField::Verbose(false));
    doc.set(KnownField::ApiKeyHelper(None));
    doc.set(KnownField::CleanupPeriodDays(Some(14)));
    doc.set(KnownField::IncludeCoAuthoredBy(true));
    assert_eq!(
        doc.to_value(),
        json!({"includeCoAuthoredBy": true, "verbose": false, "cleanupPeriodDays": 14})
    );
}

#[test]
fn set_extra_routes_known_keys_to_typed_slot() {
    let mut doc = SettingsDocument::empty();
    doc.set_extra("verbose", json!(true));
    doc.set_extra("theme", json!("dark"));
    assert_eq!(doc.verbose(), Some(true));
    assert_eq!(doc.extra().get("theme"), Some(&json!("dark")));

    doc.set_extra("verbose", json!("very"));
    assert_eq!(doc.verbose(), None);
    assert_eq!(doc.to_value(), json!({"theme": "dark", "verbose": "very"}));
}

#[test]
fn remove_extra_returns_previous_value() {
    let mut doc = SettingsDocument::from_value(json!({"theme": "dark"}));
    assert_eq!(doc.remove_extra("theme"), Some(json!("dark")));
    assert_eq!(doc.remove_extra("theme"), None);
    assert_eq!(doc.to_value(), json!({}));
}

#[test]
fn serialize_is_parseable_pretty_json() {
    let doc = SettingsDocument::from_value(json!({"verbose": true}));
    let text = doc.serialize();
    assert!(text.contains('\n'));
    assert_eq!(SettingsDocument::load(&text), doc);
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<u32>().prop_map(Value::from),
        "[a-zA-Z0-9 _()*:-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn arb_settings() -> impl Strategy<Value = Value> {
    let keys = prop_oneof![
        Just("permissions".to_string()),
        Just("env".to_string()),
        Just("apiKeyHelper".to_string()),
        Just("includeCoAuthoredBy".to_string()),
        Just("verbose".to_string()),
        Just("cleanupPeriodDays".to_string()),
        "[a-z]{1,8}",
    ];
    prop::collection::btree_map(keys, arb_json(), 0..8)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}

proptest! {
    #[test]
    fn load_serialize_preserves_every_field(input in arb_settings()) {
        let doc = SettingsDocument::load(&input.to_string());
        let output: Value = serde_json::from_str(&doc.serialize()).unwrap();
        prop_assert_eq!(output, input);
    }

    #[test]
    fn setter_touches_only_its_field(input in arb_settings(), verbose in any::<bool>()) {
        let mut doc = SettingsDocument::from_value(input.clone());
        doc.set(KnownField::Verbose(verbose));
        let mut expected = input.as_object().cloned().unwrap_or_default();
        expected.insert("verbose".to_string(), Value::Bool(verbose));
        prop_assert_eq!(doc.to_value(), Value::Object(expected));
    }
}

#[test]
fn rule_rows_read_mistyped_lists() {
    let doc = SettingsDocument::from_value(json!({
        "permissions": {"allow": ["Read", 7, true, {"tool": "Edit"}, null], "deny": ["WebFetch"]}
    }));
    assert!(doc.allow().is_empty());
    assert_eq!(doc.rule_rows(PermissionKind::Allow), ["Read", "7", "true"]);
    assert_eq!(doc.rule_rows(PermissionKind::Deny), ["WebFetch"]);
}

#[test]
fn with_permissions_keeps_elements_without_text() {
    let doc = SettingsDocument::from_value(json!({
        "permissions": {"allow": ["Read", {"tool": "Edit"}], "defaultMode": "plan"}
    }))
    .with_permissions(vec!["Read".into(), "Bash(ls)".into()], vec![]);

    assert_eq!(
        doc.to_value()["permissions"],
        json!({"deny": [], "defaultMode": "plan", "allow": ["Read", "Bash(ls)", {"tool": "Edit"}]})
    );
}

#[test]
fn env_rows_read_mistyped_map() {
    let doc = SettingsDocument::from_value(json!({
        "env": {"A": "1", "PORT": 8080, "DEBUG": false, "NESTED": {"x": 1}}
    }));
    assert!(doc.env().is_none());
    assert_eq!(
        doc.env_rows(),
        [
            ("A".to_string(), "1".to_string()),
            ("PORT".to_string(), "8080".to_string()),
            ("DEBUG".to_string(), "false".to_string()),
        ]
    );
}

#[yare::parameterized(
    kept       = { IndexMap::from([("A".to_string(), "1".to_string())]), json!({"A": "1", "NESTED": {"x": 1}}) },
    overridden = { IndexMap::from([("NESTED".to_string(), "y".to_string())]), json!({"NESTED": "y"}) },
)]
fn with_env_keeps_entries_without_text(env: IndexMap<String, String>, expected: Value) {
    let doc =
        SettingsDocument::from_value(json!({"env": {"A": "1", "NESTED": {"x": 1}}})).with_env(env);
    assert_eq!(doc.to_value()["env"], expected);
}
