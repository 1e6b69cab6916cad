use mdext::{Engine, SettingValue, SettingsError};
use pretty_assertions::assert_eq;

#[test]
fn composite_paths_report_their_enabled_flag() {
    let engine = Engine::new();
    assert_eq!(engine.get_setting("tables").unwrap(), SettingValue::Bool(true));
    assert_eq!(engine.get_setting("math").unwrap(), SettingValue::Bool(false));
}

#[test]
fn unknown_paths_fail_fast() {
    let mut engine = Engine::new();
    assert_eq!(
        engine.set_setting("tables.stripes", true),
        Err(SettingsError::UnknownPath("tables.stripes".to_string()))
    );
    assert_eq!(
        engine.get_setting("nope"),
        Err(SettingsError::UnknownPath("nope".to_string()))
    );
}

#[test]
fn wrong_value_kind_is_rejected() {
    let mut engine = Engine::new();
    let err = engine.set_setting("emphasis.bold", "yes").unwrap_err();
    assert!(matches!(err, SettingsError::WrongKind { .. }));
}

#[test]
fn enabling_a_composite_keeps_sibling_options() {
    let mut engine = Engine::new();
    engine.set_setting("math", true).unwrap();
    let delimiters = engine.get_setting("math.inline.delimiters").unwrap();
    assert_eq!(
        delimiters,
        SettingValue::Pairs(vec![("\\(".to_string(), "\\)".to_string())])
    );
}

#[test]
fn list_values_merge_unless_overwritten() {
    let mut engine = Engine::new();
    engine
        .set_setting("math.inline.delimiters", vec![("$", "$")])
        .unwrap();
    match engine.get_setting("math.inline.delimiters").unwrap() {
        SettingValue::Pairs(pairs) => assert_eq!(pairs.len(), 2),
        other => panic!("expected pairs, got {other:?}"),
    }

    engine
        .set_setting_overwrite("math.inline.delimiters", vec![("$", "$")])
        .unwrap();
    assert_eq!(
        engine.get_setting("math.inline.delimiters").unwrap(),
        SettingValue::Pairs(vec![("$".to_string(), "$".to_string())])
    );
}

#[test]
fn toggling_a_feature_changes_conversion() {
    let mut engine = Engine::new();
    assert_eq!(engine.convert("==x=="), "<p><mark>x</mark></p>");
    engine.set_setting("emphasis.marking", false).unwrap();
    assert_eq!(engine.convert("==x=="), "<p>==x==</p>");
    engine.set_setting("emphasis.marking", true).unwrap();
    assert_eq!(engine.convert("==x=="), "<p><mark>x</mark></p>");
}

#[test]
fn disabling_whole_emphasis_disables_every_variant() {
    let mut engine = Engine::new();
    engine.set_setting("emphasis", false).unwrap();
    assert_eq!(engine.convert("**a** ~~b~~"), "<p>**a** ~~b~~</p>");
}

#[test]
fn heading_levels_can_be_restricted() {
    let mut engine = Engine::new();
    engine
        .set_setting_overwrite("headings.allowed", vec!["h1", "h2"])
        .unwrap();
    let out = engine.convert("### deep");
    assert_eq!(out, "<p>### deep</p>");
}
