use tilerc::config::keybindings::TemplateVars;
use tilerc::config::load;
use tilerc::config::options::{ColorValue, OptionValue, ValidationContext};
use tilerc::config::widgets::{WidgetKind, validate_widget};
use tilerc::error::LoadError;
use tilerc::theme::ThemeTable;

fn validate(kind: &str, options: &str) -> Result<tilerc::config::widgets::ValidatedWidget, LoadError> {
    let themes = ThemeTable::with_builtins().unwrap();
    let vars = TemplateVars {
        terminal: "kitty".to_owned(),
    };
    let ctx = ValidationContext::new(themes.select("doom-one").unwrap(), &vars);
    let options: toml::Table = toml::from_str(options).unwrap();
    validate_widget(kind, &options, &ctx)
}

#[test]
fn clock_with_valid_slot() {
    let w = validate("clock", "format = \"%H:%M\"\nforeground = 8").unwrap();
    assert_eq!(w.kind, WidgetKind::Clock);
    assert!(matches!(
        w.get("foreground"),
        Some(OptionValue::Color(ColorValue::Slot { index: 8, .. }))
    ));
}

#[test]
fn clock_with_slot_past_theme_end() {
    let err = validate("clock", "format = \"%H:%M\"\nforeground = 99").unwrap_err();
    let LoadError::IndexOutOfRange(e) = err else {
        panic!("expected IndexOutOfRange, got {err:?}");
    };
    assert_eq!(e.theme, "doom-one");
    assert_eq!(e.index, 99);
}

#[test]
fn unknown_option_names_kind() {
    let err = validate("spacer", "length = 8\nwidth = 3").unwrap_err();
    let LoadError::UnknownOption(e) = err else {
        panic!("expected UnknownOption, got {err:?}");
    };
    assert_eq!(e.kind, "spacer");
    assert_eq!(e.option, "width");
}

#[test]
fn wrong_type_is_mismatch() {
    let err = validate("clock", "format = 12").unwrap_err();
    let LoadError::TypeMismatch(e) = err else {
        panic!("expected TypeMismatch, got {err:?}");
    };
    assert_eq!(e.option, "format");
    assert_eq!(e.expected, "string");
}

#[test]
fn unknown_kind_rejected() {
    let err = validate("weather", "").unwrap_err();
    assert!(matches!(err, LoadError::UnknownWidgetKind(ref k) if k == "weather"));
}

#[test]
fn group_box_highlight_method_checked() {
    assert!(validate("group_box", "highlight_method = \"line\"").is_ok());
    let err = validate("group_box", "highlight_method = \"glow\"").unwrap_err();
    assert!(matches!(err, LoadError::TypeMismatch(_)));
}

#[test]
fn mouse_callback_button_checked() {
    let err = validate("image", "mouse_callbacks = { Button9 = { spawn = \"x\" } }").unwrap_err();
    assert!(matches!(err, LoadError::TypeMismatch(_)));
}

#[test]
fn widget_defaults_checked_against_common_options() {
    let err = load("[widget_defaults]\nlength = 8\n").unwrap_err();
    assert!(matches!(err, LoadError::UnknownOption(ref e) if e.kind == "widget_defaults"));
}

#[test]
fn widget_defaults_bad_slot_fails_load() {
    let err = load("[widget_defaults]\nbackground = 42\n").unwrap_err();
    assert!(matches!(err, LoadError::IndexOutOfRange(_)));
}

#[test]
fn failing_widget_aborts_whole_load() {
    let err = load(
        r#"
[[screens]]
[screens.top]
height = 30

[[screens.top.widgets]]
kind = "clock"

[[screens.top.widgets]]
kind = "cpu"
foreground = "not a color"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::TypeMismatch(ref e) if e.kind == "cpu"));
}

#[test]
fn host_class_name_accepted_as_kind() {
    let err = validate("Clock", "format = \"%H:%M\"\nforeground = 99").unwrap_err();
    assert!(matches!(err, LoadError::IndexOutOfRange(_)));
    assert_eq!(validate("GroupBox", "").unwrap().kind, WidgetKind::GroupBox);
}
