use std::path::Path;

use tilerc::config::keybindings::{Action, HostCommand, Modifier, ModifierSet};
use tilerc::config::layouts::LayoutKind;
use tilerc::config::loader::{self, DEFAULT_CONFIG, load, load_file};
use tilerc::config::options::OptionValue;
use tilerc::config::types::FocusOnActivation;
use tilerc::config::widgets::WidgetKind;
use tilerc::error::LoadError;

// ---------------------------------------------------------------------------
// Bundled default
// ---------------------------------------------------------------------------

#[test]
fn default_config_loads() {
    let config = load(DEFAULT_CONFIG).unwrap();
    assert_eq!(config.modifier, Modifier::Mod4);
    assert_eq!(config.terminal, "kitty");
    assert_eq!(config.theme.name(), "doom-one");
    assert_eq!(config.groups.len(), 9);
    assert_eq!(config.keys.len(), 24 + 2 * 9);
    assert_eq!(config.mouse.len(), 3);
    assert_eq!(config.screens.len(), 2);
    assert_eq!(config.settings.wmname, "LG3D");
    assert_eq!(
        config.settings.focus_on_window_activation,
        FocusOnActivation::Smart
    );
}

#[test]
fn default_config_terminal_spawn_expanded() {
    let config = load(DEFAULT_CONFIG).unwrap();
    let mods = ModifierSet::new([Modifier::Mod4]);
    assert_eq!(
        config.keys.resolve(&mods, "Return").action(),
        Some(&Action::Spawn("kitty".to_owned()))
    );
    assert_eq!(
        config.keys.resolve(&mods, "w").action(),
        Some(&Action::Command(HostCommand::Kill))
    );
}

#[test]
fn default_config_systray_on_first_screen_only() {
    let config = load(DEFAULT_CONFIG).unwrap();
    let has_systray = |i: usize| {
        config.screens[i]
            .top
            .as_ref()
            .unwrap()
            .widgets
            .iter()
            .any(|w| w.kind == WidgetKind::Systray)
    };
    assert!(has_systray(0));
    assert!(!has_systray(1));
}

#[test]
fn default_config_widget_defaults_merged() {
    let config = load(DEFAULT_CONFIG).unwrap();
    let bar = config.screens[0].top.as_ref().unwrap();
    let spacer = bar
        .widgets
        .iter()
        .find(|w| w.kind == WidgetKind::Spacer)
        .unwrap();
    assert_eq!(
        spacer.get("font"),
        Some(&OptionValue::Str("Hack Nerd Font Bold".to_owned()))
    );
    let prompt = &bar.widgets[1];
    assert_eq!(prompt.kind, WidgetKind::Prompt);
    assert_eq!(prompt.get("fontsize"), Some(&OptionValue::Int(14)));
}

#[test]
fn default_config_poll_widget_carries_callback() {
    let config = load(DEFAULT_CONFIG).unwrap();
    let bar = config.screens[0].top.as_ref().unwrap();
    let poll = bar
        .widgets
        .iter()
        .find(|w| w.kind == WidgetKind::GenPollText)
        .unwrap();
    assert_eq!(
        poll.poll_callback().unwrap().descriptor(),
        "shell: printf $(uname -r)"
    );
    let image = &bar.widgets[0];
    let callbacks = image.mouse_callbacks().unwrap();
    assert_eq!(callbacks.len(), 1);
    assert_eq!(
        callbacks.values().next().unwrap().descriptor(),
        "spawn: kitty"
    );
}

#[test]
fn loading_twice_is_structurally_equal() {
    let a = load(DEFAULT_CONFIG).unwrap();
    let b = load(DEFAULT_CONFIG).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[test]
fn load_laptop_fixture() {
    let config = load_file(Path::new("tests/fixtures/laptop.toml")).unwrap();
    assert_eq!(config.modifier, Modifier::Mod1);
    assert_eq!(config.theme.name(), "nord");
    let names: Vec<&str> = config.groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["web", "dev", "chat"]);
    assert_eq!(config.keys.len(), 3 + 2 * 3);
    assert_eq!(config.layouts.len(), 1);
    assert_eq!(config.layouts[0].kind, LayoutKind::MonadTall);
    assert!(config.screens[0].top.is_none());
    let bottom = config.screens[0].bottom.as_ref().unwrap();
    assert_eq!(bottom.widgets.len(), 2);
    assert!(config.is_floating("gpg", "pinentry"));
    assert!(config.is_floating("dialog", ""));
}

#[test]
fn group_names_become_keys() {
    let config = load_file(Path::new("tests/fixtures/laptop.toml")).unwrap();
    let mods = ModifierSet::new([Modifier::Mod1, Modifier::Shift]);
    assert_eq!(
        config.keys.resolve(&mods, "dev").action(),
        Some(&Action::WindowToGroup {
            group: "dev".to_owned(),
            switch_group: false,
        })
    );
}

#[test]
fn invalid_toml_produces_error() {
    let err = load_file(Path::new("tests/fixtures/invalid_toml.toml")).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
    let err_msg = err.to_string();
    // Error should reference the file path.
    assert!(
        err_msg.contains("invalid_toml.toml"),
        "error should mention file: {err_msg}"
    );
}

#[test]
fn missing_file_is_io_error() {
    let err = load_file(Path::new("tests/fixtures/does_not_exist.toml")).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("does_not_exist.toml"));
}

#[test]
fn duplicate_binding_fixture_fails() {
    let err = load_file(Path::new("tests/fixtures/duplicate_binding.toml")).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateBinding(ref e) if e.combo == "mod4+p"));
}

#[test]
fn bad_slot_fixture_fails() {
    let err = load_file(Path::new("tests/fixtures/bad_slot.toml")).unwrap_err();
    let LoadError::IndexOutOfRange(e) = err else {
        panic!("expected IndexOutOfRange, got {err:?}");
    };
    assert_eq!(e.index, 99);
    assert_eq!(e.len, 9);
}

// ---------------------------------------------------------------------------
// Strictness
// ---------------------------------------------------------------------------

#[test]
fn unknown_top_level_key_rejected() {
    let err = load(r#"unknown_top_level = "oops""#).unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[test]
fn unknown_setting_rejected() {
    let err = load("[settings]\nfollow_mouse = true\n").unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[test]
fn unknown_theme_lists_available() {
    let err = load(r#"theme = "nope""#).unwrap_err();
    let LoadError::UnknownTheme(e) = err else {
        panic!("expected UnknownTheme, got {err:?}");
    };
    assert_eq!(e.name, "nope");
    assert!(e.available.iter().any(|n| n == "dracula"));
}

#[test]
fn short_user_theme_rejected() {
    let err = load(
        r##"
theme = "tiny"
[themes.tiny]
colors = [["#000000", "#000000"]]
"##,
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::InvalidTheme { found: 1, .. }));
}

#[test]
fn spawn_without_command_rejected() {
    let err = load(
        r#"
[[keys]]
mods = ["mod"]
key = "Return"
action = "spawn"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::MissingArgument { .. }));
}

#[test]
fn key_referencing_undeclared_group_rejected() {
    let err = load(
        r#"
groups = "123"
[[keys]]
mods = ["mod"]
key = "x"
action = "group.toscreen"
group = "9"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::UnknownGroup(ref g) if g == "9"));
}

#[test]
fn duplicate_group_rejected() {
    let err = load(r#"groups = ["a", "b", "a"]"#).unwrap_err();
    assert!(matches!(err, LoadError::DuplicateGroup(ref g) if g == "a"));
}

#[test]
fn default_float_rules_can_be_disabled() {
    let config = load("default_float_rules = false").unwrap();
    assert!(!config.is_floating("dialog", ""));
}

#[test]
fn minimal_has_defaults() {
    let config = loader::minimal().unwrap();
    assert_eq!(config.terminal, "xterm");
    assert_eq!(config.layouts.len(), 2);
    assert!(config.hooks.startup_once.is_none());
}
