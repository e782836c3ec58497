use std::io::Write;
use std::sync::Arc;

use tilerc::error::LoadError;
use tilerc::session::{ConfigSource, ConfigStore};

const GOOD: &str = r#"
groups = "123"

[[keys]]
mods = ["mod"]
key = "w"
action = "window.kill"
"#;

const COLLIDING: &str = r#"
groups = ["1", "2", "p"]

[[keys]]
mods = ["mod"]
key = "p"
action = "spawn"
command = "rofi -show run"
"#;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn failed_reload_keeps_previous_snapshot() {
    let file = write_config(GOOD);
    let store = ConfigStore::open(ConfigSource::File(file.path().to_owned())).unwrap();
    let before = store.current();

    std::fs::write(file.path(), COLLIDING).unwrap();
    let err = store.reload().unwrap_err();
    assert!(matches!(err, LoadError::DuplicateBinding(_)));

    let after = store.current();
    assert!(Arc::ptr_eq(&before, &after));
    assert_eq!(*before, *after);
}

#[test]
fn successful_reload_swaps_snapshot() {
    let file = write_config(GOOD);
    let store = ConfigStore::open(ConfigSource::File(file.path().to_owned())).unwrap();
    let before = store.current();
    assert_eq!(before.groups.len(), 3);

    std::fs::write(file.path(), "groups = \"12345\"\n").unwrap();
    let reloaded = store.reload().unwrap();
    assert_eq!(reloaded.groups.len(), 5);
    assert!(Arc::ptr_eq(&reloaded, &store.current()));
    // Readers holding the old snapshot still see it.
    assert_eq!(before.groups.len(), 3);
}

#[test]
fn reload_of_unchanged_source_is_equal() {
    let store = ConfigStore::open(ConfigSource::Inline(GOOD.to_owned())).unwrap();
    let before = store.current();
    let after = store.reload().unwrap();
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(*before, *after);
}

#[test]
fn reload_with_text_validates_first() {
    let store = ConfigStore::open(ConfigSource::Inline(GOOD.to_owned())).unwrap();
    let before = store.current();
    assert!(store.reload_with(COLLIDING).is_err());
    assert!(Arc::ptr_eq(&before, &store.current()));
    assert!(store.reload_with("groups = \"1\"").is_ok());
    assert_eq!(store.current().groups.len(), 1);
}

#[test]
fn missing_file_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigStore::open(ConfigSource::File(dir.path().join("gone.toml"))).err();
    assert!(matches!(err, Some(LoadError::Io { .. })));
}

#[test]
fn startup_hook_fires_once() {
    let dir = tempfile::tempdir().unwrap();
    let script = dir.path().join("autostart.sh");
    let src = format!("autostart = {:?}\n", script.display().to_string());
    let store = ConfigStore::open(ConfigSource::Inline(src)).unwrap();

    assert!(store.fire_startup_once());
    assert!(!store.fire_startup_once());
    // A reload does not re-arm the hook.
    store.reload().unwrap();
    assert!(!store.fire_startup_once());
}
