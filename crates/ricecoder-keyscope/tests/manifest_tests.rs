//! Manifest loading from disk and binding into live scopes

mod common;

use std::cell::Cell;
use std::fs;
use std::rc::Rc;

use common::ctrl_event;
use ricecoder_keyscope::{
    create_key_command_scope, ActionTable, ConfigError, Element, Key, KeyCommand, ManifestLoader,
    ScopeContext, ScopeError,
};
use tempfile::TempDir;

const EDITOR_JSON: &str = r#"{
  "debug_label": "editor",
  "element": "section",
  "bindings": [
    { "action": "editor.save", "key": "Ctrl+S" },
    { "action": "editor.close", "key": "Escape" }
  ]
}"#;

#[test]
fn test_load_json_manifest_and_register() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("editor.json");
    fs::write(&path, EDITOR_JSON).unwrap();

    let manifest = ManifestLoader::new().load_file(&path).unwrap();
    assert_eq!(manifest.props().element, Some(Element::Section));

    let saved = Rc::new(Cell::new(false));
    let flag = saved.clone();
    let mut actions = ActionTable::new();
    actions.register("editor.save", move |_| flag.set(true));
    actions.register("editor.close", |_| {});

    let configs = manifest.resolve(&actions).unwrap();
    assert_eq!(configs.len(), 2);

    let editor = create_key_command_scope();
    let provider = editor.provider(manifest.props(), &ScopeContext::root());
    let _cmds = editor.use_key_commands(provider.context(), configs).unwrap();

    assert_eq!(provider.debug_label(), "editor");
    assert_eq!(provider.element(), Element::Section);
    assert!(provider.scope().contains(&KeyCommand::bare(Key::Escape)));

    provider
        .scope()
        .get(&KeyCommand::ctrl(Key::char('s')))
        .unwrap()
        .invoke(&ctrl_event('s'));
    assert!(saved.get());
}

#[test]
fn test_load_yaml_manifest_by_extension() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("palette.yaml");
    fs::write(
        &path,
        "debug_label: palette\nbindings:\n  - action: palette.next\n    key: Down\n",
    )
    .unwrap();

    let manifest = ManifestLoader::new().load_file(&path).unwrap();
    assert_eq!(manifest.element, None);
    assert_eq!(manifest.props().debug_label, "palette");
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let err = ManifestLoader::new()
        .load_file(temp_dir.path().join("absent.json"))
        .unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_invalid_json_is_reported() {
    let err = ManifestLoader::new().parse("{ not json", "json").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidJson(_)));
}

#[test]
fn test_bad_key_in_manifest_is_parse_error() {
    let manifest = ManifestLoader::new()
        .parse(
            r#"{"debug_label": "x", "bindings": [{"action": "a", "key": "Ctrl+Shift+Q"}]}"#,
            "json",
        )
        .unwrap();

    let mut actions = ActionTable::new();
    actions.register("a", |_| {});
    let err = manifest.resolve(&actions).unwrap_err();
    assert!(matches!(err, ScopeError::Parse(_)));
}

#[test]
fn test_duplicate_keys_in_manifest_conflict_on_register() {
    let manifest = ManifestLoader::new()
        .parse(
            r#"{"debug_label": "x", "bindings": [
                {"action": "a", "key": "Ctrl+S"},
                {"action": "b", "key": "control+s"}
            ]}"#,
            "json",
        )
        .unwrap();

    let mut actions = ActionTable::new();
    actions.register("a", |_| {});
    actions.register("b", |_| {});
    let configs = manifest.resolve(&actions).unwrap();

    let scope = create_key_command_scope();
    let provider = scope.provider(manifest.props(), &ScopeContext::root());
    let err = scope
        .use_key_commands(provider.context(), configs)
        .unwrap_err();
    assert!(matches!(err, ScopeError::Conflict { .. }));
}
