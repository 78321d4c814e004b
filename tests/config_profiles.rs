use std::fs;

use gin_input::input::{DeviceId, KeyId, KeyIndex, keycodes};
use gin_input::{Input, InputConfig, InputError};
use tempfile::TempDir;

fn profile_dir(name: &str, contents: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join(format!("{name}.toml")), contents).expect("Failed to write profile");
    dir
}

#[test]
fn test_profile_file_overrides_defaults() {
    let dir = profile_dir(
        "tuned",
        r#"
[registry]
derived_index_start = 20000

[mouse]
dispatch_pointer_events = false
"#,
    );

    let config = InputConfig::load_from_dir(dir.path(), "tuned").expect("Failed to load profile");
    assert_eq!(config.profile, "tuned");
    assert_eq!(config.registry.derived_index_start, 20000);
    assert!(!config.mouse.dispatch_pointer_events);
    // Untouched fields keep their defaults
    assert_eq!(config.registry.key_capacity, 512);
    assert!(config.registry.register_default_keys);
}

#[test]
fn test_missing_profile_uses_defaults() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = InputConfig::load_from_dir(dir.path(), "absent").expect("Failed to load profile");
    assert_eq!(config.profile, "absent");
    assert_eq!(config.registry, InputConfig::default().registry);
    assert_eq!(config.mouse, InputConfig::default().mouse);
}

#[test]
fn test_malformed_profile_is_an_error() {
    let dir = profile_dir("broken", "[registry]\nkey_capacity = \"lots\"\n");
    assert!(InputConfig::load_from_dir(dir.path(), "broken").is_err());
}

#[test]
fn test_registry_follows_config() {
    let dir = profile_dir(
        "bare",
        r#"
[registry]
derived_index_start = 500
register_default_keys = false
"#,
    );
    let config = InputConfig::load_from_dir(dir.path(), "bare").expect("Failed to load profile");
    let mut input = Input::with_config(&config);

    let a = KeyId::new(keycodes::KEY_A, DeviceId::keyboard(1));
    assert!(matches!(
        input.try_get_key_by_id(a).map(|key| key.id()),
        Err(InputError::UnregisteredKey(_))
    ));

    let binding = input.make_binding(KeyId::ANY, &[], &[]);
    let derived = input.bind_derived_key("Anything", vec![binding]);
    assert_eq!(derived.index, KeyIndex(500));
}

#[test]
fn test_shipped_profiles_parse() {
    let root = env!("CARGO_MANIFEST_DIR");
    for profile in ["debug", "release"] {
        let config = InputConfig::load_from_dir(format!("{root}/config"), profile)
            .expect("Failed to load shipped profile");
        assert_eq!(config.profile, profile);
    }
}

#[test]
fn test_derived_start_inside_registered_range() {
    let dir = profile_dir("overlap", "[registry]\nderived_index_start = 97\n");
    let config = InputConfig::load_from_dir(dir.path(), "overlap").expect("Failed to load profile");
    let mut input = Input::with_config(&config);

    let jump = input.make_binding(KeyId::any_keyboard(keycodes::SPACE), &[], &[]);
    let family = input.bind_derived_key_family("Jump", jump);
    assert_ne!(family, keycodes::KEY_A);

    let a = KeyId::new(keycodes::KEY_A, DeviceId::keyboard(1));
    assert_eq!(input.get_key_by_id(a).name(), "Key A");
}
