//! Integration tests for sala-config.

use sala_config::{ConfigError, Preset, PresetParams, factory_presets, resolve_preset};
use sala_core::{AudioBlock, Effect, ProcessSpec};
use sala_reverb::{ReverbBridge, ReverbParams};
use tempfile::TempDir;

#[test]
fn test_preset_save_load_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("my_room.toml");

    let preset = Preset::new("My Room")
        .with_description("saved from a session")
        .with_params(PresetParams {
            size: 0.33,
            damp: 0.66,
            width: 0.1,
            mix: 0.9,
            freeze: false,
        });
    preset.save(&path).unwrap();

    let loaded = Preset::load(&path).unwrap();
    assert_eq!(loaded, preset);
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let err = Preset::load(temp_dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::ReadFile { .. }));
}

#[test]
fn test_resolve_preset_from_file_and_factory() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("custom.toml");
    Preset::new("Custom").save(&path).unwrap();

    let from_file = resolve_preset(path.to_str().unwrap()).unwrap();
    assert_eq!(from_file.name, "Custom");

    let factory = resolve_preset("large_hall").unwrap();
    assert_eq!(factory.name, "Large Hall");

    assert!(matches!(
        resolve_preset("no_such_preset_anywhere"),
        Err(ConfigError::PresetNotFound(_))
    ));
}

#[test]
fn test_resolve_rejects_out_of_range_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hot.toml");
    std::fs::write(&path, "name = \"Hot\"\n[params]\nmix = 2.0\n").unwrap();
    assert!(matches!(
        resolve_preset(path.to_str().unwrap()),
        Err(ConfigError::OutOfRange { param: "mix", .. })
    ));
}

#[test]
fn test_factory_presets_drive_the_bridge() {
    for preset in factory_presets() {
        let params = ReverbParams::default();
        preset.apply_to(&params);

        let mut bridge = ReverbBridge::new(&params);
        bridge.prepare(&ProcessSpec::new(48000.0, 256, 2));

        let mut left: Vec<f32> = (0..256).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
        let mut right = left.clone();
        let mut channels: [&mut [f32]; 2] = [&mut left, &mut right];
        bridge.process(&mut AudioBlock::new(&mut channels));

        assert!(
            left.iter().chain(&right).all(|s| s.is_finite()),
            "preset '{}' produced non-finite output",
            preset.name
        );
        assert_eq!(bridge.parameters().is_frozen(), preset.params.freeze);
    }
}
