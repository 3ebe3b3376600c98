//! Factory presets bundled with the library.
//!
//! Embedded at compile time, so they are available without any files on disk.

use crate::Preset;

/// TOML content for factory presets, keyed by internal name.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("default", DEFAULT_PRESET),
    ("small_room", SMALL_ROOM_PRESET),
    ("large_hall", LARGE_HALL_PRESET),
    ("dark_plate", DARK_PLATE_PRESET),
    ("frozen_pad", FROZEN_PAD_PRESET),
];

const DEFAULT_PRESET: &str = r#"
name = "Default"
description = "The plugin's initial settings"

[params]
size = 0.5
damp = 0.5
width = 0.5
mix = 0.5
freeze = false
"#;

const SMALL_ROOM_PRESET: &str = r#"
name = "Small Room"
description = "Short, close ambience for drums and voice"

[params]
size = 0.25
damp = 0.6
width = 0.6
mix = 0.2
freeze = false
"#;

const LARGE_HALL_PRESET: &str = r#"
name = "Large Hall"
description = "Long, wide tail with a bright top"

[params]
size = 0.9
damp = 0.3
width = 1.0
mix = 0.35
freeze = false
"#;

const DARK_PLATE_PRESET: &str = r#"
name = "Dark Plate"
description = "Dense, heavily damped tail"

[params]
size = 0.7
damp = 0.85
width = 0.8
mix = 0.3
freeze = false
"#;

const FROZEN_PAD_PRESET: &str = r#"
name = "Frozen Pad"
description = "Holds the current tail indefinitely"

[params]
size = 1.0
damp = 0.0
width = 1.0
mix = 0.6
freeze = true
"#;

/// All factory presets, in display order.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Get a factory preset by internal or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use sala_config::get_factory_preset;
///
/// let hall = get_factory_preset("large_hall").unwrap();
/// assert_eq!(hall.name, "Large Hall");
/// assert_eq!(get_factory_preset("Large Hall"), Some(hall));
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Whether `name` refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_presets_load() {
        let presets = factory_presets();
        assert_eq!(presets.len(), FACTORY_PRESETS_TOML.len());

        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"Default"));
        assert!(names.contains(&"Large Hall"));
        assert!(names.contains(&"Frozen Pad"));
    }

    #[test]
    fn test_all_factory_presets_valid() {
        for (name, toml) in FACTORY_PRESETS_TOML {
            let preset = Preset::from_toml(toml)
                .unwrap_or_else(|e| panic!("factory preset '{name}' should parse: {e}"));
            assert!(!preset.name.is_empty(), "preset '{name}' should have a name");
            assert!(
                preset.description.is_some(),
                "preset '{name}' should have a description"
            );
            assert!(preset.validate().is_ok(), "preset '{name}' out of range");
        }
    }

    #[test]
    fn test_default_matches_fresh_plugin() {
        let preset = get_factory_preset("default").unwrap();
        assert_eq!(preset, Preset::new("Default").with_description("The plugin's initial settings"));
    }

    #[test]
    fn test_lookup() {
        assert!(get_factory_preset("SMALL_ROOM").is_some());
        assert!(get_factory_preset("dark plate").is_some());
        assert!(get_factory_preset("cathedral").is_none());
        assert!(is_factory_preset("frozen_pad"));
        assert!(get_factory_preset("frozen_pad").unwrap().params.freeze);
        assert_eq!(
            factory_preset_names(),
            ["default", "small_room", "large_hall", "dark_plate", "frozen_pad"]
        );
    }
}
