//! Preset management for the sala reverb.
//!
//! - **Presets**: named reverb settings stored as TOML
//! - **Factory presets**: built in, always available
//! - **Paths**: platform-specific preset directories
//!
//! # Example
//!
//! ```rust,no_run
//! use sala_config::{Preset, PresetParams, user_presets_dir};
//! use sala_reverb::ReverbParams;
//!
//! let preset = Preset::new("Wide Room").with_params(PresetParams {
//!     size: 0.6,
//!     width: 1.0,
//!     ..Default::default()
//! });
//! preset.save(user_presets_dir().join("wide_room.toml")).unwrap();
//!
//! let params = ReverbParams::default();
//! Preset::load(user_presets_dir().join("wide_room.toml"))
//!     .unwrap()
//!     .apply_to(&params);
//! ```

mod error;
mod preset;

/// Platform-specific preset locations.
pub mod paths;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    factory_preset_names, factory_presets, get_factory_preset, is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    system_presets_dir, user_preset_path, user_presets_dir,
};
pub use preset::{Preset, PresetParams};

use tracing::debug;

/// Resolve a preset given on a command line or in a session.
///
/// Tries, in order: a file path or user/system preset name (see
/// [`find_preset`]), then a factory preset. The result is validated.
pub fn resolve_preset(name: &str) -> Result<Preset, ConfigError> {
    let preset = if let Some(path) = find_preset(name) {
        debug!(path = %path.display(), "loading preset file");
        Preset::load(&path)?
    } else if let Some(preset) = get_factory_preset(name) {
        debug!(name, "using factory preset");
        preset
    } else {
        return Err(ConfigError::PresetNotFound(name.to_string()));
    };
    preset.validate()?;
    Ok(preset)
}
