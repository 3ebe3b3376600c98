//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use sala_reverb::{ReverbParams, ReverbSettings};

use crate::error::ConfigError;

/// Control values stored in a preset.
///
/// Missing keys take the same defaults as a freshly created plugin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PresetParams {
    /// Room size, 0–1.
    pub size: f32,
    /// Damping, 0–1.
    pub damp: f32,
    /// Stereo width, 0–1.
    pub width: f32,
    /// Wet/dry mix, 0–1.
    pub mix: f32,
    /// Freeze toggle.
    pub freeze: bool,
}

impl Default for PresetParams {
    fn default() -> Self {
        ReverbSettings::default().into()
    }
}

impl From<ReverbSettings> for PresetParams {
    fn from(s: ReverbSettings) -> Self {
        Self {
            size: s.size,
            damp: s.damp,
            width: s.width,
            mix: s.mix,
            freeze: s.freeze,
        }
    }
}

impl From<PresetParams> for ReverbSettings {
    fn from(p: PresetParams) -> Self {
        Self {
            size: p.size,
            damp: p.damp,
            width: p.width,
            mix: p.mix,
            freeze: p.freeze,
        }
    }
}

/// A named set of reverb settings.
///
/// # TOML Format
///
/// ```toml
/// name = "Large Hall"
/// description = "Long, wide tail"
///
/// [params]
/// size = 0.9
/// damp = 0.3
/// width = 1.0
/// mix = 0.35
/// freeze = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Control values.
    #[serde(default)]
    pub params: PresetParams,
}

impl Preset {
    /// Create a preset with default controls.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: PresetParams::default(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the control values.
    pub fn with_params(mut self, params: PresetParams) -> Self {
        self.params = params;
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every float control is finite and inside 0–1.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let params = ReverbParams::default();
        let values = [
            ("size", self.params.size),
            ("damp", self.params.damp),
            ("width", self.params.width),
            ("mix", self.params.mix),
        ];
        for (name, value) in values {
            let Some(desc) = params
                .index_by_name(name)
                .and_then(|index| params.descriptor(index))
            else {
                continue;
            };
            if !value.is_finite() || value < desc.min || value > desc.max {
                return Err(ConfigError::OutOfRange {
                    param: desc.string_id,
                    value,
                    min: desc.min,
                    max: desc.max,
                });
            }
        }
        Ok(())
    }

    /// Write this preset's controls into a live store. Values are clamped.
    pub fn apply_to(&self, params: &ReverbParams) {
        params.apply(&self.params.into());
    }

    /// Capture a live store as a preset.
    pub fn capture(name: impl Into<String>, params: &ReverbParams) -> Self {
        Self::new(name).with_params(params.snapshot().into())
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
