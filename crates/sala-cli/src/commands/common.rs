//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use sala_config::{ConfigError, Preset, resolve_preset};
use sala_reverb::{FloatParam, ReverbParams, ReverbSettings};

/// Per-parameter overrides, applied on top of a preset.
#[derive(Args, Debug, Default, Clone)]
pub struct ParamOverrides {
    /// Room size, 0 to 1
    #[arg(long, value_name = "0..1")]
    pub size: Option<f32>,

    /// High-frequency damping, 0 to 1
    #[arg(long, value_name = "0..1")]
    pub damp: Option<f32>,

    /// Stereo width, 0 to 1
    #[arg(long, value_name = "0..1")]
    pub width: Option<f32>,

    /// Wet/dry mix, 0 (dry) to 1 (wet)
    #[arg(long, value_name = "0..1")]
    pub mix: Option<f32>,

    /// Hold the current tail indefinitely
    #[arg(long)]
    pub freeze: bool,
}

impl ParamOverrides {
    /// Write every given override into `params`. Out-of-range values are an error.
    pub fn apply(&self, params: &ReverbParams) -> anyhow::Result<()> {
        let floats = [
            (&params.size, self.size),
            (&params.damp, self.damp),
            (&params.width, self.width),
            (&params.mix, self.mix),
        ];
        for (param, value) in floats {
            if let Some(value) = value {
                set_checked(param, value)?;
            }
        }
        if self.freeze {
            params.freeze.set(true);
        }
        Ok(())
    }
}

fn set_checked(param: &FloatParam, value: f32) -> anyhow::Result<()> {
    let descriptor = param.descriptor();
    if !(descriptor.min..=descriptor.max).contains(&value) {
        anyhow::bail!(
            "--{} must be between {} and {}, got {}",
            descriptor.string_id,
            descriptor.min,
            descriptor.max,
            value
        );
    }
    param.set(value);
    Ok(())
}

/// Load a preset by name or path, with a hint when nothing matches.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    match resolve_preset(name) {
        Err(ConfigError::PresetNotFound(_)) => anyhow::bail!(
            "Preset '{}' not found. Use 'sala presets list' to see available presets.",
            name
        ),
        other => other.with_context(|| format!("loading preset '{name}'")),
    }
}

/// One-line summary of a settings snapshot.
pub fn describe_settings(settings: &ReverbSettings) -> String {
    format!(
        "size {:.2}, damp {:.2}, width {:.2}, mix {:.2}, freeze {}",
        settings.size,
        settings.damp,
        settings.width,
        settings.mix,
        if settings.freeze { "on" } else { "off" }
    )
}
