//! Preset management commands.
//!
//! Lists, shows, saves and deletes reverb presets.

use super::common::{ParamOverrides, describe_settings, load_preset};
use clap::{Args, Subcommand};
use sala_config::{
    Preset, ensure_user_presets_dir, factory_presets, is_factory_preset, list_user_presets,
    preset_name_from_path, system_presets_dir, user_preset_path, user_presets_dir,
};
use sala_reverb::ReverbParams;
use tracing::info;

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show details of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a user preset from a base preset plus overrides
    Save {
        /// Name for the new preset
        name: String,

        /// Preset to start from (defaults to the plugin's initial settings)
        #[arg(long)]
        from: Option<String>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        #[command(flatten)]
        overrides: ParamOverrides,

        /// Overwrite if preset already exists
        #[arg(long)]
        force: bool,
    },

    /// Delete a user preset
    Delete {
        /// Preset name to delete
        name: String,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            from,
            description,
            overrides,
            force,
        } => save_preset(&name, from.as_deref(), description, &overrides, force),
        PresetsCommand::Delete { name } => delete_preset(&name),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Presets:");
        println!("================");
        for preset in factory_presets() {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", preset.name, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: sala presets save <name> --size 0.8\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".into());
                match Preset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:20} - {}", name, desc);
                    }
                    Err(_) => println!("  {:20} - (error loading)", name),
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();
    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    let params = ReverbParams::new();
    preset.apply_to(&params);
    for (index, descriptor) in params.descriptors().iter().enumerate() {
        let value = params.get_value(index).unwrap_or(descriptor.default);
        println!("  {:8} {}", descriptor.name, descriptor.format_value(value));
    }

    println!();
    println!("TOML:");
    print!("{}", preset.to_toml()?);
    Ok(())
}

fn save_preset(
    name: &str,
    from: Option<&str>,
    description: Option<String>,
    overrides: &ParamOverrides,
    force: bool,
) -> anyhow::Result<()> {
    if is_factory_preset(name) {
        anyhow::bail!("'{}' is a factory preset name; pick another name", name);
    }

    let path = user_preset_path(name)?;
    ensure_user_presets_dir()?;
    if path.exists() && !force {
        anyhow::bail!("Preset '{}' already exists. Use --force to overwrite.", name);
    }

    let params = ReverbParams::new();
    if let Some(base) = from {
        load_preset(base)?.apply_to(&params);
    }
    overrides.apply(&params)?;

    let mut preset = Preset::capture(name, &params);
    if let Some(desc) = description {
        preset = preset.with_description(desc);
    }
    preset.validate()?;
    preset.save(&path)?;

    info!(path = %path.display(), "saved preset");
    println!("Saved '{}': {}", name, describe_settings(&params.snapshot()));
    println!("  {}", path.display());
    Ok(())
}

fn delete_preset(name: &str) -> anyhow::Result<()> {
    let path = user_preset_path(name)?;
    if !path.is_file() {
        if is_factory_preset(name) {
            anyhow::bail!("Factory presets can't be deleted");
        }
        anyhow::bail!("User preset '{}' not found", name);
    }
    std::fs::remove_file(&path)?;
    println!("Deleted '{}'", name);
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());
    Ok(())
}
