//! Platform-specific preset locations.
//!
//! - **User presets**: `~/.config/sala/presets/` (Linux),
//!   `~/Library/Application Support/sala/presets/` (macOS),
//!   `%APPDATA%\sala\presets\` (Windows)
//! - **System presets**: `/usr/share/sala/presets/` (Linux),
//!   `/Library/Application Support/sala/presets/` (macOS)

use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Application name used for directory paths.
const APP_NAME: &str = "sala";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// The user's preset directory. Falls back to `./sala/presets` when the
/// platform config directory is unknown.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// The read-only, system-wide preset directory.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support")
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Find a preset file by path or name.
///
/// An existing file path wins; otherwise `name` (with `.toml` appended if
/// missing) is looked up in the user directory, then the system directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &[user_presets_dir(), system_presets_dir()])
}

/// [`find_preset`] over an explicit list of directories.
pub fn find_preset_in(name: &str, search_dirs: &[PathBuf]) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };

    search_dirs
        .iter()
        .map(|dir| dir.join(&filename))
        .find(|candidate| candidate.is_file())
}

/// The file a user preset called `name` is stored in.
///
/// `name` must be a plain file stem: not empty, no path separators, no
/// leading dot.
pub fn user_preset_path(name: &str) -> Result<PathBuf, ConfigError> {
    preset_path_in(&user_presets_dir(), name)
}

/// [`user_preset_path`] under an explicit directory.
pub fn preset_path_in(dir: &Path, name: &str) -> Result<PathBuf, ConfigError> {
    let stem = name.strip_suffix(".toml").unwrap_or(name);
    let valid = !stem.is_empty()
        && !stem.starts_with('.')
        && !stem.contains(['/', '\\', ':', '\0']);
    if !valid {
        return Err(ConfigError::InvalidPresetName(name.to_string()));
    }
    Ok(dir.join(format!("{stem}.toml")))
}

/// Create the user preset directory if needed and return it.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// `.toml` files in the user preset directory.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// `.toml` files in `dir`, sorted. Missing or unreadable directories yield nothing.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// The preset name of a file: its stem.
///
/// ```rust
/// use sala_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// assert_eq!(
///     preset_name_from_path(Path::new("/presets/big_hall.toml")),
///     Some("big_hall".to_string())
/// );
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
}
