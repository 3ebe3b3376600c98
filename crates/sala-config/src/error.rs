//! Error types for preset and configuration operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, saving or validating presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        /// Path of the directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No file or factory preset with this name
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// A preset name that can't be used as a file name
    #[error("invalid preset name '{0}': use a plain name without path separators")]
    InvalidPresetName(String),

    /// A preset value lies outside its parameter's range
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// String id of the parameter.
        param: &'static str,
        /// The offending value.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },
}

impl ConfigError {
    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::WriteFile {
            path: path.into(),
            source,
        }
    }

    /// Create a create directory error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::CreateDir {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    fn mock_io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "mock")
    }

    #[test]
    fn constructors_produce_matching_variants() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(
            matches!(err, ConfigError::ReadFile { ref path, .. } if path == std::path::Path::new("/some/path"))
        );
        let err = ConfigError::write_file("/out/path", mock_io_err());
        assert!(matches!(err, ConfigError::WriteFile { .. }));
        let err = ConfigError::create_dir("/dir/path", mock_io_err());
        assert!(matches!(err, ConfigError::CreateDir { .. }));
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = ConfigError::read_file("/some/path", mock_io_err());
        assert!(err.source().is_some());
        assert!(err.to_string().contains("/some/path"));
    }

    #[test]
    fn out_of_range_message() {
        let err = ConfigError::OutOfRange {
            param: "size",
            value: 1.5,
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "parameter 'size' value 1.5 out of range [0, 1]"
        );
        assert!(err.source().is_none());
    }
}
