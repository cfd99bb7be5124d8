//! Path management for PupilTools
//!
//! ## Path Resolution Order
//!
//! 1. `PUPIL_TOOLS_DIR` environment variable (if set)
//! 2. The platform config directory (`$XDG_CONFIG_HOME`, `~/Library/Application Support`,
//!    `%APPDATA%`) joined with `pupil-tools`

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::PupilError;

/// Environment variable overriding the base directory
pub const DIR_ENV_VAR: &str = "PUPIL_TOOLS_DIR";

/// Manages all paths used by PupilTools
#[derive(Debug, Clone)]
pub struct PupilPaths {
    base_dir: PathBuf,
}

impl PupilPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, PupilError> {
        let base_dir = match std::env::var(DIR_ENV_VAR) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create PupilPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), PupilError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| PupilError::Io(format!("Failed to create config directory: {}", e)))
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, PupilError> {
    let dirs = BaseDirs::new()
        .ok_or_else(|| PupilError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("pupil-tools"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PupilPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("pupil");
        let paths = PupilPaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();
        assert!(nested.exists());
    }
}
