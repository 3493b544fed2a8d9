//! Generation settings.
//!
//! [`Settings`] starts from built-in defaults and is optionally overridden
//! by a `ningen.toml` file next to the build description. Missing keys keep
//! their defaults.
//!
//! ```toml
//! output = "out/build.ninja"
//! script = "build.sh"
//! enable_generator_rule = true
//! unique_outputs = true
//! ```

use std::path::{Path, PathBuf};

use ningen_core::error::{NingenError, NingenResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name of the optional settings file.
pub const SETTINGS_FILE: &str = "ningen.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Manifest path, relative to the root directory.
    pub output: PathBuf,
    /// Build description executable the generator rule re-runs.
    pub script: PathBuf,
    /// Emit a rule and target that regenerate the manifest.
    pub enable_generator_rule: bool,
    /// Reject two targets claiming the same output file.
    pub unique_outputs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            output: PathBuf::from("build.ninja"),
            script: PathBuf::from("BUILD"),
            enable_generator_rule: true,
            unique_outputs: true,
        }
    }
}

impl Settings {
    /// Load `ningen.toml` from `dir`, or the defaults when there is none.
    pub fn load(dir: &Path) -> NingenResult<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.is_file() {
            debug!(path = %path.display(), "No settings file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|e| NingenError::Configuration {
            message: format!("cannot read {}: {e}", path.display()),
        })?;
        let settings = Self::from_toml(&text).map_err(|e| NingenError::Configuration {
            message: format!("{}: {e}", path.display()),
        })?;

        debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.output, PathBuf::from("build.ninja"));
        assert_eq!(settings.script, PathBuf::from("BUILD"));
        assert!(settings.enable_generator_rule);
        assert!(settings.unique_outputs);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let settings = Settings::from_toml("output = \"out/build.ninja\"\n").unwrap();
        assert_eq!(settings.output, PathBuf::from("out/build.ninja"));
        assert_eq!(settings.script, PathBuf::from("BUILD"));
    }

    #[test]
    fn load_without_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Settings::load(dir.path()).unwrap(), Settings::default());
    }

    #[test]
    fn load_reads_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "enable_generator_rule = false\nunique_outputs = false\n",
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert!(!settings.enable_generator_rule);
        assert!(!settings.unique_outputs);
    }

    #[test]
    fn malformed_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILE), "output = [").unwrap();

        let err = Settings::load(dir.path()).unwrap_err();
        match err {
            NingenError::Configuration { message } => assert!(message.contains(SETTINGS_FILE)),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
