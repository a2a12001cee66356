use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{PassVaultError, Result};
use crate::generator::GeneratorOptions;
use crate::vault::schema::DB_FILE_NAME;

/// Project-level configuration, loaded from `.passvault.toml`.
///
/// Every field has a sensible default so PassVault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// User id to act as when neither `--user` nor `PASSVAULT_USER` is set.
    #[serde(default)]
    pub default_user: Option<String>,

    /// Directory (relative to the working directory) holding the database.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Defaults for `passvault generate` and `add --generate`.
    #[serde(default)]
    pub generator: GeneratorOptions,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_data_dir() -> String {
    ".passvault".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_user: None,
            data_dir: default_data_dir(),
            generator: GeneratorOptions::default(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".passvault.toml";

    /// Load settings from `<project_dir>/.passvault.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PassVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        tracing::debug!(path = %config_path.display(), "loaded settings");
        Ok(settings)
    }

    /// Build the full path to the database file.
    ///
    /// Example: `project_dir/.passvault/passvault.db`
    pub fn db_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.data_dir).join(DB_FILE_NAME)
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert!(s.default_user.is_none());
        assert_eq!(s.data_dir, ".passvault");
        assert_eq!(s.generator.length, 16);
        assert!(s.generator.exclude_similar);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.data_dir, ".passvault");
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
default_user = "alice"
data_dir = "secrets"

[generator]
length = 24
include_symbols = false
exclude_similar = false
"#;
        fs::write(tmp.path().join(".passvault.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.default_user.as_deref(), Some("alice"));
        assert_eq!(settings.data_dir, "secrets");
        assert_eq!(settings.generator.length, 24);
        assert!(!settings.generator.include_symbols);
        assert!(!settings.generator.exclude_similar);
        // Unlisted generator fields keep their defaults.
        assert!(settings.generator.include_uppercase);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "default_user = \"bob\"\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.default_user.as_deref(), Some("bob"));
        assert_eq!(settings.data_dir, ".passvault");
        assert_eq!(settings.generator, GeneratorOptions::default());
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".passvault.toml"), "not valid {{toml").unwrap();

        let result = Settings::load(tmp.path());
        assert!(matches!(result, Err(PassVaultError::ConfigError(_))));
    }

    #[test]
    fn oversized_generator_length_is_rejected_on_generate() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(".passvault.toml"),
            "[generator]\nlength = 9223372036854775807\n",
        )
        .unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        let result = crate::generator::generate(&settings.generator);
        assert!(matches!(result, Err(PassVaultError::InvalidConfiguration(_))));
    }

    #[test]
    fn db_path_respects_custom_data_dir() {
        let s = Settings {
            data_dir: "secrets".to_string(),
            ..Settings::default()
        };
        let path = s.db_path(Path::new("/home/user/project"));
        assert_eq!(path, PathBuf::from("/home/user/project/secrets/passvault.db"));
    }
}
