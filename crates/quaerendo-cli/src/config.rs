//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the per-user configuration directory under `$HOME`
const CONFIG_DIR: &str = ".quaerendo";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Where this configuration was loaded from
    #[serde(skip)]
    path: Option<PathBuf>,
}

/// Connection profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Base URL of the Quaerendo API
    pub api_url: String,

    /// Token storage file; defaults to `~/.quaerendo/storage.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Request timeout in seconds; 0 means the client default
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text and tables
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the configuration and token storage.
    pub fn dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(CONFIG_DIR))
    }

    /// Default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::dir()?.join("config.toml"))
    }

    /// Load configuration from the default location or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path()?)
    }

    /// Load configuration from `path`, or a default bound to `path` if it does not exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut config = if path.exists() {
            let contents = fs::read_to_string(path)?;
            toml::from_str::<Config>(&contents)?
        } else {
            Self::default()
        };

        config.path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => Self::default_path()?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Token storage file for `profile`.
    ///
    /// Relative paths are resolved against the configuration directory.
    pub fn storage_path(&self, profile: &Profile) -> Result<PathBuf> {
        let base = match self.path.as_ref().and_then(|p| p.parent()) {
            Some(dir) => dir.to_path_buf(),
            None => Self::dir()?,
        };

        Ok(match &profile.storage_path {
            Some(custom) if Path::new(custom).is_absolute() => PathBuf::from(custom),
            Some(custom) => base.join(custom),
            None => base.join("storage.json"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert(
            "default".to_string(),
            Profile {
                api_url: "http://localhost:8000".to_string(),
                storage_path: None,
            },
        );

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            path: None,
        }
    }
}

impl Settings {
    /// Transport timeout for API requests
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => quaerendo_sdk::DEFAULT_TIMEOUT,
            secs => Duration::from_secs(secs),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert!(config.profiles.contains_key("default"));
        assert!(config.settings.color);
        assert_eq!(config.settings.timeout_secs, 30);
    }

    #[test]
    fn test_zero_timeout_uses_client_default() {
        let mut settings = Settings::default();
        assert_eq!(settings.timeout(), Duration::from_secs(30));

        settings.timeout_secs = 5;
        assert_eq!(settings.timeout(), Duration::from_secs(5));

        settings.timeout_secs = 0;
        assert_eq!(settings.timeout(), quaerendo_sdk::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            api_url: "https://quaerendo.example.org".to_string(),
            storage_path: Some("staging.json".to_string()),
        };

        config.set_profile("staging".to_string(), profile);
        assert!(config.profiles.contains_key("staging"));

        config.switch_profile("staging".to_string()).unwrap();
        assert_eq!(config.active_profile, "staging");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::load_from(&path).unwrap();
        config.settings.color = false;
        config.save().unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert!(!reloaded.settings.color);
        assert_eq!(reloaded.active_profile, "default");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
            active_profile = "prod"

            [profiles.prod]
            api_url = "https://quaerendo.example.org"

            [settings]
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.get_active_profile().unwrap().api_url, "https://quaerendo.example.org");
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert!(config.settings.color);
    }

    #[test]
    fn test_storage_path_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(dir.path().join("config.toml")).unwrap();

        let default = config.get_active_profile().unwrap().clone();
        assert_eq!(config.storage_path(&default).unwrap(), dir.path().join("storage.json"));

        let relative = Profile {
            api_url: default.api_url.clone(),
            storage_path: Some("other.json".to_string()),
        };
        assert_eq!(config.storage_path(&relative).unwrap(), dir.path().join("other.json"));
    }
}
