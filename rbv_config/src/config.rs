use crate::animation::{AnimationSettings, MAX_TRANSITION_MILLIS};
use crate::error::{ConfigError, ConfigResult};
use crate::layout::{LayoutSettings, MAX_LAYOUT_VALUE};
use crate::theme::ThemeSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure for the rbv visualizer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Node placement
    pub layout: LayoutSettings,
    /// Animation timing
    pub animation: AnimationSettings,
    /// Colors
    pub theme: ThemeSettings,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration from TOML string
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> ConfigResult<()> {
        let toml_content = self.to_toml_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml_content)?;
        Ok(())
    }

    /// Export configuration as TOML string
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Get configuration file search paths
    pub fn config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // User-specific config
        if let Some(home) = std::env::var_os("HOME") {
            paths.push(PathBuf::from(&home).join(".config").join("rbv").join("config.toml"));
            paths.push(PathBuf::from(&home).join(".rbv.toml"));
        }

        // Current directory
        if let Ok(current_dir) = std::env::current_dir() {
            paths.push(current_dir.join("rbv.toml"));
        }

        paths
    }

    /// Load configuration with automatic path discovery
    pub fn load() -> ConfigResult<Self> {
        Self::load_with_paths(&Self::config_paths())
    }

    /// Load configuration with custom search paths
    pub fn load_with_paths(paths: &[PathBuf]) -> ConfigResult<Self> {
        for path in paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        // Return default configuration if no config file found
        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Create a new configuration file with default settings
    pub fn create_default_config(path: &Path) -> ConfigResult<()> {
        Self::default().save_to_file(path)
    }

    /// Validate the configuration
    pub fn validate(&self) -> ConfigResult<()> {
        for (name, value) in self.layout.positive_fields() {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Validation(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
            if value > MAX_LAYOUT_VALUE {
                return Err(ConfigError::Validation(format!(
                    "{name} must be at most {MAX_LAYOUT_VALUE}, got {value}"
                )));
            }
        }

        if self.animation.frame_millis == 0 {
            return Err(ConfigError::Validation(
                "animation.frame_millis must be greater than 0".to_string(),
            ));
        }
        for (name, value) in [
            ("animation.move_millis", self.animation.move_millis),
            ("animation.color_millis", self.animation.color_millis),
        ] {
            if value > MAX_TRANSITION_MILLIS {
                return Err(ConfigError::Validation(format!(
                    "{name} must be at most {MAX_TRANSITION_MILLIS}, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Configuration builder for creating custom configurations
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut LayoutSettings),
    {
        f(&mut self.config.layout);
        self
    }

    pub fn animation<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut AnimationSettings),
    {
        f(&mut self.config.animation);
        self
    }

    pub fn theme<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut ThemeSettings),
    {
        f(&mut self.config.theme);
        self
    }

    /// Finish, validating the result
    pub fn build(self) -> ConfigResult<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
