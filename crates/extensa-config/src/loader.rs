//! Configuration loader.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::KernelConfig;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<KernelConfig, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<KernelConfig, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: KernelConfig = toml::from_str(&expanded)?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn validate(config: &KernelConfig) -> Result<(), ConfigError> {
        if config.loader.directory.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "loader.directory".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        if let Some(blank) = config.loader.search_paths.iter().position(|p| p.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("loader.search_paths[{}]", blank),
                message: "must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.extensa`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}
