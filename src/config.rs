//! Input configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Key registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// First key index handed out to derived keys and key families
    ///
    /// Indices that are registered natural keys, `0`, negative, or one of
    /// the standard key groups (1000..=1005) are skipped.
    pub derived_index_start: i32,
    /// Initial capacity of the key table
    pub key_capacity: usize,
    /// Whether to register the standard keyboard and mouse key map
    pub register_default_keys: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            derived_index_start: 10000,
            key_capacity: 512,
            register_default_keys: true,
        }
    }
}

/// Pointer side channel configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    /// Whether mouse samples are reported to pointer listeners
    pub dispatch_pointer_events: bool,
}

impl Default for MouseConfig {
    fn default() -> Self {
        Self {
            dispatch_pointer_events: true,
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Key registry configuration
    pub registry: RegistryConfig,
    /// Pointer configuration
    pub mouse: MouseConfig,
}

impl InputConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Sources are layered in the following order:
    /// 1. In-code defaults
    /// 2. config/{profile}.toml (optional)
    /// 3. Environment variables with prefix GIN_ (e.g., GIN_REGISTRY__DERIVED_INDEX_START=20000)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        Self::load_from_dir("config", profile)
    }

    /// Like [`InputConfig::load`], reading profile files from `dir`
    pub fn load_from_dir(dir: impl AsRef<std::path::Path>, profile: &str) -> Result<Self, ConfigError> {
        let path = dir.as_ref().join(profile);
        let config = Config::builder()
            .add_source(File::with_name(&path.to_string_lossy()).required(false))
            // Use __ as separator for nested fields (e.g., GIN_MOUSE__DISPATCH_POINTER_EVENTS)
            .add_source(
                Environment::with_prefix("GIN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("profile", profile)?
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration using the GIN_PROFILE environment variable,
    /// defaulting to "debug" if not set
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("GIN_PROFILE").unwrap_or_else(|_| "debug".to_string());
        Self::load(&profile)
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            profile: "debug".to_string(),
            registry: RegistryConfig::default(),
            mouse: MouseConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InputConfig::default();
        assert_eq!(config.profile, "debug");
        assert_eq!(config.registry.derived_index_start, 10000);
        assert_eq!(config.registry.key_capacity, 512);
        assert!(config.registry.register_default_keys);
        assert!(config.mouse.dispatch_pointer_events);
    }
}
