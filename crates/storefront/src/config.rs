//! # Configuration
//!
//! Storefront settings loaded from TOML. Every section and key is optional:
//!
//! ```toml
//! [actors]
//! buffer_size = 32
//!
//! [pricing]
//! minor_units = 2
//!
//! [payment]
//! cod_enabled = true
//! online_enabled = false
//! ```

use crate::model::PaymentMethod;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable naming the config file used by the binary.
pub const CONFIG_ENV: &str = "STOREFRONT_CONFIG";

/// The largest scale a `Decimal` can carry.
const MAX_MINOR_UNITS: u32 = 28;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    Parse(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.message().to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    pub actors: ActorSettings,
    pub pricing: PricingSettings,
    pub payment: PaymentSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorSettings {
    /// Request queue depth of each actor.
    pub buffer_size: usize,
}

impl Default for ActorSettings {
    fn default() -> Self {
        Self { buffer_size: 32 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Fractional digits of the currency (2 for cents).
    pub minor_units: u32,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self { minor_units: 2 }
    }
}

/// Which payment methods checkout accepts.
///
/// Owned outside the core: the runtime publishes the current value on a watch
/// channel and admission reads it once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentSettings {
    pub cod_enabled: bool,
    pub online_enabled: bool,
}

impl Default for PaymentSettings {
    fn default() -> Self {
        Self {
            cod_enabled: true,
            online_enabled: true,
        }
    }
}

impl PaymentSettings {
    pub fn allows(&self, method: PaymentMethod) -> bool {
        match method {
            PaymentMethod::Cod => self.cod_enabled,
            PaymentMethod::Online => self.online_enabled,
        }
    }
}

impl StorefrontConfig {
    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        raw.parse()
    }

    /// Loads the file named by [`CONFIG_ENV`], or the defaults when it is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(path),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actors.buffer_size == 0 {
            return Err(ConfigError::Validation(
                "actors.buffer_size must be greater than zero".into(),
            ));
        }
        if self.pricing.minor_units > MAX_MINOR_UNITS {
            return Err(ConfigError::Validation(format!(
                "pricing.minor_units must be at most {}",
                MAX_MINOR_UNITS
            )));
        }
        if !self.payment.cod_enabled && !self.payment.online_enabled {
            return Err(ConfigError::Validation(
                "at least one payment method must be enabled".into(),
            ));
        }
        Ok(())
    }
}

impl FromStr for StorefrontConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: StorefrontConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn empty_document_yields_defaults() {
        let config: StorefrontConfig = "".parse().unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.actors.buffer_size, 32);
        assert_eq!(config.pricing.minor_units, 2);
        assert!(config.payment.allows(PaymentMethod::Cod));
        assert!(config.payment.allows(PaymentMethod::Online));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: StorefrontConfig = r#"
            [payment]
            online_enabled = false
        "#
        .parse()
        .unwrap();
        assert!(config.payment.cod_enabled);
        assert!(!config.payment.allows(PaymentMethod::Online));
        assert_eq!(config.actors.buffer_size, 32);
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[actors]\nbuffer_size = 8\n\n[pricing]\nminor_units = 0").unwrap();

        let config = StorefrontConfig::load(file.path()).unwrap();
        assert_eq!(config.actors.buffer_size, 8);
        assert_eq!(config.pricing.minor_units, 0);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StorefrontConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn rejects_invalid_values() {
        let zero_buffer = "[actors]\nbuffer_size = 0".parse::<StorefrontConfig>();
        assert!(matches!(zero_buffer, Err(ConfigError::Validation(_))));

        let too_precise = "[pricing]\nminor_units = 29".parse::<StorefrontConfig>();
        assert!(matches!(too_precise, Err(ConfigError::Validation(_))));

        let no_payment = "[payment]\ncod_enabled = false\nonline_enabled = false"
            .parse::<StorefrontConfig>();
        assert!(matches!(no_payment, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let result = "[actors]\nbuffer_size = \"many\"".parse::<StorefrontConfig>();
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
