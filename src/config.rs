//! Payload configuration file handling
//!
//! The configuration names the installation source handler that is created
//! when a kickstart is read before any handler was requested explicitly.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::PayloadError;
use crate::types::HandlerType;

/// Payload configuration that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadConfig {
    /// One of `DNF`, `LIVE_OS`, `LIVE_IMAGE`. Kept as text so that an
    /// unknown value surfaces as a handler error instead of a JSON error.
    #[serde(default)]
    pub default_handler: String,
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self::with_handler(HandlerType::Dnf)
    }
}

impl PayloadConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(handler: HandlerType) -> Self {
        Self {
            default_handler: handler.to_string(),
        }
    }

    /// Map the configured value onto a handler kind
    pub fn handler_type(&self) -> std::result::Result<HandlerType, PayloadError> {
        let value = self.default_handler.trim();
        if value.is_empty() {
            return Err(PayloadError::handler_not_set(
                "no default handler is configured",
            ));
        }
        HandlerType::from_str(value).map_err(|_| {
            PayloadError::handler_not_set(format!("unknown default handler '{}'", value))
        })
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize payload configuration to JSON")?;

        fs::write(&path, json).with_context(|| {
            format!("Failed to write payload configuration to {:?}", path.as_ref())
        })?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).with_context(|| {
            format!("Failed to read payload configuration from {:?}", path.as_ref())
        })?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse payload configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.handler_type()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_is_dnf() {
        let config = PayloadConfig::default();
        assert_eq!(config.default_handler, "DNF");
        assert_eq!(config.handler_type().unwrap(), HandlerType::Dnf);
    }

    #[test]
    fn test_empty_handler_is_not_set() {
        let config = PayloadConfig {
            default_handler: String::new(),
        };
        assert!(matches!(
            config.handler_type(),
            Err(PayloadError::HandlerNotSet(_))
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_handler_is_not_set() {
        let config = PayloadConfig {
            default_handler: "RPM_OSTREE".into(),
        };
        let err = config.handler_type().unwrap_err();
        assert!(err.to_string().contains("RPM_OSTREE"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("payload.json");

        let config = PayloadConfig::with_handler(HandlerType::LiveImage);
        config.save_to_file(&path).unwrap();

        let loaded = PayloadConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.handler_type().unwrap(), HandlerType::LiveImage);
    }

    #[test]
    fn test_missing_field_defaults_to_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("payload.json");
        std::fs::write(&path, "{}").unwrap();

        let loaded = PayloadConfig::load_from_file(&path).unwrap();
        assert!(loaded.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = PayloadConfig::load_from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read payload configuration"));
    }
}
