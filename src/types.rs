//! Type-safe enums for package selection and payload configuration
//!
//! Stringly-typed values from the packages section header and the payload
//! configuration file are mapped onto these enums so that every consumer can
//! match on them exhaustively.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How multilib (multi-architecture) packages are picked during installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MultilibPolicy {
    /// Install only the best matching architecture
    #[default]
    Best,
    /// Install every available architecture (`--multilib`)
    All,
}

impl MultilibPolicy {
    /// Returns true if the header needs the `--multilib` flag
    pub fn is_multilib(&self) -> bool {
        matches!(self, Self::All)
    }
}

/// Installation source handler implementations the payload module can host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[derive(Display, EnumString, EnumIter)]
pub enum HandlerType {
    /// Package based installation from repositories
    #[strum(serialize = "DNF")]
    #[serde(rename = "DNF")]
    Dnf,
    /// Copy of the running live filesystem
    #[strum(serialize = "LIVE_OS")]
    #[serde(rename = "LIVE_OS")]
    LiveOs,
    /// Deployment of a filesystem image
    #[strum(serialize = "LIVE_IMAGE")]
    #[serde(rename = "LIVE_IMAGE")]
    LiveImage,
}

impl HandlerType {
    /// Returns true if the handler owns a packages section
    pub fn has_packages_section(&self) -> bool {
        matches!(self, Self::Dnf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_multilib_policy_strings() {
        assert_eq!(MultilibPolicy::Best.to_string(), "best");
        assert_eq!(MultilibPolicy::All.to_string(), "all");
        assert_eq!(MultilibPolicy::from_str("all").unwrap(), MultilibPolicy::All);
        assert!(MultilibPolicy::from_str("ALL").is_err());
    }

    #[test]
    fn test_multilib_policy_default() {
        assert_eq!(MultilibPolicy::default(), MultilibPolicy::Best);
        assert!(!MultilibPolicy::default().is_multilib());
    }

    #[test]
    fn test_handler_type_strings() {
        assert_eq!(HandlerType::from_str("DNF").unwrap(), HandlerType::Dnf);
        assert_eq!(HandlerType::from_str("LIVE_OS").unwrap(), HandlerType::LiveOs);
        assert_eq!(
            HandlerType::from_str("LIVE_IMAGE").unwrap(),
            HandlerType::LiveImage
        );
        assert!(HandlerType::from_str("").is_err());
        assert!(HandlerType::from_str("dnf").is_err());
    }

    #[test]
    fn test_only_dnf_has_packages_section() {
        let with_section: Vec<HandlerType> = HandlerType::iter()
            .filter(|h| h.has_packages_section())
            .collect();
        assert_eq!(with_section, vec![HandlerType::Dnf]);
    }

    #[test]
    fn test_handler_type_serde_uses_config_names() {
        let json = serde_json::to_string(&HandlerType::LiveOs).unwrap();
        assert_eq!(json, "\"LIVE_OS\"");
    }
}
