//! Packages section property surface
//!
//! [`PackagesSection`] wraps a [`Selection`] with typed getters and setters.
//! Each successful setter overwrites one field and emits exactly one
//! [`PropertiesChanged`](crate::notify::PropertiesChanged) event for it. A
//! rejected value leaves the selection untouched and emits nothing.

use serde_json::Value;

use super::entry::{Entry, check_name};
use super::parser::parse;
use super::selection::{Languages, Selection};
use super::serializer::serialize;
use crate::error::{PayloadError, Result};
use crate::notify::Signal;
use crate::types::MultilibPolicy;

/// Scope name carried by every event of this object
pub const PACKAGES_SCOPE: &str = "org.kspackages.Payload.Packages";

/// Value reported for `Languages` when no restriction was ever specified
pub const LANGUAGES_DEFAULT: &str = "default";

/// Integer reported for `Timeout` and `Retries` when unset
pub const UNSET_COUNT: i64 = -1;

#[derive(Debug, Default)]
pub struct PackagesSection {
    selection: Selection,
    kickstarted: bool,
    properties_changed: Signal,
}

impl PackagesSection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal for subscribing to property changes
    pub fn properties_changed(&mut self) -> &mut Signal {
        &mut self.properties_changed
    }

    /// Read-only view of the underlying selection
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// True once a kickstart was read successfully
    pub fn kickstarted(&self) -> bool {
        self.kickstarted
    }

    /// Replace the selection with the parsed section
    pub fn read_kickstart(&mut self, text: &str) -> Result<()> {
        self.selection = parse(text)?;
        self.kickstarted = true;
        self.notify("Kickstarted", true);
        Ok(())
    }

    /// Canonical section text
    pub fn generate_kickstart(&self) -> String {
        serialize(&self.selection)
    }

    fn notify(&self, field: &str, value: impl Into<Value>) {
        self.properties_changed
            .emit_change(PACKAGES_SCOPE, field, value);
    }

    // ------------------------------------------------------------------
    // Core group
    // ------------------------------------------------------------------

    pub fn core_group_enabled(&self) -> bool {
        self.selection.core_group_enabled()
    }

    pub fn set_core_group_enabled(&mut self, enabled: bool) {
        self.selection.set_core_group_enabled(enabled);
        self.notify("CoreGroupEnabled", enabled);
    }

    // ------------------------------------------------------------------
    // Environment, groups and packages
    // ------------------------------------------------------------------

    /// Selected environment, empty string when none
    pub fn environment(&self) -> String {
        self.selection.environment().unwrap_or_default().to_string()
    }

    /// Empty string clears the environment
    pub fn set_environment(&mut self, environment: &str) -> Result<()> {
        let value = if environment.is_empty() {
            None
        } else {
            check_name(environment).map_err(|_| {
                PayloadError::invalid_value("Environment", "must be a single token")
            })?;
            Some(environment.to_string())
        };
        self.selection.set_environment(value);
        self.notify("Environment", environment);
        Ok(())
    }

    /// Group and module tokens without the `@` prefix, sorted
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = self.selection.group_entries().map(Entry::token).collect();
        groups.sort();
        groups
    }

    pub fn set_groups(&mut self, groups: &[String]) -> Result<()> {
        let entries = groups
            .iter()
            .map(|token| {
                Entry::from_group_token(token).map_err(|_| {
                    PayloadError::invalid_value("Groups", format!("malformed group '{}'", token))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.selection.replace_group_entries(entries);
        self.notify("Groups", self.groups());
        Ok(())
    }

    /// Included package names, sorted
    pub fn packages(&self) -> Vec<String> {
        self.selection.package_entries().map(Entry::token).collect()
    }

    pub fn set_packages(&mut self, packages: &[String]) -> Result<()> {
        let entries = packages
            .iter()
            .map(|name| {
                Entry::from_package_token(name).map_err(|_| {
                    PayloadError::invalid_value("Packages", format!("malformed package '{}'", name))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.selection.replace_package_entries(entries);
        self.notify("Packages", self.packages());
        Ok(())
    }

    pub fn excluded_groups(&self) -> Vec<String> {
        self.selection.excluded_groups().map(str::to_string).collect()
    }

    pub fn set_excluded_groups(&mut self, groups: &[String]) -> Result<()> {
        validate_names("ExcludedGroups", groups)?;
        if let Some(group) = groups.iter().find(|g| g.contains(':')) {
            return Err(PayloadError::invalid_value(
                "ExcludedGroups",
                format!("module stream '{}' cannot be excluded", group),
            ));
        }
        self.selection.replace_excluded_groups(groups.iter().cloned());
        self.notify("ExcludedGroups", self.excluded_groups());
        Ok(())
    }

    pub fn excluded_packages(&self) -> Vec<String> {
        self.selection
            .excluded_packages()
            .map(str::to_string)
            .collect()
    }

    pub fn set_excluded_packages(&mut self, packages: &[String]) -> Result<()> {
        validate_names("ExcludedPackages", packages)?;
        self.selection
            .replace_excluded_packages(packages.iter().cloned());
        self.notify("ExcludedPackages", self.excluded_packages());
        Ok(())
    }

    // ------------------------------------------------------------------
    // Languages
    // ------------------------------------------------------------------

    /// `"default"` when unset, `""` for no languages, otherwise the list
    pub fn languages(&self) -> String {
        self.selection
            .languages()
            .flag_value()
            .unwrap_or(LANGUAGES_DEFAULT)
            .to_string()
    }

    /// Set an explicit, non-empty language list
    pub fn set_languages(&mut self, languages: &str) -> Result<()> {
        if languages.is_empty() {
            return Err(PayloadError::invalid_value(
                "Languages",
                "an explicit list must not be empty, use clear_languages",
            ));
        }
        if languages.chars().any(char::is_whitespace) {
            return Err(PayloadError::invalid_value(
                "Languages",
                "must be a comma-separated list without whitespace",
            ));
        }
        self.selection
            .set_languages(Languages::List(languages.to_string()));
        self.notify("Languages", languages);
        Ok(())
    }

    /// Install no languages at all
    pub fn clear_languages(&mut self) {
        self.selection.set_languages(Languages::Empty);
        self.notify("Languages", "");
    }

    /// Back to the unrestricted default
    pub fn reset_languages(&mut self) {
        self.selection.set_languages(Languages::Unset);
        self.notify("Languages", LANGUAGES_DEFAULT);
    }

    // ------------------------------------------------------------------
    // Remaining attributes
    // ------------------------------------------------------------------

    pub fn multilib_policy(&self) -> MultilibPolicy {
        self.selection.multilib_policy()
    }

    pub fn set_multilib_policy(&mut self, policy: MultilibPolicy) {
        self.selection.set_multilib_policy(policy);
        self.notify("MultilibPolicy", policy.to_string());
    }

    pub fn missing_ignored(&self) -> bool {
        self.selection.missing_ignored()
    }

    pub fn set_missing_ignored(&mut self, ignored: bool) {
        self.selection.set_missing_ignored(ignored);
        self.notify("MissingIgnored", ignored);
    }

    pub fn docs_excluded(&self) -> bool {
        self.selection.docs_excluded()
    }

    pub fn set_docs_excluded(&mut self, excluded: bool) {
        self.selection.set_docs_excluded(excluded);
        self.notify("DocsExcluded", excluded);
    }

    pub fn weakdeps_excluded(&self) -> bool {
        self.selection.weakdeps_excluded()
    }

    pub fn set_weakdeps_excluded(&mut self, excluded: bool) {
        self.selection.set_weakdeps_excluded(excluded);
        self.notify("WeakDepsExcluded", excluded);
    }

    /// Timeout in seconds, [`UNSET_COUNT`] when unset
    pub fn timeout(&self) -> i64 {
        self.selection
            .timeout()
            .map_or(UNSET_COUNT, i64::from)
    }

    /// `None` unsets the timeout; zero is rejected, as it is in `--timeout=`
    pub fn set_timeout(&mut self, timeout: Option<u32>) -> Result<()> {
        if timeout == Some(0) {
            return Err(PayloadError::invalid_value(
                "Timeout",
                "must be a positive number of seconds",
            ));
        }
        self.selection.set_timeout(timeout);
        self.notify("Timeout", self.timeout());
        Ok(())
    }

    /// Retry count, [`UNSET_COUNT`] when unset
    pub fn retries(&self) -> i64 {
        self.selection
            .retries()
            .map_or(UNSET_COUNT, i64::from)
    }

    pub fn set_retries(&mut self, retries: Option<u32>) {
        self.selection.set_retries(retries);
        self.notify("Retries", self.retries());
    }
}

fn validate_names(field: &str, names: &[String]) -> Result<()> {
    for name in names {
        check_name(name).map_err(|_| {
            PayloadError::invalid_value(field, format!("malformed name '{}'", name))
        })?;
    }
    Ok(())
}
