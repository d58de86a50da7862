//! Decomposed state of a packages section
//!
//! [`Selection`] is plain data. It performs set-union deduplication and
//! nothing else: an excluded name is never removed from the included set and
//! vice versa, so the final text shows both.

use std::collections::BTreeSet;

use super::entry::Entry;
use crate::types::MultilibPolicy;

/// Language restriction requested with `--instLangs`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Languages {
    /// The flag was never given: install the default language set
    #[default]
    Unset,
    /// `--instLangs=` with an empty value: install no languages
    Empty,
    /// Explicit comma-separated list
    List(String),
}

impl Languages {
    /// Map a flag value onto the explicit states
    pub fn from_value(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::List(value.to_string())
        }
    }

    /// Value rendered after `--instLangs=`, `None` when the flag is omitted
    pub fn flag_value(&self) -> Option<&str> {
        match self {
            Self::Unset => None,
            Self::Empty => Some(""),
            Self::List(list) => Some(list),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

/// Aggregate root of a packages section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    included: BTreeSet<Entry>,
    excluded_packages: BTreeSet<String>,
    excluded_groups: BTreeSet<String>,
    environment: Option<String>,

    core_group_enabled: bool,
    multilib_policy: MultilibPolicy,
    languages: Languages,
    missing_ignored: bool,
    docs_excluded: bool,
    weakdeps_excluded: bool,
    timeout: Option<u32>,
    retries: Option<u32>,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new()
    }
}

impl Selection {
    /// An empty selection with the core group enabled and every attribute unset
    pub fn new() -> Self {
        Self {
            included: BTreeSet::new(),
            excluded_packages: BTreeSet::new(),
            excluded_groups: BTreeSet::new(),
            environment: None,
            core_group_enabled: true,
            multilib_policy: MultilibPolicy::Best,
            languages: Languages::Unset,
            missing_ignored: false,
            docs_excluded: false,
            weakdeps_excluded: false,
            timeout: None,
            retries: None,
        }
    }

    // ------------------------------------------------------------------
    // Entries
    // ------------------------------------------------------------------

    /// Add an entry; returns false if an identical entry was already present
    pub fn include(&mut self, entry: Entry) -> bool {
        self.included.insert(entry)
    }

    /// Returns false if the name was already excluded
    pub fn exclude_package(&mut self, name: impl Into<String>) -> bool {
        self.excluded_packages.insert(name.into())
    }

    /// Returns false if the name was already excluded
    pub fn exclude_group(&mut self, name: impl Into<String>) -> bool {
        self.excluded_groups.insert(name.into())
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.included.contains(entry)
    }

    /// Every included entry
    pub fn included(&self) -> impl Iterator<Item = &Entry> {
        self.included.iter()
    }

    /// Included groups and modules
    pub fn group_entries(&self) -> impl Iterator<Item = &Entry> {
        self.included.iter().filter(|e| e.is_group_like())
    }

    /// Included plain packages
    pub fn package_entries(&self) -> impl Iterator<Item = &Entry> {
        self.included.iter().filter(|e| !e.is_group_like())
    }

    pub fn excluded_packages(&self) -> impl Iterator<Item = &str> {
        self.excluded_packages.iter().map(String::as_str)
    }

    pub fn excluded_groups(&self) -> impl Iterator<Item = &str> {
        self.excluded_groups.iter().map(String::as_str)
    }

    /// Replace all included groups and modules, keeping packages
    pub fn replace_group_entries(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.included.retain(|e| !e.is_group_like());
        self.included
            .extend(entries.into_iter().filter(Entry::is_group_like));
    }

    /// Replace all included packages, keeping groups and modules
    pub fn replace_package_entries(&mut self, entries: impl IntoIterator<Item = Entry>) {
        self.included.retain(Entry::is_group_like);
        self.included
            .extend(entries.into_iter().filter(|e| !e.is_group_like()));
    }

    pub fn replace_excluded_packages(&mut self, names: impl IntoIterator<Item = String>) {
        self.excluded_packages = names.into_iter().collect();
    }

    pub fn replace_excluded_groups(&mut self, names: impl IntoIterator<Item = String>) {
        self.excluded_groups = names.into_iter().collect();
    }

    /// Returns true if nothing is included, excluded or selected as environment
    pub fn is_empty(&self) -> bool {
        self.included.is_empty()
            && self.excluded_packages.is_empty()
            && self.excluded_groups.is_empty()
            && self.environment.is_none()
    }

    // ------------------------------------------------------------------
    // Environment
    // ------------------------------------------------------------------

    pub fn environment(&self) -> Option<&str> {
        self.environment.as_deref()
    }

    /// Overwrite the environment slot, returning the previous value
    pub fn set_environment(&mut self, environment: Option<String>) -> Option<String> {
        std::mem::replace(&mut self.environment, environment)
    }

    // ------------------------------------------------------------------
    // Attributes
    // ------------------------------------------------------------------

    pub fn core_group_enabled(&self) -> bool {
        self.core_group_enabled
    }

    pub fn set_core_group_enabled(&mut self, enabled: bool) {
        self.core_group_enabled = enabled;
    }

    pub fn multilib_policy(&self) -> MultilibPolicy {
        self.multilib_policy
    }

    pub fn set_multilib_policy(&mut self, policy: MultilibPolicy) {
        self.multilib_policy = policy;
    }

    pub fn languages(&self) -> &Languages {
        &self.languages
    }

    pub fn set_languages(&mut self, languages: Languages) {
        self.languages = languages;
    }

    pub fn missing_ignored(&self) -> bool {
        self.missing_ignored
    }

    pub fn set_missing_ignored(&mut self, ignored: bool) {
        self.missing_ignored = ignored;
    }

    pub fn docs_excluded(&self) -> bool {
        self.docs_excluded
    }

    pub fn set_docs_excluded(&mut self, excluded: bool) {
        self.docs_excluded = excluded;
    }

    pub fn weakdeps_excluded(&self) -> bool {
        self.weakdeps_excluded
    }

    pub fn set_weakdeps_excluded(&mut self, excluded: bool) {
        self.weakdeps_excluded = excluded;
    }

    pub fn timeout(&self) -> Option<u32> {
        self.timeout
    }

    pub fn set_timeout(&mut self, timeout: Option<u32>) {
        self.timeout = timeout;
    }

    pub fn retries(&self) -> Option<u32> {
        self.retries
    }

    pub fn set_retries(&mut self, retries: Option<u32>) {
        self.retries = retries;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let selection = Selection::new();
        assert!(selection.core_group_enabled());
        assert_eq!(selection.multilib_policy(), MultilibPolicy::Best);
        assert!(selection.languages().is_unset());
        assert_eq!(selection.timeout(), None);
        assert_eq!(selection.retries(), None);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_include_is_idempotent() {
        let mut selection = Selection::new();
        assert!(selection.include(Entry::package("vim")));
        assert!(!selection.include(Entry::package("vim")));
        assert_eq!(selection.included().count(), 1);
    }

    #[test]
    fn test_exclude_is_idempotent() {
        let mut selection = Selection::new();
        assert!(selection.exclude_group("docs"));
        assert!(!selection.exclude_group("docs"));
        assert!(selection.exclude_package("docs"));
        assert_eq!(selection.excluded_groups().count(), 1);
        assert_eq!(selection.excluded_packages().count(), 1);
    }

    #[test]
    fn test_exclude_does_not_touch_included() {
        let mut selection = Selection::new();
        selection.include(Entry::group("office"));
        selection.exclude_group("office");
        assert!(selection.contains(&Entry::group("office")));
        assert_eq!(selection.excluded_groups().collect::<Vec<_>>(), vec!["office"]);
    }

    #[test]
    fn test_environment_last_wins() {
        let mut selection = Selection::new();
        assert_eq!(selection.set_environment(Some("server".into())), None);
        assert_eq!(
            selection.set_environment(Some("workstation".into())),
            Some("server".into())
        );
        assert_eq!(selection.environment(), Some("workstation"));
    }

    #[test]
    fn test_replace_group_entries_keeps_packages() {
        let mut selection = Selection::new();
        selection.include(Entry::package("vim"));
        selection.include(Entry::group("core"));
        selection.replace_group_entries(vec![Entry::module("m", "1", None)]);

        let groups: Vec<_> = selection.group_entries().cloned().collect();
        assert_eq!(groups, vec![Entry::module("m", "1", None)]);
        assert!(selection.contains(&Entry::package("vim")));
    }

    #[test]
    fn test_languages_tri_state() {
        assert_eq!(Languages::Unset.flag_value(), None);
        assert_eq!(Languages::from_value(""), Languages::Empty);
        assert_eq!(Languages::Empty.flag_value(), Some(""));
        assert_eq!(
            Languages::from_value("en,es").flag_value(),
            Some("en,es")
        );
    }
}
