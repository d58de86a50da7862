//! Requirement ledger
//!
//! Collects package and group requirements injected by other parts of the
//! installer. Each id appears once; repeated additions merge into it:
//!
//! - reasons are appended in first-seen order, without duplicates
//! - strength only ever goes up (`strong = old || new`)
//!
//! Group ids carry a leading `@`. The ledger never feeds back into the
//! packages section; the handler layer reads it to decide what else must be
//! installed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prefix that marks a group id
pub const GROUP_PREFIX: char = '@';

/// A single install obligation with its provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    pub id: String,
    pub reasons: Vec<String>,
    pub strong: bool,
}

impl Requirement {
    fn new(id: &str, reason: &str, strong: bool) -> Self {
        Self {
            id: id.to_string(),
            reasons: vec![reason.to_string()],
            strong,
        }
    }

    /// Fold another request for the same id into this one
    fn merge(&mut self, reason: &str, strong: bool) {
        if !self.reasons.iter().any(|r| r == reason) {
            self.reasons.push(reason.to_string());
        }
        self.strong |= strong;
    }

    pub fn is_group(&self) -> bool {
        self.id.starts_with(GROUP_PREFIX)
    }
}

/// Ordered map of requirements keyed by id
#[derive(Debug, Clone, Default)]
pub struct RequirementLedger {
    requirements: Vec<Requirement>,
    index: HashMap<String, usize>,
}

impl RequirementLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `reason` for every id, creating or merging as needed
    pub fn add<I, S>(&mut self, ids: I, reason: &str, strong: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for id in ids {
            let id = id.as_ref();
            match self.index.get(id) {
                Some(&position) => {
                    let requirement = &mut self.requirements[position];
                    requirement.merge(reason, strong);
                    tracing::debug!(id, reason, strong = requirement.strong, "merged requirement");
                }
                None => {
                    self.index.insert(id.to_string(), self.requirements.len());
                    self.requirements.push(Requirement::new(id, reason, strong));
                    tracing::debug!(id, reason, strong, "added requirement");
                }
            }
        }
    }

    /// Record package requirements
    pub fn add_packages<I, S>(&mut self, names: I, reason: &str, strong: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add(names, reason, strong);
    }

    /// Record group requirements; names are stored with the `@` prefix
    pub fn add_groups<I, S>(&mut self, names: I, reason: &str, strong: bool)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<String> = names
            .into_iter()
            .map(|name| group_id(name.as_ref()))
            .collect();
        self.add(ids, reason, strong);
    }

    /// Package requirements in first-added order
    pub fn list_packages(&self) -> Vec<Requirement> {
        self.requirements
            .iter()
            .filter(|r| !r.is_group())
            .cloned()
            .collect()
    }

    /// Group requirements in first-added order
    pub fn list_groups(&self) -> Vec<Requirement> {
        self.requirements
            .iter()
            .filter(|r| r.is_group())
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Requirement> {
        self.index.get(id).map(|&position| &self.requirements[position])
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    /// Drop every requirement
    pub fn clear(&mut self) {
        self.requirements.clear();
        self.index.clear();
    }
}

fn group_id(name: &str) -> String {
    if name.starts_with(GROUP_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", GROUP_PREFIX, name)
    }
}
