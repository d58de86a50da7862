//! Package based installation handler

use super::{PACKAGES_OBJECT_PATH, PAYLOAD_DEFAULT_PATH, Publisher};
use crate::error::Result;
use crate::packages::PackagesSection;

/// Handler for installation from package repositories.
///
/// Owns the packages section, which is published as its own object.
#[derive(Debug, Default)]
pub struct DnfHandler {
    packages: PackagesSection,
}

impl DnfHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn packages(&self) -> &PackagesSection {
        &self.packages
    }

    pub fn packages_mut(&mut self) -> &mut PackagesSection {
        &mut self.packages
    }

    pub(super) fn publish(&self, publisher: &mut dyn Publisher) {
        publisher.publish(PAYLOAD_DEFAULT_PATH);
        publisher.publish(PACKAGES_OBJECT_PATH);
    }

    pub(super) fn read_kickstart(&mut self, text: &str) -> Result<()> {
        self.packages.read_kickstart(text)
    }

    pub(super) fn generate_kickstart(&self) -> String {
        self.packages.generate_kickstart()
    }
}
