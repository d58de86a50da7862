//! Live installation handlers
//!
//! Both copy an existing filesystem instead of installing packages, so
//! neither owns a packages section. Mounting the image is done by the
//! storage layer; these objects only carry the configuration.

use super::{LIVE_IMAGE_PATH, LIVE_OS_PATH, Publisher};
use crate::notify::Signal;

/// Scope name of live OS property events
pub const LIVE_OS_SCOPE: &str = "org.kspackages.Payload.LiveOS";

/// State reported before installation begins
pub const LIVE_OS_INITIAL_STATE: &str = "started";

/// Handler copying the running live filesystem
#[derive(Debug)]
pub struct LiveOsHandler {
    image_path: String,
    state: String,
    properties_changed: Signal,
}

impl Default for LiveOsHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveOsHandler {
    pub fn new() -> Self {
        Self {
            image_path: String::new(),
            state: LIVE_OS_INITIAL_STATE.to_string(),
            properties_changed: Signal::new(),
        }
    }

    pub fn properties_changed(&mut self) -> &mut Signal {
        &mut self.properties_changed
    }

    /// Path of the base image block device, empty when not set
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    pub fn set_image_path(&mut self, image_path: &str) {
        self.image_path = image_path.to_string();
        self.properties_changed
            .emit_change(LIVE_OS_SCOPE, "ImagePath", image_path);
    }

    pub fn state(&self) -> &str {
        &self.state
    }

    pub fn set_state(&mut self, state: &str) {
        self.state = state.to_string();
        self.properties_changed
            .emit_change(LIVE_OS_SCOPE, "State", state);
    }

    pub(super) fn publish(&self, publisher: &mut dyn Publisher) {
        publisher.publish(LIVE_OS_PATH);
    }
}

/// Handler deploying a filesystem image
#[derive(Debug, Default)]
pub struct LiveImageHandler;

impl LiveImageHandler {
    pub fn new() -> Self {
        Self
    }

    pub(super) fn publish(&self, publisher: &mut dyn Publisher) {
        publisher.publish(LIVE_IMAGE_PATH);
    }
}
