//! Payload module: handler selection and requirement collection
//!
//! The payload module hosts at most one installation source handler. The
//! handler is either requested explicitly or created from the configured
//! default the first time a kickstart is read. Creating a handler publishes
//! it through the [`Publisher`] seam; creating another replaces it.
//!
//! # Object paths
//!
//! | Handler | Published objects |
//! |---------|-------------------|
//! | DNF | handler + packages section |
//! | Live OS | handler |
//! | Live image | handler |

pub mod dnf;
pub mod live;

pub use dnf::DnfHandler;
pub use live::{LiveImageHandler, LiveOsHandler};

use crate::config::PayloadConfig;
use crate::error::{PayloadError, Result};
use crate::packages::PackagesSection;
use crate::requirements::{Requirement, RequirementLedger};
use crate::types::HandlerType;

pub const PAYLOAD_DEFAULT_PATH: &str = "/org/kspackages/Payload/Default";
pub const PACKAGES_OBJECT_PATH: &str = "/org/kspackages/Payload/Packages";
pub const LIVE_OS_PATH: &str = "/org/kspackages/Payload/LiveOS";
pub const LIVE_IMAGE_PATH: &str = "/org/kspackages/Payload/LiveImage";

/// Kickstart commands handled by the payload module
pub const KICKSTART_COMMANDS: &[&str] = &["liveimg"];
/// Kickstart sections handled by the payload module
pub const KICKSTART_SECTIONS: &[&str] = &["packages"];

/// Makes objects reachable for other processes (the external object bus)
pub trait Publisher {
    fn publish(&mut self, object_path: &str);
}

/// Publisher that only records publications in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPublisher;

impl Publisher for LogPublisher {
    fn publish(&mut self, object_path: &str) {
        tracing::info!(object_path, "published object");
    }
}

/// The active installation source handler
#[derive(Debug)]
pub enum PayloadHandler {
    Dnf(DnfHandler),
    LiveOs(LiveOsHandler),
    LiveImage(LiveImageHandler),
}

impl PayloadHandler {
    pub fn new(kind: HandlerType) -> Self {
        match kind {
            HandlerType::Dnf => Self::Dnf(DnfHandler::new()),
            HandlerType::LiveOs => Self::LiveOs(LiveOsHandler::new()),
            HandlerType::LiveImage => Self::LiveImage(LiveImageHandler::new()),
        }
    }

    pub fn kind(&self) -> HandlerType {
        match self {
            Self::Dnf(_) => HandlerType::Dnf,
            Self::LiveOs(_) => HandlerType::LiveOs,
            Self::LiveImage(_) => HandlerType::LiveImage,
        }
    }

    pub fn object_path(&self) -> &'static str {
        match self {
            Self::Dnf(_) => PAYLOAD_DEFAULT_PATH,
            Self::LiveOs(_) => LIVE_OS_PATH,
            Self::LiveImage(_) => LIVE_IMAGE_PATH,
        }
    }

    fn publish(&self, publisher: &mut dyn Publisher) {
        match self {
            Self::Dnf(handler) => handler.publish(publisher),
            Self::LiveOs(handler) => handler.publish(publisher),
            Self::LiveImage(handler) => handler.publish(publisher),
        }
    }

    fn read_kickstart(&mut self, text: &str) -> Result<()> {
        let kind = self.kind();
        match self {
            Self::Dnf(handler) => handler.read_kickstart(text),
            Self::LiveOs(_) | Self::LiveImage(_) => {
                tracing::debug!(handler = %kind, "handler has no packages section");
                Ok(())
            }
        }
    }

    fn generate_kickstart(&self) -> String {
        match self {
            Self::Dnf(handler) => handler.generate_kickstart(),
            Self::LiveOs(_) | Self::LiveImage(_) => String::new(),
        }
    }
}

/// Payload configuration unit
pub struct PayloadModule {
    config: PayloadConfig,
    handler: Option<PayloadHandler>,
    requirements: RequirementLedger,
    publisher: Box<dyn Publisher + Send>,
}

impl Default for PayloadModule {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PayloadModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadModule")
            .field("config", &self.config)
            .field("handler", &self.handler)
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}

impl PayloadModule {
    /// Module with the default configuration, publishing to the log
    pub fn new() -> Self {
        Self::with_publisher(LogPublisher)
    }

    pub fn with_publisher(publisher: impl Publisher + Send + 'static) -> Self {
        Self {
            config: PayloadConfig::default(),
            handler: None,
            requirements: RequirementLedger::new(),
            publisher: Box::new(publisher),
        }
    }

    /// Replace the configuration used to pick the default handler
    pub fn with_config(mut self, config: PayloadConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PayloadConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------

    /// Create and publish a handler, replacing any active one.
    ///
    /// Returns the object path of the new handler.
    pub fn create_handler(&mut self, kind: HandlerType) -> &'static str {
        let handler = PayloadHandler::new(kind);
        handler.publish(self.publisher.as_mut());

        if let Some(previous) = &self.handler {
            tracing::info!(previous = %previous.kind(), new = %kind, "replacing payload handler");
        } else {
            tracing::info!(handler = %kind, "created payload handler");
        }

        let path = handler.object_path();
        self.handler = Some(handler);
        path
    }

    /// Create the handler named by the configuration
    pub fn create_default_handler(&mut self) -> Result<&'static str> {
        let kind = self.config.handler_type()?;
        Ok(self.create_handler(kind))
    }

    pub fn active_handler(&self) -> Option<&PayloadHandler> {
        self.handler.as_ref()
    }

    /// Object path of the active handler, empty when none exists
    pub fn active_handler_path(&self) -> &'static str {
        self.handler
            .as_ref()
            .map_or("", PayloadHandler::object_path)
    }

    /// Packages section of the active DNF handler
    pub fn packages_section(&self) -> Result<&PackagesSection> {
        match &self.handler {
            Some(PayloadHandler::Dnf(handler)) => Ok(handler.packages()),
            other => Err(no_packages_section(other.as_ref())),
        }
    }

    pub fn packages_section_mut(&mut self) -> Result<&mut PackagesSection> {
        match &mut self.handler {
            Some(PayloadHandler::Dnf(handler)) => Ok(handler.packages_mut()),
            other => Err(no_packages_section(other.as_ref())),
        }
    }

    /// The active live OS handler
    pub fn live_os_handler_mut(&mut self) -> Result<&mut LiveOsHandler> {
        match &mut self.handler {
            Some(PayloadHandler::LiveOs(handler)) => Ok(handler),
            _ => Err(PayloadError::handler_not_set(
                "the active handler is not a live OS handler",
            )),
        }
    }

    // ------------------------------------------------------------------
    // Kickstart
    // ------------------------------------------------------------------

    /// Read kickstart text, creating the default handler first if needed
    pub fn read_kickstart(&mut self, text: &str) -> Result<()> {
        if self.handler.is_none() {
            self.create_default_handler()?;
        }
        match self.handler.as_mut() {
            Some(handler) => handler.read_kickstart(text),
            None => Err(PayloadError::handler_not_set("no payload handler is active")),
        }
    }

    /// Kickstart text of the active handler, empty when none exists
    pub fn generate_kickstart(&self) -> String {
        self.handler
            .as_ref()
            .map(PayloadHandler::generate_kickstart)
            .unwrap_or_default()
    }

    pub fn kickstart_commands(&self) -> &'static [&'static str] {
        KICKSTART_COMMANDS
    }

    pub fn kickstart_sections(&self) -> &'static [&'static str] {
        KICKSTART_SECTIONS
    }

    pub fn kickstart_addons(&self) -> &'static [&'static str] {
        &[]
    }

    // ------------------------------------------------------------------
    // Requirements
    // ------------------------------------------------------------------

    pub fn add_packages(&mut self, names: &[&str], reason: &str, strong: bool) {
        self.requirements.add_packages(names, reason, strong);
    }

    pub fn add_groups(&mut self, names: &[&str], reason: &str, strong: bool) {
        self.requirements.add_groups(names, reason, strong);
    }

    pub fn requirements(&self) -> &RequirementLedger {
        &self.requirements
    }

    pub fn package_requirements(&self) -> Vec<Requirement> {
        self.requirements.list_packages()
    }

    pub fn group_requirements(&self) -> Vec<Requirement> {
        self.requirements.list_groups()
    }
}

fn no_packages_section(handler: Option<&PayloadHandler>) -> PayloadError {
    match handler {
        Some(handler) => PayloadError::handler_not_set(format!(
            "{} handler has no packages section",
            handler.kind()
        )),
        None => PayloadError::handler_not_set("no payload handler is active"),
    }
}
