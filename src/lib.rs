//! kspackages library
//!
//! Model, parser and canonical serializer for the installer's `%packages`
//! section, plus the requirement ledger and handler selection of the payload
//! configuration unit that owns them.

pub mod cli;
pub mod config;
pub mod error;
pub mod notify;
pub mod packages;
pub mod payload;
pub mod requirements;
pub mod types;

// Re-export main types for convenience
pub use config::PayloadConfig;
pub use error::{PayloadError, Result};
pub use notify::{PropertiesChanged, Recorder, Signal};
pub use packages::{
    Entry, Languages, ModuleStream, PackagesSection, ParseError, ParseErrorKind, Selection, parse,
    serialize,
};
pub use payload::{
    DnfHandler, LiveImageHandler, LiveOsHandler, LogPublisher, PayloadHandler, PayloadModule,
    Publisher,
};
pub use requirements::{Requirement, RequirementLedger};
pub use types::{HandlerType, MultilibPolicy};
