//! Packages section model, parser and canonical serializer
//!
//! Text flows through [`parse`] into a [`Selection`], may be mutated through
//! [`PackagesSection`] setters, and comes back out through [`serialize`].

pub mod entry;
pub mod parser;
pub mod section;
pub mod selection;
pub mod serializer;

pub use entry::{Entry, ModuleStream};
pub use parser::{ParseError, ParseErrorKind, parse};
pub use section::PackagesSection;
pub use selection::{Languages, Selection};
pub use serializer::serialize;
