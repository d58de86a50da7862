//! Line-item values of a packages section
//!
//! An [`Entry`] is identified by its full literal token: `@foo:1` and
//! `@foo:2` are different entries, as are the group `@foo` and the
//! package `foo`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stream (and optional profile) of a module entry
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleStream {
    pub stream: String,
    pub profile: Option<String>,
}

/// A single included item
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Entry {
    /// Plain package name, rendered without prefix
    Package(String),
    /// Group name, rendered `@name`
    Group(String),
    /// Module with stream, rendered `@name:stream` or `@name:stream/profile`
    Module { name: String, stream: ModuleStream },
}

/// Why a token could not be turned into an entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenError {
    EmptyName,
    Whitespace,
    ReservedPrefix(char),
    MalformedStream(String),
}

impl Entry {
    pub fn package(name: impl Into<String>) -> Self {
        Self::Package(name.into())
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::Group(name.into())
    }

    pub fn module(
        name: impl Into<String>,
        stream: impl Into<String>,
        profile: Option<&str>,
    ) -> Self {
        Self::Module {
            name: name.into(),
            stream: ModuleStream {
                stream: stream.into(),
                profile: profile.map(str::to_string),
            },
        }
    }

    /// Parse a group-or-module token with the leading `@` already stripped.
    ///
    /// A `:` splits name from stream, a `/` inside the stream splits the
    /// profile. Without a `:` the token is a group.
    pub(crate) fn from_group_token(token: &str) -> Result<Self, TokenError> {
        check_name(token)?;

        let Some((name, rest)) = token.split_once(':') else {
            return Ok(Self::Group(token.to_string()));
        };

        let malformed = || TokenError::MalformedStream(token.to_string());
        if name.is_empty() || rest.is_empty() || rest.contains(':') {
            return Err(malformed());
        }

        let (stream, profile) = match rest.split_once('/') {
            Some((stream, profile)) => {
                if stream.is_empty() || profile.is_empty() || profile.contains('/') {
                    return Err(malformed());
                }
                (stream, Some(profile))
            }
            None => (rest, None),
        };

        Ok(Self::module(name, stream, profile))
    }

    /// Parse a package token
    pub(crate) fn from_package_token(token: &str) -> Result<Self, TokenError> {
        check_name(token)?;
        Ok(Self::Package(token.to_string()))
    }

    /// The name without stream or profile
    pub fn name(&self) -> &str {
        match self {
            Self::Package(name) | Self::Group(name) => name,
            Self::Module { name, .. } => name,
        }
    }

    /// Groups and modules share the `@` block of the section
    pub fn is_group_like(&self) -> bool {
        !matches!(self, Self::Package(_))
    }

    /// Token without the `@` prefix: `name`, `name:stream` or `name:stream/profile`
    pub fn token(&self) -> String {
        match self {
            Self::Package(name) | Self::Group(name) => name.clone(),
            Self::Module { name, stream } => match &stream.profile {
                Some(profile) => format!("{}:{}/{}", name, stream.stream, profile),
                None => format!("{}:{}", name, stream.stream),
            },
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_group_like() {
            write!(f, "@{}", self.token())
        } else {
            write!(f, "{}", self.token())
        }
    }
}

/// Characters that select a line kind when they start an entry line
pub(crate) const RESERVED_PREFIXES: [char; 5] = ['@', '-', '^', '#', '%'];

/// Names must be non-empty single tokens that do not start with a line
/// prefix, so every rendered line reads back as the same entry kind.
pub(crate) fn check_name(name: &str) -> Result<(), TokenError> {
    let Some(first) = name.chars().next() else {
        return Err(TokenError::EmptyName);
    };
    if name.chars().any(char::is_whitespace) {
        return Err(TokenError::Whitespace);
    }
    if RESERVED_PREFIXES.contains(&first) {
        return Err(TokenError::ReservedPrefix(first));
    }
    Ok(())
}
