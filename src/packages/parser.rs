//! Packages section parser
//!
//! Reads a `%packages` … `%end` section into a [`Selection`].
//!
//! # Line grammar
//!
//! | Prefix | Meaning |
//! |--------|---------|
//! | `@^`   | environment (single slot, last one wins) |
//! | `@`    | group, or module when the token contains `:` |
//! | `-@`   | excluded group |
//! | `-`    | excluded package |
//! | other  | included package |
//!
//! Blank lines and `#` comments are ignored everywhere. Header attributes
//! are handled independently of the entry lines.

use thiserror::Error;

use super::entry::{Entry, TokenError, check_name};
use super::selection::{Languages, Selection};
use crate::types::MultilibPolicy;

/// Section keyword
pub const SECTION_HEADER: &str = "%packages";
/// Section terminator, alone on its line
pub const SECTION_END: &str = "%end";

/// What went wrong on a line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    #[error("malformed value for attribute '{attribute}': '{value}'")]
    MalformedAttribute { attribute: String, value: String },

    #[error("malformed module stream '{0}'")]
    MalformedStream(String),

    #[error("empty name")]
    EmptyName,

    #[error("entry '{0}' must be a single token")]
    Whitespace(String),

    #[error("name in '{line}' may not start with '{prefix}'")]
    ReservedPrefix { line: String, prefix: char },

    #[error("unexpected line '{0}'")]
    UnexpectedLine(String),

    #[error("section is not terminated by %end")]
    MissingEnd,

    #[error("more than one %packages section")]
    DuplicateSection,
}

/// Malformed section syntax, with the 1-based line it was found on
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(line: usize, kind: ParseErrorKind) -> Self {
        Self { line, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InSection { header_line: usize },
    Done,
}

/// Parse kickstart text holding at most one packages section.
///
/// Text without a section yields the default [`Selection`].
pub fn parse(text: &str) -> Result<Selection, ParseError> {
    let mut selection = Selection::new();
    let mut state = State::Outside;

    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match state {
            State::InSection { .. } => {
                if line == SECTION_END {
                    state = State::Done;
                } else if line.starts_with('%') {
                    return Err(ParseError::new(
                        line_no,
                        ParseErrorKind::UnexpectedLine(line.to_string()),
                    ));
                } else {
                    parse_entry(line, &mut selection)
                        .map_err(|kind| ParseError::new(line_no, kind))?;
                }
            }
            State::Outside | State::Done => {
                let mut words = line.split_whitespace();
                if words.next() != Some(SECTION_HEADER) {
                    return Err(ParseError::new(
                        line_no,
                        ParseErrorKind::UnexpectedLine(line.to_string()),
                    ));
                }
                if state == State::Done {
                    return Err(ParseError::new(line_no, ParseErrorKind::DuplicateSection));
                }
                for word in words {
                    parse_attribute(word, &mut selection)
                        .map_err(|kind| ParseError::new(line_no, kind))?;
                }
                tracing::debug!(line = line_no, "entering packages section");
                state = State::InSection {
                    header_line: line_no,
                };
            }
        }
    }

    if let State::InSection { header_line } = state {
        return Err(ParseError::new(header_line, ParseErrorKind::MissingEnd));
    }

    tracing::debug!(
        included = selection.included().count(),
        environment = ?selection.environment(),
        "parsed packages section"
    );
    Ok(selection)
}

fn parse_attribute(word: &str, selection: &mut Selection) -> Result<(), ParseErrorKind> {
    let (flag, value) = match word.split_once('=') {
        Some((flag, value)) => (flag, Some(value)),
        None => (word, None),
    };

    match (flag, value) {
        ("--nocore", None) => selection.set_core_group_enabled(false),
        ("--ignoremissing", None) => selection.set_missing_ignored(true),
        ("--multilib", None) => selection.set_multilib_policy(MultilibPolicy::All),
        ("--excludedocs", None) => selection.set_docs_excluded(true),
        ("--excludeWeakdeps", None) => selection.set_weakdeps_excluded(true),
        ("--instLangs", Some(value)) => selection.set_languages(Languages::from_value(value)),
        ("--timeout", Some(value)) => selection.set_timeout(Some(parse_timeout(value)?)),
        ("--retries", Some(value)) => selection.set_retries(Some(parse_count(flag, value)?)),
        (
            "--nocore" | "--ignoremissing" | "--multilib" | "--excludedocs" | "--excludeWeakdeps",
            Some(value),
        ) => {
            return Err(ParseErrorKind::MalformedAttribute {
                attribute: flag.to_string(),
                value: value.to_string(),
            });
        }
        ("--instLangs" | "--timeout" | "--retries", None) => {
            return Err(ParseErrorKind::MalformedAttribute {
                attribute: flag.to_string(),
                value: String::new(),
            });
        }
        _ => return Err(ParseErrorKind::UnknownAttribute(word.to_string())),
    }

    Ok(())
}

fn parse_count(flag: &str, value: &str) -> Result<u32, ParseErrorKind> {
    value
        .parse::<u32>()
        .map_err(|_| ParseErrorKind::MalformedAttribute {
            attribute: flag.to_string(),
            value: value.to_string(),
        })
}

/// A timeout of zero seconds is meaningless and rejected like a non-number
fn parse_timeout(value: &str) -> Result<u32, ParseErrorKind> {
    match parse_count("--timeout", value)? {
        0 => Err(ParseErrorKind::MalformedAttribute {
            attribute: "--timeout".to_string(),
            value: value.to_string(),
        }),
        timeout => Ok(timeout),
    }
}

fn parse_entry(line: &str, selection: &mut Selection) -> Result<(), ParseErrorKind> {
    if let Some(environment) = line.strip_prefix("@^") {
        check_name(environment).map_err(|e| token_error(e, line))?;
        if let Some(previous) = selection.set_environment(Some(environment.to_string())) {
            if previous != environment {
                tracing::warn!(%previous, %environment, "environment overridden");
            }
        }
    } else if let Some(token) = line.strip_prefix('@') {
        let entry = Entry::from_group_token(token).map_err(|e| token_error(e, line))?;
        selection.include(entry);
    } else if let Some(group) = line.strip_prefix("-@") {
        check_name(group).map_err(|e| token_error(e, line))?;
        if group.contains(':') {
            return Err(ParseErrorKind::MalformedStream(group.to_string()));
        }
        selection.exclude_group(group);
    } else if let Some(package) = line.strip_prefix('-') {
        check_name(package).map_err(|e| token_error(e, line))?;
        selection.exclude_package(package);
    } else {
        let entry = Entry::from_package_token(line).map_err(|e| token_error(e, line))?;
        selection.include(entry);
    }
    Ok(())
}

fn token_error(error: TokenError, line: &str) -> ParseErrorKind {
    match error {
        TokenError::EmptyName => ParseErrorKind::EmptyName,
        TokenError::Whitespace => ParseErrorKind::Whitespace(line.to_string()),
        TokenError::ReservedPrefix(prefix) => ParseErrorKind::ReservedPrefix {
            line: line.to_string(),
            prefix,
        },
        TokenError::MalformedStream(token) => ParseErrorKind::MalformedStream(token),
    }
}
