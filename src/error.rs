//! Error taxonomy for the engine.
//!
//! Configuration problems fail fast at the call that caused them; grammar
//! mismatches are never errors (handlers return `None` and the trigger
//! degrades to plain text).

use thiserror::Error;

/// Errors raised by settings construction and the dotted-path accessors.
#[derive(Debug, Error, PartialEq)]
pub enum SettingsError {
    #[error("setting '{0}' does not exist")]
    UnknownPath(String),

    #[error("invalid type for setting '{path}': expected {expected}")]
    WrongKind { path: String, expected: &'static str },

    #[error("malformed ToC tag given: {0}")]
    MalformedTocTag(String),
}

/// Errors raised by the table-of-contents query.
#[derive(Debug, Error, PartialEq)]
pub enum TocError {
    #[error("unknown return format '{0}' given while querying ToC")]
    UnknownFormat(String),
}
