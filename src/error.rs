//! Error types.
//!
//! Parsing and resolution have their own enums so callers that only run one
//! stage can match on it; [`Error`] wraps both for the combined API.

use std::num::ParseIntError;
use thiserror::Error;

/// Failure to read the notes text. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("missing section header \"{header}\"")]
    MissingSection { header: &'static str },

    #[error("line {line}: expected a ticket after \"{header}\"")]
    MissingTicket { line: usize, header: &'static str },

    #[error("line {line}: malformed rule \"{text}\" (expected \"name: a-b or c-d\")")]
    MalformedRule { line: usize, text: String },

    #[error("line {line}: malformed range \"{text}\" (expected \"low-high\")")]
    MalformedRange { line: usize, text: String },

    #[error("line {line}: invalid number \"{text}\": {source}")]
    InvalidNumber {
        line: usize,
        text: String,
        #[source]
        source: ParseIntError,
    },
}

/// Failure to produce a complete field assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("no valid tickets to resolve fields from")]
    NoTickets,

    #[error("ticket {ticket} has {len} values, expected {expected}")]
    RaggedTicket { ticket: usize, len: usize, expected: usize },

    #[error("tickets have {columns} columns but there are {rules} rules")]
    ColumnCountMismatch { columns: usize, rules: usize },

    #[error("column {column} matches no unassigned rule")]
    Contradiction { column: usize },

    #[error("resolution stalled with ambiguous columns {unresolved:?}")]
    Stalled { unresolved: Vec<usize> },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("product of \"{prefix}\" fields overflows u64")]
    Overflow { prefix: &'static str },

    #[error("reference ticket has no value at column {column}")]
    MissingColumn { column: usize },
}
