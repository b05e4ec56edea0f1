//! Error types for statement compilation.
//!
//! Every error here is deterministic and input-dependent: it is raised
//! synchronously from the render call, never deferred to execution time.
//! A failed render returns no partial SQL.

use std::fmt;

/// The primary error type for statement compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// INSERT with an empty column list.
    EmptyColumns,
    /// INSERT with no rowsets.
    EmptyRowsets,
    /// INSERT rowset length does not match the column count.
    RowsetArity {
        /// Number of columns declared on the statement.
        expected: usize,
        /// Flattened length of the offending rowset.
        found: usize,
    },
    /// UPDATE with no column assignments.
    EmptySetClause,
    /// A `(` token was never matched by a `)` before end of input.
    UnclosedGroup,
    /// A `)` token appeared with no group open.
    UnbalancedGroup,
    /// Condition groups nested deeper than the hardening limit.
    GroupDepthExceeded {
        /// The enforced nesting limit.
        limit: usize,
    },
    /// An `IN` comparison against an array with zero values.
    EmptyInList,
    /// BETWEEN without a second bound, or a second bound on another operator.
    MalformedBetween,
    /// OFFSET rendered without LIMIT on a dialect that rejects it.
    OffsetWithoutLimit {
        /// Name of the offending dialect.
        dialect: &'static str,
    },
    /// Aggregate shorthand called with an unsupported function name.
    UnknownAggregate(String),
    /// Custom error with message.
    Custom(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyColumns => {
                write!(f, "unable to build insert statement, columns must be set")
            }
            Error::EmptyRowsets => write!(
                f,
                "unable to build insert statement, at least one rowset must be provided"
            ),
            Error::RowsetArity { expected, found } => write!(
                f,
                "insert rowset has {found} values, statement declares {expected} columns"
            ),
            Error::EmptySetClause => {
                write!(f, "unable to build update statement, no columns to assign")
            }
            Error::UnclosedGroup => {
                write!(f, "unable to build where statement, unclosed where group")
            }
            Error::UnbalancedGroup => {
                write!(f, "unable to build where statement, unexpected group close")
            }
            Error::GroupDepthExceeded { limit } => {
                write!(f, "where groups nested deeper than {limit} levels")
            }
            Error::EmptyInList => write!(f, "IN condition requires at least one value"),
            Error::MalformedBetween => {
                write!(f, "exactly two bounds required for a between condition")
            }
            Error::OffsetWithoutLimit { dialect } => {
                write!(f, "{dialect} does not support OFFSET without LIMIT")
            }
            Error::UnknownAggregate(name) => write!(f, "unknown aggregation method '{name}'"),
            Error::Custom(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type alias for compilation.
pub type Result<T> = std::result::Result<T, Error>;
