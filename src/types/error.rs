//! Error types for the CSV codec
//!
//! This module defines all error types that can occur while decoding or
//! encoding CSV data. Errors are designed to pinpoint failures precisely:
//! decode errors carry the 1-based record start line, the physical line at
//! the point of failure, and a 1-based column measured in characters (not
//! bytes), so diagnostics stay correct under multi-byte content.
//!
//! # Error Categories
//!
//! - **Quoting errors**: bare quotes in unquoted fields, malformed or
//!   unterminated quoted fields (strict mode only)
//! - **Shape errors**: record field count mismatches, row/header length
//!   mismatches during named mapping
//! - **Configuration errors**: invalid delimiter choices, separator
//!   colliding with the quote or record terminator
//! - **Accessor errors**: encode-side path steps applied to the wrong
//!   value shape
//! - **I/O errors**: failures while fetching lines from the source

use thiserror::Error;

/// Message text for a bare quote inside an unquoted field.
pub const ERR_BARE_QUOTE: &str = "bare \" in non-quoted-field";
/// Message text for a malformed or unterminated quoted field.
pub const ERR_QUOTE: &str = "extraneous or missing \" in quoted-field";
/// Message text for a record whose field count breaks the table shape.
pub const ERR_FIELD_COUNT: &str = "wrong number of fields";

/// Main error type for the CSV codec
///
/// This enum represents all possible errors that can occur while decoding
/// or encoding. Every decode error is fatal to the in-progress call; there
/// is no partial-record recovery. Callers that want skip-bad-line semantics
/// catch the error and resume at the next record boundary using the
/// reported line number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CsvError {
    /// A quote character appeared inside an unquoted field
    ///
    /// Raised only in strict mode; with lazy quotes enabled the quote is
    /// accepted as literal field content instead.
    #[error("{}", locate(*start_line, *line, *column, ERR_BARE_QUOTE))]
    BareQuote {
        /// 1-based line where the record started
        start_line: u64,
        /// 1-based physical line at the point of failure
        line: u64,
        /// 1-based column of the offending quote, in characters
        column: usize,
    },

    /// A quoted field was malformed or never terminated
    ///
    /// Covers a closing quote followed by stray content as well as input
    /// that ends inside an open quoted field. Strict mode only.
    #[error("{}", locate(*start_line, *line, *column, ERR_QUOTE))]
    Quote {
        /// 1-based line where the record started
        start_line: u64,
        /// 1-based physical line at the point of failure
        line: u64,
        /// 1-based column of the offending position, in characters
        column: usize,
    },

    /// A record's field count differs from the declared or inferred count
    #[error("record on line {line}: {ERR_FIELD_COUNT} (expected {expected}, got {got})")]
    FieldCount {
        /// 1-based line of the offending record
        line: u64,
        /// Declared or inferred field count for the table
        expected: usize,
        /// Actual field count of the offending record
        got: usize,
    },

    /// A data row's length differs from the header length during mapping
    #[error("row {row}: {got} fields but header defines {expected}")]
    RowShape {
        /// 1-based index of the offending row within the decoded table
        row: u64,
        /// Number of header columns in effect
        expected: usize,
        /// Actual field count of the offending row
        got: usize,
    },

    /// The decode separator or comment character is unusable
    ///
    /// The separator and comment must differ from each other and neither
    /// may be a quote, carriage return, or line feed.
    #[error(
        "invalid delimiter: separator and comment must differ and cannot be a quote or line break"
    )]
    InvalidDelimiter,

    /// The encode separator collides with the quote or record terminator
    #[error("separator cannot be the quotation mark or part of the record terminator")]
    SeparatorConflict,

    /// An encode-side accessor path step was applied to the wrong shape
    ///
    /// A named step reached a sequence, where only a numeric index is
    /// meaningful.
    #[error("property accessor '{step}' is not an index into a sequence")]
    AccessorType {
        /// The named step that was applied to a sequence
        step: String,
    },

    /// I/O error occurred while fetching lines from the source
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
    },
}

/// Format a located decode error: one shape for single-line records,
/// another when the record spans physical lines.
fn locate(start_line: u64, line: u64, column: usize, message: &str) -> String {
    if start_line != line {
        format!(
            "record on line {start_line}; parse error on line {line}, column {column}: {message}"
        )
    } else {
        format!("parse error on line {line}, column {column}: {message}")
    }
}

// Conversion from io::Error to CsvError
impl From<std::io::Error> for CsvError {
    fn from(error: std::io::Error) -> Self {
        CsvError::Io {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl CsvError {
    /// Create a BareQuote error
    pub fn bare_quote(start_line: u64, line: u64, column: usize) -> Self {
        CsvError::BareQuote {
            start_line,
            line,
            column,
        }
    }

    /// Create a Quote error
    pub fn quote(start_line: u64, line: u64, column: usize) -> Self {
        CsvError::Quote {
            start_line,
            line,
            column,
        }
    }

    /// Create a FieldCount error
    pub fn field_count(line: u64, expected: usize, got: usize) -> Self {
        CsvError::FieldCount {
            line,
            expected,
            got,
        }
    }

    /// Create a RowShape error
    pub fn row_shape(row: u64, expected: usize, got: usize) -> Self {
        CsvError::RowShape { row, expected, got }
    }

    /// Create an AccessorType error
    pub fn accessor_type(step: &str) -> Self {
        CsvError::AccessorType {
            step: step.to_string(),
        }
    }
}
