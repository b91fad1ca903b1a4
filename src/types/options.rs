//! Configuration options for decoding and encoding
//!
//! [`DecodeOptions`] and [`EncodeOptions`] are plain data and derive serde
//! traits so they can be loaded from configuration. [`ParseOptions`] extends
//! decoding with the header-mapping layer and therefore carries transform
//! closures; it is built in code.

use crate::types::column::{Column, RowFn};
use serde::{Deserialize, Serialize};

/// Options controlling record and table decoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Field separator, a single character
    pub separator: char,

    /// Comment marker; a line starting with it decodes as an empty record
    /// and is dropped by the table decoder
    pub comment: Option<char>,

    /// Strip leading whitespace before each field scan
    pub trim_leading_space: bool,

    /// Tolerate malformed quoting as literal text instead of failing
    ///
    /// When true, a bare quote inside an unquoted field, or a quote that
    /// does not open a correctly terminated quoted span, is kept verbatim
    /// rather than raising [`CsvError::BareQuote`] or [`CsvError::Quote`].
    ///
    /// [`CsvError::BareQuote`]: crate::types::CsvError::BareQuote
    /// [`CsvError::Quote`]: crate::types::CsvError::Quote
    pub lazy_quotes: bool,

    /// Field count enforcement for the table decoder
    ///
    /// - `None`: no check
    /// - `Some(0)`: infer and lock the count from the first non-empty record
    /// - `Some(n)`: every record must have exactly `n` fields
    pub fields_per_record: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            separator: ',',
            comment: None,
            trim_leading_space: false,
            lazy_quotes: false,
            fields_per_record: None,
        }
    }
}

/// Options for the full decode entry point
///
/// Extends [`DecodeOptions`] with the header-aware mapping layer. When
/// either `skip_first_row` or `columns` is set, decoding produces named
/// records instead of raw tables.
#[derive(Default)]
pub struct ParseOptions {
    /// Record- and table-level decode options
    pub decode: DecodeOptions,

    /// Consume the first row as header names and exclude it from output
    pub skip_first_row: bool,

    /// Explicit column specifications
    ///
    /// When present these override any header names derived from the first
    /// row, while row lengths are still validated against them.
    pub columns: Option<Vec<Column>>,

    /// Whole-row transform applied after per-column parsing
    pub row_transform: Option<RowFn>,
}

impl std::fmt::Debug for ParseOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseOptions")
            .field("decode", &self.decode)
            .field("skip_first_row", &self.skip_first_row)
            .field("columns", &self.columns)
            .field("row_transform", &self.row_transform.is_some())
            .finish()
    }
}

/// Options controlling encoding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeOptions {
    /// Emit a header line before the data rows
    pub headers: bool,

    /// Field separator, a single character
    pub separator: char,

    /// Record terminator appended after every line
    ///
    /// Output is terminator-stable across platforms: the configured
    /// sequence is emitted regardless of the host's native line ending.
    pub terminator: String,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            headers: true,
            separator: ',',
            terminator: "\r\n".to_string(),
        }
    }
}
