//! Core data types for the CSV codec
//!
//! # Components
//!
//! - `error` - Error taxonomy with line/column diagnostics
//! - `column` - Decode and encode column specifications
//! - `options` - Decode, parse, and encode configuration

pub mod column;
pub mod error;
pub mod options;

pub use column::{Column, EncodeColumn, ParseFn, PathStep, RowFn, TransformFn};
pub use error::CsvError;
pub use options::{DecodeOptions, EncodeOptions, ParseOptions};

/// One decoded row as an ordered sequence of field strings.
///
/// A logical record may span multiple physical lines when a quoted field
/// contains embedded newlines; the embedded content is preserved exactly.
pub type Record = Vec<String>;

/// The full ordered sequence of records from one decode pass.
pub type Table = Vec<Record>;

/// A row represented as a column-name-to-value mapping after header
/// application. Repeated column names are not deduplicated; the last
/// assignment wins.
pub type NamedRecord = serde_json::Map<String, serde_json::Value>;
