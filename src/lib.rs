//! CSV Codec Library
//! # Overview
//!
//! This library provides an RFC4180-style CSV codec: a decoder that turns a
//! stream of textual lines into structured tabular records, and an encoder
//! that turns structured records back into CSV text.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (errors, options, column specifications)
//! - [`io`] - The [`LineSource`] capability the decoder consumes
//! - [`core`] - Codec logic:
//!   - [`core::decoder`] - Record-level quote state machine
//!   - [`core::table`] - Table assembly and field-count enforcement
//!   - [`core::mapper`] - Header-aware row mapping to named records
//!   - [`core::encoder`] - Escaped CSV output from structured records
//!
//! # Decoding
//!
//! Decoding pulls one logical line at a time from a [`LineSource`] and
//! produces one record per call; a logical record may span physical lines
//! when a quoted field contains embedded newlines. Configurable separator
//! and comment characters, leading-space trimming, and a lazy-quotes mode
//! that tolerates malformed quoting as literal text are supported. Errors
//! are fatal to the in-progress call and carry 1-based line and column
//! diagnostics, with columns measured in characters.
//!
//! ```
//! use csv_codec::{read_table, DecodeOptions, StringSource};
//!
//! let mut source = StringSource::new("a,b\n\"c,d\",e\n");
//! let table = read_table(&mut source, &DecodeOptions::default()).unwrap();
//! assert_eq!(table[1][0], "c,d");
//! ```
//!
//! # Encoding
//!
//! Encoding walks per-column accessor paths through structured records
//! ([`serde_json::Value`]), awaits optional deferred transforms in strict
//! field order, and quotes fields only when their text contains the
//! separator, a quote, or a line break. Output is terminated by the
//! configured record terminator (CRLF by default) on every platform.

// Module declarations
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{encode, map_rows, parse, parse_str, read_table, ParseOutput, RecordDecoder};
pub use io::{LineSource, ReadLines, StringSource};
pub use types::{
    Column, CsvError, DecodeOptions, EncodeColumn, EncodeOptions, NamedRecord, ParseOptions,
    PathStep, Record, Table,
};
