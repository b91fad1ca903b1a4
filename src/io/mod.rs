//! I/O module
//!
//! Supplies the line-source capability the decoder consumes. File handling
//! stays with the caller; the codec only pulls lines, one at a time.
//!
//! # Components
//!
//! - `line_source` - The [`LineSource`] trait plus buffered-reader and
//!   string-blob implementations

pub mod line_source;

pub use line_source::{LineSource, ReadLines, StringSource};
