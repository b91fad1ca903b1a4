//! Record-level decoder
//!
//! Turns raw input lines into one record (an ordered sequence of field
//! strings) per call, implementing the RFC4180-style quote state machine:
//! unquoted scanning with bare-quote detection, escaped-quote doubling
//! inside quoted spans, and quoted fields spanning physical lines.
//!
//! # Design
//!
//! The decoder scans the current physical line through a byte cursor,
//! switching between the unquoted and quoted field states. Field text is
//! appended to a single accumulation buffer and field boundaries are
//! recorded as byte offsets; the final record is sliced from the buffer
//! once the record ends. When an open quoted span reaches the end of a
//! physical line, the consumed text plus a newline is appended and the
//! next physical line is fetched into the same field, preserving the
//! record's starting line for error reporting.
//!
//! Error columns are measured in characters, not bytes, so positions stay
//! correct under multi-byte content, and are reported 1-based.

use crate::io::LineSource;
use crate::types::{CsvError, DecodeOptions, Record};

const QUOTE: char = '"';

/// 1-based character column of the given byte position within a line.
fn char_column(line: &str, byte_pos: usize) -> usize {
    line.char_indices().take_while(|(i, _)| *i < byte_pos).count() + 1
}

/// Record-level decoder over a line source
///
/// Tracks the number of physical lines fetched so far; all per-record scan
/// state is transient and discarded once a record is returned.
#[derive(Debug, Default)]
pub struct RecordDecoder {
    line: u64,
}

impl RecordDecoder {
    /// Create a decoder with its line counter at zero
    pub fn new() -> Self {
        RecordDecoder { line: 0 }
    }

    /// 1-based number of the last physical line fetched, 0 before any fetch
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Decode the next record from the source
    ///
    /// Returns `Ok(None)` at end of input. A blank line or a line starting
    /// with the comment character decodes as `Ok(Some(vec![]))`; the table
    /// decoder drops such records.
    ///
    /// # Errors
    ///
    /// In strict mode, malformed quoting fails with [`CsvError::BareQuote`]
    /// or [`CsvError::Quote`] carrying the record's starting line, the
    /// physical line at the point of failure, and the offending column.
    /// With `lazy_quotes` set, the same inputs decode with the quotes kept
    /// as literal text.
    pub fn read_record<S: LineSource>(
        &mut self,
        source: &mut S,
        options: &DecodeOptions,
    ) -> Result<Option<Record>, CsvError> {
        let Some(mut phys) = source.next_line()? else {
            return Ok(None);
        };
        self.line += 1;
        let start_line = self.line;

        if phys.is_empty() {
            return Ok(Some(Vec::new()));
        }
        if let Some(comment) = options.comment {
            if phys.starts_with(comment) {
                return Ok(Some(Vec::new()));
            }
        }

        let separator = options.separator;
        // Accumulation buffer for all field text, with byte offsets marking
        // each field's end.
        let mut buffer = String::new();
        let mut bounds: Vec<usize> = Vec::new();
        // Byte cursor into the current physical line.
        let mut pos = 0usize;

        'field: loop {
            if options.trim_leading_space {
                let rest = &phys[pos..];
                pos += rest.len() - rest.trim_start().len();
            }
            let rest = &phys[pos..];

            if rest.is_empty() || !rest.starts_with(QUOTE) {
                // Unquoted field: scan to the next separator or end of line.
                let end = match rest.find(separator) {
                    Some(i) => pos + i,
                    None => phys.len(),
                };
                let field = &phys[pos..end];
                if !options.lazy_quotes {
                    if let Some(j) = field.find(QUOTE) {
                        let column = char_column(&phys, pos + j);
                        return Err(CsvError::bare_quote(start_line, self.line, column));
                    }
                }
                buffer.push_str(field);
                bounds.push(buffer.len());
                if end < phys.len() {
                    pos = end + separator.len_utf8();
                    continue 'field;
                }
                break 'field;
            }

            // Quoted field: consume the opening quote, then scan for the
            // closing quote, possibly across physical lines.
            pos += QUOTE.len_utf8();
            loop {
                let rest = &phys[pos..];
                match rest.find(QUOTE) {
                    Some(i) => {
                        buffer.push_str(&rest[..i]);
                        pos += i + QUOTE.len_utf8();
                        let after = &phys[pos..];
                        if after.starts_with(QUOTE) {
                            // Escaped quote: emit one literal quote.
                            buffer.push(QUOTE);
                            pos += QUOTE.len_utf8();
                        } else if after.starts_with(separator) {
                            pos += separator.len_utf8();
                            bounds.push(buffer.len());
                            continue 'field;
                        } else if after.is_empty() {
                            bounds.push(buffer.len());
                            break 'field;
                        } else if options.lazy_quotes {
                            buffer.push(QUOTE);
                        } else {
                            let column = char_column(&phys, pos - QUOTE.len_utf8());
                            return Err(CsvError::quote(start_line, self.line, column));
                        }
                    }
                    None => {
                        if !rest.is_empty() || !source.at_eof()? {
                            // The quoted span continues past this physical
                            // line; pull the next one into the same field.
                            buffer.push_str(rest);
                            match source.next_line()? {
                                Some(next) => {
                                    self.line += 1;
                                    buffer.push('\n');
                                    phys = next;
                                    pos = 0;
                                }
                                None => {
                                    if !options.lazy_quotes {
                                        return Err(CsvError::quote(
                                            start_line,
                                            self.line + 1,
                                            1,
                                        ));
                                    }
                                    bounds.push(buffer.len());
                                    break 'field;
                                }
                            }
                        } else {
                            if !options.lazy_quotes {
                                let column = char_column(&phys, phys.len());
                                return Err(CsvError::quote(start_line, self.line, column));
                            }
                            bounds.push(buffer.len());
                            break 'field;
                        }
                    }
                }
            }
        }

        let mut record = Vec::with_capacity(bounds.len());
        let mut prev = 0;
        for bound in bounds {
            record.push(buffer[prev..bound].to_string());
            prev = bound;
        }
        Ok(Some(record))
    }
}
