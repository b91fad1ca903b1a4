//! Line sources feeding the decoder
//!
//! The decoder consumes an abstract [`LineSource`]: one logical line at a
//! time, terminator stripped, with a zero-length lookahead to distinguish
//! "more data" from end of stream. The lookahead is what lets the record
//! decoder tell an unterminated quoted field apart from a quoted field that
//! simply ends at the last line of input.
//!
//! Two implementations ship with the crate:
//!
//! - [`ReadLines`] adapts any [`BufRead`], keeping memory usage at one
//!   physical line regardless of input size
//! - [`StringSource`] walks a raw text blob without copying
//!
//! Both accept CRLF and bare LF terminators. A source is owned by one decode
//! pass at a time; line fetches are strictly sequential.

use crate::types::CsvError;
use std::io::BufRead;

/// A supplier of logical lines of text
pub trait LineSource {
    /// Fetch the next line, without its terminator
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    fn next_line(&mut self) -> Result<Option<String>, CsvError>;

    /// Whether the source has no further data
    ///
    /// This is a lookahead: it must not consume input.
    fn at_eof(&mut self) -> Result<bool, CsvError>;
}

/// Line source over a buffered reader
///
/// Requires UTF-8 input; invalid data surfaces as [`CsvError::Io`].
#[derive(Debug)]
pub struct ReadLines<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ReadLines<R> {
    /// Wrap a buffered reader
    pub fn new(reader: R) -> Self {
        ReadLines { reader }
    }
}

impl<R: BufRead> LineSource for ReadLines<R> {
    fn next_line(&mut self) -> Result<Option<String>, CsvError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
        }
        if line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    fn at_eof(&mut self) -> Result<bool, CsvError> {
        Ok(self.reader.fill_buf()?.is_empty())
    }
}

/// Line source over a raw text blob
#[derive(Debug)]
pub struct StringSource<'a> {
    rest: &'a str,
}

impl<'a> StringSource<'a> {
    /// Wrap a text blob
    pub fn new(input: &'a str) -> Self {
        StringSource { rest: input }
    }
}

impl LineSource for StringSource<'_> {
    fn next_line(&mut self) -> Result<Option<String>, CsvError> {
        if self.rest.is_empty() {
            return Ok(None);
        }
        let line = match self.rest.find('\n') {
            Some(i) => {
                let line = &self.rest[..i];
                self.rest = &self.rest[i + 1..];
                line
            }
            None => {
                let line = self.rest;
                self.rest = "";
                line
            }
        };
        Ok(Some(line.strip_suffix('\r').unwrap_or(line).to_string()))
    }

    fn at_eof(&mut self) -> Result<bool, CsvError> {
        Ok(self.rest.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::Cursor;

    fn drain<S: LineSource>(source: &mut S) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = source.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[rstest]
    #[case::lf("a\nb\nc\n", vec!["a", "b", "c"])]
    #[case::crlf("a\r\nb\r\n", vec!["a", "b"])]
    #[case::mixed("a\r\nb\nc", vec!["a", "b", "c"])]
    #[case::no_trailing_newline("a\nb", vec!["a", "b"])]
    #[case::blank_lines("a\n\nb\n", vec!["a", "", "b"])]
    #[case::trailing_cr_at_eof("a\nb\r", vec!["a", "b"])]
    #[case::empty("", vec![])]
    #[case::interior_cr_preserved("a\rb\nc\n", vec!["a\rb", "c"])]
    fn test_read_lines(#[case] input: &str, #[case] expected: Vec<&str>) {
        let mut source = ReadLines::new(Cursor::new(input.as_bytes()));
        assert_eq!(drain(&mut source), expected);
        assert!(source.at_eof().unwrap());
    }

    #[rstest]
    #[case::lf("a\nb\nc\n", vec!["a", "b", "c"])]
    #[case::crlf("a\r\nb\r\n", vec!["a", "b"])]
    #[case::no_trailing_newline("a\nb", vec!["a", "b"])]
    #[case::blank_lines("a\n\nb\n", vec!["a", "", "b"])]
    #[case::trailing_cr_at_eof("a\nb\r", vec!["a", "b"])]
    #[case::empty("", vec![])]
    fn test_string_source(#[case] input: &str, #[case] expected: Vec<&str>) {
        let mut source = StringSource::new(input);
        assert_eq!(drain(&mut source), expected);
        assert!(source.at_eof().unwrap());
    }

    #[test]
    fn test_at_eof_is_a_lookahead() {
        let mut source = StringSource::new("a\nb");
        assert!(!source.at_eof().unwrap());
        assert_eq!(source.next_line().unwrap(), Some("a".to_string()));
        assert!(!source.at_eof().unwrap());
        assert_eq!(source.next_line().unwrap(), Some("b".to_string()));
        assert!(source.at_eof().unwrap());
        assert_eq!(source.next_line().unwrap(), None);
    }

    #[test]
    fn test_read_lines_rejects_invalid_utf8() {
        let mut source = ReadLines::new(Cursor::new(&[0xff, 0xfe, b'\n'][..]));
        assert!(matches!(source.next_line(), Err(CsvError::Io { .. })));
    }

    #[test]
    fn test_multibyte_content_passes_through() {
        let mut source = StringSource::new("příliš,žluťoučký\nkůň\n");
        assert_eq!(
            drain(&mut source),
            vec!["příliš,žluťoučký", "kůň"]
        );
    }
}
