//! Table-level decoder
//!
//! Repeatedly invokes the record decoder to assemble a full table,
//! dropping blank and comment lines and enforcing a uniform field count
//! across records when requested.

use crate::core::decoder::RecordDecoder;
use crate::io::LineSource;
use crate::types::{CsvError, DecodeOptions, Table};

const INVALID_DELIMITERS: [char; 3] = ['\r', '\n', '"'];

/// Validate separator and comment choices before any line is fetched
pub(crate) fn check_options(options: &DecodeOptions) -> Result<(), CsvError> {
    if INVALID_DELIMITERS.contains(&options.separator)
        || options
            .comment
            .is_some_and(|comment| INVALID_DELIMITERS.contains(&comment))
        || Some(options.separator) == options.comment
    {
        return Err(CsvError::InvalidDelimiter);
    }
    Ok(())
}

/// Decode a full table from the source
///
/// Records of length zero (blank lines, comment lines) are dropped and do
/// not count toward field-count validation. With
/// `fields_per_record: Some(0)` the first kept record locks the expected
/// count; with `Some(n)` the count is `n` from the start.
///
/// # Errors
///
/// - [`CsvError::InvalidDelimiter`] if the separator or comment character
///   is a quote or line break, or the two collide
/// - [`CsvError::FieldCount`] if a kept record's length differs from the
///   locked or declared count, naming the record's starting line
/// - Any record-level decode error, unchanged
pub fn read_table<S: LineSource>(
    source: &mut S,
    options: &DecodeOptions,
) -> Result<Table, CsvError> {
    check_options(options)?;

    let mut decoder = RecordDecoder::new();
    let mut rows: Table = Vec::new();
    let mut locked = match options.fields_per_record {
        Some(n) if n > 0 => Some(n),
        _ => None,
    };
    let infer = options.fields_per_record == Some(0);

    loop {
        let start_line = decoder.line() + 1;
        let Some(record) = decoder.read_record(source, options)? else {
            break;
        };
        if record.is_empty() {
            continue;
        }
        if infer && locked.is_none() {
            locked = Some(record.len());
        }
        if let Some(expected) = locked {
            if record.len() != expected {
                return Err(CsvError::field_count(start_line, expected, record.len()));
            }
        }
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::StringSource;
    use rstest::rstest;

    fn decode(input: &str, options: &DecodeOptions) -> Result<Table, CsvError> {
        read_table(&mut StringSource::new(input), options)
    }

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_blank_and_comment_lines_are_dropped() {
        let options = DecodeOptions {
            comment: Some('#'),
            ..DecodeOptions::default()
        };
        let table = decode("# comment\na,b\n\nc,d\n# trailing\n", &options).unwrap();
        assert_eq!(table, vec![row(&["a", "b"]), row(&["c", "d"])]);
    }

    #[test]
    fn test_no_field_count_check_by_default() {
        let table = decode("a,b\nc\nd,e,f\n", &DecodeOptions::default()).unwrap();
        assert_eq!(
            table,
            vec![row(&["a", "b"]), row(&["c"]), row(&["d", "e", "f"])]
        );
    }

    #[test]
    fn test_inferred_field_count_rejects_shorter_row() {
        let options = DecodeOptions {
            fields_per_record: Some(0),
            ..DecodeOptions::default()
        };
        let err = decode("a,b\nc\n", &options).unwrap_err();
        assert_eq!(
            err,
            CsvError::FieldCount {
                line: 2,
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn test_inferred_count_locks_from_first_kept_record() {
        // Comment and blank lines before the first data row must not
        // establish the count.
        let options = DecodeOptions {
            comment: Some('#'),
            fields_per_record: Some(0),
            ..DecodeOptions::default()
        };
        let table = decode("# note\n\na,b\nc,d\n", &options).unwrap();
        assert_eq!(table, vec![row(&["a", "b"]), row(&["c", "d"])]);

        let err = decode("# note\na,b\nc,d,e\n", &options).unwrap_err();
        assert_eq!(
            err,
            CsvError::FieldCount {
                line: 3,
                expected: 2,
                got: 3
            }
        );
    }

    #[rstest]
    #[case::matches("a,b,c\nd,e,f\n", 3, true)]
    #[case::first_row_violates("a,b\nc,d\n", 3, false)]
    fn test_declared_field_count(#[case] input: &str, #[case] declared: usize, #[case] ok: bool) {
        let options = DecodeOptions {
            fields_per_record: Some(declared),
            ..DecodeOptions::default()
        };
        assert_eq!(decode(input, &options).is_ok(), ok);
    }

    #[test]
    fn test_multi_line_record_error_line_is_physical() {
        // Record 2 occupies physical lines 2-3; the bad record starts on
        // physical line 4.
        let options = DecodeOptions {
            fields_per_record: Some(0),
            ..DecodeOptions::default()
        };
        let err = decode("a,b\n\"x\ny\",z\nonly-one\n", &options).unwrap_err();
        assert_eq!(
            err,
            CsvError::FieldCount {
                line: 4,
                expected: 2,
                got: 1
            }
        );
    }

    #[rstest]
    #[case::quote_separator('"', None)]
    #[case::newline_separator('\n', None)]
    #[case::carriage_return_separator('\r', None)]
    #[case::quote_comment(',', Some('"'))]
    #[case::separator_equals_comment(';', Some(';'))]
    fn test_invalid_delimiters(#[case] separator: char, #[case] comment: Option<char>) {
        let options = DecodeOptions {
            separator,
            comment,
            ..DecodeOptions::default()
        };
        assert_eq!(decode("a,b\n", &options).unwrap_err(), CsvError::InvalidDelimiter);
    }

    #[test]
    fn test_empty_input_decodes_to_empty_table() {
        let table = decode("", &DecodeOptions::default()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_decode_error_aborts_whole_call() {
        let err = decode("a,b\nc\"d,e\nf,g\n", &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, CsvError::BareQuote { .. }));
    }
}
