//! Encoder from structured records to CSV text
//!
//! Walks each column's accessor path against the source record, awaits the
//! optional per-column transform, and emits correctly escaped fields. A
//! field is quoted only when necessary: when its text contains the
//! separator, a quote, or a line break. Output lines are terminated by the
//! configured record terminator regardless of the host platform.

use crate::types::{CsvError, EncodeColumn, EncodeOptions, PathStep};
use serde_json::Value;

const QUOTE: char = '"';

/// Resolve an accessor path against a source record
///
/// Numeric steps index into sequences (out-of-range resolves to null);
/// named steps index into mappings (missing keys resolve to null, numeric
/// steps resolve through their decimal string). A primitive reached before
/// the path is exhausted terminates the walk and is used as-is.
fn resolve_path<'a>(record: &'a Value, path: &[PathStep]) -> Result<&'a Value, CsvError> {
    let mut value = record;
    for step in path {
        match (value, step) {
            (Value::Array(items), PathStep::Indexed(index)) => {
                value = items.get(*index).unwrap_or(&Value::Null);
            }
            (Value::Array(_), PathStep::Named(name)) => {
                return Err(CsvError::accessor_type(name));
            }
            (Value::Object(map), PathStep::Named(name)) => {
                value = map.get(name).unwrap_or(&Value::Null);
            }
            (Value::Object(map), PathStep::Indexed(index)) => {
                value = map.get(&index.to_string()).unwrap_or(&Value::Null);
            }
            // Primitive mid-path: keep it and ignore the remaining steps.
            _ => break,
        }
    }
    Ok(value)
}

/// Render a value as field text and escape it if needed
///
/// Null renders empty, strings verbatim, sequences and mappings as their
/// canonical JSON form, other primitives via their display form. Text
/// containing the separator, a quote, or any line break is wrapped in
/// quotes with inner quotes doubled.
fn escape_field(value: &Value, separator: char) -> String {
    let text = match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.contains(separator)
        || text.contains(QUOTE)
        || text.contains('\r')
        || text.contains('\n')
    {
        let mut escaped = String::with_capacity(text.len() + 2);
        escaped.push(QUOTE);
        escaped.push_str(&text.replace(QUOTE, "\"\""));
        escaped.push(QUOTE);
        return escaped;
    }
    text
}

/// Encode structured records as CSV text
///
/// Emits a header line (unless disabled) followed by one line per record.
/// Per-column transforms are awaited in field order before the next field
/// is produced, keeping output deterministic.
///
/// # Errors
///
/// - [`CsvError::SeparatorConflict`] if the separator is the quote, a line
///   break, or part of the record terminator
/// - [`CsvError::AccessorType`] if a named path step reaches a sequence
pub async fn encode(
    records: &[Value],
    columns: &[EncodeColumn],
    options: &EncodeOptions,
) -> Result<String, CsvError> {
    let separator = options.separator;
    if separator == QUOTE
        || separator == '\r'
        || separator == '\n'
        || options.terminator.contains(separator)
    {
        return Err(CsvError::SeparatorConflict);
    }

    let mut output = String::new();

    if options.headers {
        push_line(
            &mut output,
            columns
                .iter()
                .map(|column| escape_field(&Value::String(column.header.clone()), separator)),
            separator,
            &options.terminator,
        );
    }

    for record in records {
        let mut fields = Vec::with_capacity(columns.len());
        for column in columns {
            let resolved = resolve_path(record, &column.path)?;
            let field = match &column.transform {
                Some(transform) => {
                    let transformed = transform(resolved.clone()).await;
                    escape_field(&transformed, separator)
                }
                None => escape_field(resolved, separator),
            };
            fields.push(field);
        }
        push_line(&mut output, fields.into_iter(), separator, &options.terminator);
    }

    Ok(output)
}

fn push_line<I: Iterator<Item = String>>(
    output: &mut String,
    fields: I,
    separator: char,
    terminator: &str,
) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            output.push(separator);
        }
        output.push_str(&field);
    }
    output.push_str(terminator);
}
