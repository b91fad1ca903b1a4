//! Header-aware row mapper and the full decode entry point
//!
//! Converts raw table rows into named-field records using a header
//! specification: either "first row is header" or an explicit column list.
//! Explicit columns override derived names entirely while row lengths are
//! still validated against them. Per-column parse transforms and the
//! whole-row transform are deferred computations awaited in strict field
//! order, so output ordering is deterministic regardless of how each
//! transform completes.

use crate::core::table::read_table;
use crate::io::{LineSource, StringSource};
use crate::types::{CsvError, NamedRecord, ParseOptions, Table};
use serde_json::Value;

/// Result of the full decode entry point
///
/// Raw tables come back when no header layer is in effect; named records
/// otherwise, or when a row transform reshapes raw rows.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutput {
    /// Raw decoded rows
    Table(Table),
    /// Mapped (and possibly transformed) records
    Records(Vec<Value>),
}

/// Map table rows to named records
///
/// When `skip_first_row` is set the first row is consumed as header names
/// and excluded from the output. Explicit `columns` take precedence over
/// derived names. Repeated column names are not deduplicated; the last
/// assignment wins.
///
/// # Errors
///
/// [`CsvError::RowShape`] if a data row's length differs from the header
/// length, naming the row's 1-based position within the table.
pub async fn map_rows(table: Table, options: &ParseOptions) -> Result<Vec<Value>, CsvError> {
    let mut rows = table.into_iter();
    let mut row_index: u64 = 0;

    let derived = if options.skip_first_row {
        let header = rows.next();
        if header.is_some() {
            row_index += 1;
        }
        header
    } else {
        None
    };

    let (names, parses): (Vec<String>, Vec<Option<&crate::types::ParseFn>>) =
        match (&options.columns, derived) {
            (Some(columns), _) => columns
                .iter()
                .map(|column| (column.name.clone(), column.parse.as_ref()))
                .unzip(),
            (None, Some(header)) => {
                let count = header.len();
                (header, vec![None; count])
            }
            (None, None) => (Vec::new(), Vec::new()),
        };

    let mut records = Vec::new();
    for row in rows {
        row_index += 1;
        if row.len() != names.len() {
            return Err(CsvError::row_shape(row_index, names.len(), row.len()));
        }

        let mut object = NamedRecord::new();
        for (j, raw) in row.iter().enumerate() {
            let value = match parses[j] {
                Some(parse) => parse(raw).await,
                None => Value::String(raw.clone()),
            };
            object.insert(names[j].clone(), value);
        }

        let mut value = Value::Object(object);
        if let Some(transform) = &options.row_transform {
            value = transform(value).await;
        }
        records.push(value);
    }

    Ok(records)
}

/// Decode from a line source
///
/// Produces a raw [`ParseOutput::Table`] unless `skip_first_row` or
/// `columns` is set, in which case rows are mapped to named records. A row
/// transform supplied without a header layer maps each raw row, rendered
/// as a JSON array of its field strings, through the transform.
pub async fn parse<S: LineSource>(
    source: &mut S,
    options: &ParseOptions,
) -> Result<ParseOutput, CsvError> {
    let table = read_table(source, &options.decode)?;

    if options.skip_first_row || options.columns.is_some() {
        return Ok(ParseOutput::Records(map_rows(table, options).await?));
    }

    if let Some(transform) = &options.row_transform {
        let mut records = Vec::with_capacity(table.len());
        for row in table {
            let raw = Value::Array(row.into_iter().map(Value::String).collect());
            records.push(transform(raw).await);
        }
        return Ok(ParseOutput::Records(records));
    }

    Ok(ParseOutput::Table(table))
}

/// Decode from a raw text blob
pub async fn parse_str(input: &str, options: &ParseOptions) -> Result<ParseOutput, CsvError> {
    parse(&mut StringSource::new(input), options).await
}
