//! Column specifications for decoding and encoding
//!
//! Decode-side [`Column`]s bind a header name to an optional per-value parse
//! transform. Encode-side [`EncodeColumn`]s bind an accessor path into a
//! structured record to a header label and an optional value transform.
//!
//! Transforms are deferred computations: they return a [`BoxFuture`] and are
//! awaited in strict field order by the mapper and the encoder, so output
//! ordering stays deterministic even when a transform suspends. Plain
//! closures are wrapped into already-resolved futures by the `with_*`
//! convenience constructors.

use futures::future::{ready, BoxFuture, FutureExt};
use serde_json::Value;
use std::fmt;

/// Per-column parse transform: raw field text to a structured value.
pub type ParseFn = Box<dyn Fn(&str) -> BoxFuture<'static, Value> + Send + Sync>;

/// Whole-row transform applied after a row has been assembled.
pub type RowFn = Box<dyn Fn(Value) -> BoxFuture<'static, Value> + Send + Sync>;

/// Encode-side value transform applied after accessor resolution.
pub type TransformFn = Box<dyn Fn(Value) -> BoxFuture<'static, Value> + Send + Sync>;

/// Decode-side column specification
///
/// Binds a column name to an optional parse transform. The order of a
/// `Column` sequence defines the output field order during row mapping.
pub struct Column {
    pub(crate) name: String,
    pub(crate) parse: Option<ParseFn>,
}

impl Column {
    /// Create a column that keeps its raw string value
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            parse: None,
        }
    }

    /// The column's output name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attach a synchronous parse transform
    pub fn with_parse<F>(mut self, parse: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.parse = Some(Box::new(move |raw: &str| ready(parse(raw)).boxed()));
        self
    }

    /// Attach a deferred parse transform
    ///
    /// The returned future is awaited before the next column's value is
    /// produced.
    pub fn with_async_parse<F>(mut self, parse: F) -> Self
    where
        F: Fn(&str) -> BoxFuture<'static, Value> + Send + Sync + 'static,
    {
        self.parse = Some(Box::new(parse));
        self
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("parse", &self.parse.is_some())
            .finish()
    }
}

/// One step of an encode-side accessor path
///
/// Named steps index into mappings; indexed steps index into sequences.
/// Modeling the path as a tagged variant (instead of stringly-typed lookups)
/// lets shape mismatches surface as a declared error rather than a silent
/// coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// A property name, resolved against a mapping
    Named(String),
    /// A position, resolved against a sequence
    Indexed(usize),
}

impl fmt::Display for PathStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathStep::Named(name) => f.write_str(name),
            PathStep::Indexed(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for PathStep {
    fn from(name: &str) -> Self {
        PathStep::Named(name.to_string())
    }
}

impl From<String> for PathStep {
    fn from(name: String) -> Self {
        PathStep::Named(name)
    }
}

impl From<usize> for PathStep {
    fn from(index: usize) -> Self {
        PathStep::Indexed(index)
    }
}

/// Encode-side column specification
///
/// Identifies where to read a value from a source record (an accessor path),
/// the header label to emit, and an optional value transform. The header
/// label defaults to the path's final step unless overridden.
pub struct EncodeColumn {
    pub(crate) path: Vec<PathStep>,
    pub(crate) header: String,
    pub(crate) transform: Option<TransformFn>,
}

impl EncodeColumn {
    /// Create a column reading a single named property
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        EncodeColumn {
            header: name.clone(),
            path: vec![PathStep::Named(name)],
            transform: None,
        }
    }

    /// Create a column reading a single sequence position
    pub fn index(index: usize) -> Self {
        EncodeColumn {
            header: index.to_string(),
            path: vec![PathStep::Indexed(index)],
            transform: None,
        }
    }

    /// Create a column reading through a nested accessor path
    ///
    /// The header label defaults to the final step's display form.
    pub fn path(steps: Vec<PathStep>) -> Self {
        let header = steps.last().map(PathStep::to_string).unwrap_or_default();
        EncodeColumn {
            path: steps,
            header,
            transform: None,
        }
    }

    /// The header label this column emits
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Override the header label
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Attach a synchronous value transform
    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(move |value| ready(transform(value)).boxed()));
        self
    }

    /// Attach a deferred value transform
    ///
    /// The returned future is awaited before the next field is emitted, so
    /// field order never depends on transform completion order.
    pub fn with_async_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(Value) -> BoxFuture<'static, Value> + Send + Sync + 'static,
    {
        self.transform = Some(Box::new(transform));
        self
    }
}

impl fmt::Debug for EncodeColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeColumn")
            .field("path", &self.path)
            .field("header", &self.header)
            .field("transform", &self.transform.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::named(PathStep::Named("age".to_string()), "age")]
    #[case::indexed(PathStep::Indexed(3), "3")]
    fn test_path_step_display(#[case] step: PathStep, #[case] expected: &str) {
        assert_eq!(step.to_string(), expected);
    }

    #[rstest]
    #[case::named(EncodeColumn::new("name"), "name")]
    #[case::indexed(EncodeColumn::index(2), "2")]
    #[case::nested(EncodeColumn::path(vec!["a".into(), "b".into()]), "b")]
    #[case::nested_index_tail(EncodeColumn::path(vec!["a".into(), 0.into()]), "0")]
    #[case::empty_path(EncodeColumn::path(vec![]), "")]
    #[case::overridden(EncodeColumn::new("koi_prad").with_header("radius"), "radius")]
    fn test_header_defaulting(#[case] column: EncodeColumn, #[case] expected: &str) {
        assert_eq!(column.header(), expected);
    }

    #[tokio::test]
    async fn test_sync_parse_is_wrapped_into_future() {
        let column = Column::new("n").with_parse(|raw| json!(raw.len()));
        let parse = column.parse.as_ref().unwrap();
        assert_eq!(parse("abcd").await, json!(4));
    }

    #[tokio::test]
    async fn test_sync_transform_is_wrapped_into_future() {
        let column = EncodeColumn::new("v").with_transform(|value| json!([value]));
        let transform = column.transform.as_ref().unwrap();
        assert_eq!(transform(json!(1)).await, json!([1]));
    }

    #[test]
    fn test_path_step_conversions() {
        let steps: Vec<PathStep> = vec!["planet".into(), 0.into(), String::from("name").into()];
        assert_eq!(
            steps,
            vec![
                PathStep::Named("planet".to_string()),
                PathStep::Indexed(0),
                PathStep::Named("name".to_string()),
            ]
        );
    }
}
