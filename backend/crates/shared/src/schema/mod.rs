//! Declared Shapes
//!
//! A [`Schema`] describes the JSON shape a transport-supplied value must have.
//! The same object drives four things:
//! - `check` - fail-fast validation that reports the offending field path
//! - [`decode`] - validate, then deserialize into a typed value
//! - `coerce_query` - turn query-string pairs into the equivalent JSON object
//! - `strategy` - a proptest strategy over conforming values (feature `proptest`)
//!
//! Paths are rendered from a caller-chosen root, e.g. `$input.files[0].url`.

mod check;
mod query;
#[cfg(feature = "proptest")]
mod strategy;

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// String formats understood by [`Schema::String`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Hyphenated UUID, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`
    Uuid,
    /// Calendar date, `YYYY-MM-DD`
    Date,
    /// RFC 3339 timestamp
    DateTime,
    /// Absolute `http`/`https` URL
    Uri,
}

impl Format {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Format::Uuid => "uuid",
            Format::Date => "date",
            Format::DateTime => "date-time",
            Format::Uri => "uri",
        }
    }
}

/// Shape of a JSON value
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String {
        min_len: usize,
        max_len: Option<usize>,
        format: Option<Format>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Boolean,
    /// One of a fixed set of strings
    Enum(&'static [&'static str]),
    Array {
        items: Box<Schema>,
        max_items: Option<usize>,
    },
    /// Closed object: unknown keys are rejected
    Object(Vec<Field>),
    /// Inner shape or `null`
    Nullable(Box<Schema>),
    /// Any JSON value
    Any,
}

/// Named member of an object schema
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
}

impl Field {
    pub fn required(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            schema,
            required: true,
        }
    }

    /// May be absent; `null` is only accepted when the schema is nullable.
    pub fn optional(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            schema,
            required: false,
        }
    }

    /// Accepted with any value and never read.
    pub fn ignored(name: &'static str) -> Self {
        Self::optional(name, Schema::Any)
    }
}

impl Schema {
    // ========================================================================
    // Constructors
    // ========================================================================

    pub fn string() -> Self {
        Schema::String {
            min_len: 0,
            max_len: None,
            format: None,
        }
    }

    fn formatted(format: Format) -> Self {
        Schema::String {
            min_len: 0,
            max_len: None,
            format: Some(format),
        }
    }

    pub fn uuid() -> Self {
        Self::formatted(Format::Uuid)
    }

    pub fn date() -> Self {
        Self::formatted(Format::Date)
    }

    pub fn date_time() -> Self {
        Self::formatted(Format::DateTime)
    }

    pub fn uri() -> Self {
        Self::formatted(Format::Uri)
    }

    pub fn integer() -> Self {
        Schema::Integer {
            min: None,
            max: None,
        }
    }

    pub fn boolean() -> Self {
        Schema::Boolean
    }

    pub fn one_of(options: &'static [&'static str]) -> Self {
        Schema::Enum(options)
    }

    pub fn array(items: Schema) -> Self {
        Schema::Array {
            items: Box::new(items),
            max_items: None,
        }
    }

    pub fn object(fields: Vec<Field>) -> Self {
        Schema::Object(fields)
    }

    // ========================================================================
    // Refinements (no-ops on variants they do not apply to)
    // ========================================================================

    pub fn nullable(self) -> Self {
        Schema::Nullable(Box::new(self))
    }

    pub fn min_length(mut self, n: usize) -> Self {
        if let Schema::String { min_len, .. } = &mut self {
            *min_len = n;
        }
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        if let Schema::String { max_len, .. } = &mut self {
            *max_len = Some(n);
        }
        self
    }

    pub fn minimum(mut self, n: i64) -> Self {
        if let Schema::Integer { min, .. } = &mut self {
            *min = Some(n);
        }
        self
    }

    pub fn maximum(mut self, n: i64) -> Self {
        if let Schema::Integer { max, .. } = &mut self {
            *max = Some(n);
        }
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        if let Schema::Array { max_items, .. } = &mut self {
            *max_items = Some(n);
        }
        self
    }

    /// Human-readable description used as the `expected` part of errors
    pub fn describe(&self) -> String {
        match self {
            Schema::String {
                min_len,
                max_len,
                format,
            } => {
                let mut out = match format {
                    Some(format) => format!("string ({})", format.as_str()),
                    None => "string".to_string(),
                };
                match (min_len, max_len) {
                    (0, None) => {}
                    (min, None) => out.push_str(&format!(" of at least {min} chars")),
                    (min, Some(max)) => out.push_str(&format!(" of {min}..={max} chars")),
                }
                out
            }
            Schema::Integer { min, max } => match (min, max) {
                (None, None) => "integer".to_string(),
                (Some(min), None) => format!("integer >= {min}"),
                (None, Some(max)) => format!("integer <= {max}"),
                (Some(min), Some(max)) => format!("integer in {min}..={max}"),
            },
            Schema::Boolean => "boolean".to_string(),
            Schema::Enum(options) => {
                let quoted: Vec<String> = options.iter().map(|o| format!("\"{o}\"")).collect();
                format!("one of {}", quoted.join(" | "))
            }
            Schema::Array { items, max_items } => match max_items {
                Some(max) => format!("array of {} (at most {max})", items.describe()),
                None => format!("array of {}", items.describe()),
            },
            Schema::Object(_) => "object".to_string(),
            Schema::Nullable(inner) => format!("{} | null", inner.describe()),
            Schema::Any => "any value".to_string(),
        }
    }
}

/// Shape validation failure
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("invalid value at {path}: expected {expected}")]
    Mismatch {
        path: String,
        expected: String,
        value: Value,
    },
    #[error("unknown property at {path}")]
    UnknownProperty { path: String, value: Value },
}

impl ValidationError {
    pub fn new(path: impl Into<String>, expected: impl Into<String>, value: Value) -> Self {
        ValidationError::Mismatch {
            path: path.into(),
            expected: expected.into(),
            value,
        }
    }

    pub fn unknown_property(path: impl Into<String>, value: Value) -> Self {
        ValidationError::UnknownProperty {
            path: path.into(),
            value,
        }
    }

    /// Path of the offending field, e.g. `$input.files[1].url`
    pub fn path(&self) -> &str {
        match self {
            ValidationError::Mismatch { path, .. }
            | ValidationError::UnknownProperty { path, .. } => path,
        }
    }

    pub fn expected(&self) -> &str {
        match self {
            ValidationError::Mismatch { expected, .. } => expected,
            ValidationError::UnknownProperty { .. } => "no such property",
        }
    }

    /// The rejected value (`null` when the field was missing)
    pub fn value(&self) -> &Value {
        match self {
            ValidationError::Mismatch { value, .. }
            | ValidationError::UnknownProperty { value, .. } => value,
        }
    }
}

/// A type with a declared wire shape
pub trait Schematic {
    fn schema() -> Schema;
}

/// Validate `value` against `T`'s schema, then deserialize it.
pub fn decode<T>(value: Value, path: &str) -> Result<T, ValidationError>
where
    T: Schematic + DeserializeOwned,
{
    T::schema().check(&value, path)?;
    serde_json::from_value(value)
        .map_err(|err| ValidationError::new(path, err.to_string(), Value::Null))
}

/// Assert that a produced value has `T`'s shape.
pub fn conforms<T: Schematic>(value: &Value) -> Result<(), ValidationError> {
    T::schema().check(value, "$output")
}
