//! Fail-fast shape checking

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use uuid::Uuid;

use super::{Format, Schema, ValidationError};

const HYPHENATED_UUID_LEN: usize = 36;
const DATE_LEN: usize = 10;

impl Format {
    pub fn matches(&self, s: &str) -> bool {
        match self {
            Format::Uuid => s.len() == HYPHENATED_UUID_LEN && Uuid::try_parse(s).is_ok(),
            Format::Date => {
                s.len() == DATE_LEN && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
            }
            Format::DateTime => DateTime::parse_from_rfc3339(s).is_ok(),
            Format::Uri => {
                let rest = s
                    .strip_prefix("https://")
                    .or_else(|| s.strip_prefix("http://"));
                match rest {
                    Some(rest) => !rest.is_empty() && !rest.chars().any(char::is_whitespace),
                    None => false,
                }
            }
        }
    }
}

impl Schema {
    /// Check `value` against this schema. The first mismatch wins.
    pub fn check(&self, value: &Value, path: &str) -> Result<(), ValidationError> {
        match (self, value) {
            (Schema::Nullable(_), Value::Null) => Ok(()),
            (Schema::Nullable(inner), _) => inner.check(value, path),

            (
                Schema::String {
                    min_len,
                    max_len,
                    format,
                },
                Value::String(s),
            ) => {
                let len = s.chars().count();
                let too_short = len < *min_len;
                let too_long = max_len.is_some_and(|max| len > max);
                let bad_format = format.is_some_and(|f| !f.matches(s));
                if too_short || too_long || bad_format {
                    Err(self.mismatch(value, path))
                } else if s.contains('\0') {
                    Err(ValidationError::new(
                        path,
                        format!("{} without NUL characters", self.describe()),
                        value.clone(),
                    ))
                } else {
                    Ok(())
                }
            }

            (Schema::Integer { min, max }, Value::Number(n)) => match n.as_i64() {
                Some(i) if min.is_none_or(|m| i >= m) && max.is_none_or(|m| i <= m) => Ok(()),
                _ => Err(self.mismatch(value, path)),
            },

            (Schema::Boolean, Value::Bool(_)) => Ok(()),

            (Schema::Any, _) => Ok(()),

            (Schema::Enum(options), Value::String(s)) if options.contains(&s.as_str()) => Ok(()),

            (Schema::Array { items, max_items }, Value::Array(values)) => {
                if max_items.is_some_and(|max| values.len() > max) {
                    return Err(self.mismatch(value, path));
                }
                for (index, item) in values.iter().enumerate() {
                    items.check(item, &format!("{path}[{index}]"))?;
                }
                Ok(())
            }

            (Schema::Object(fields), Value::Object(map)) => {
                for field in fields {
                    let child = format!("{path}.{}", field.name);
                    match map.get(field.name) {
                        Some(member) => field.schema.check(member, &child)?,
                        None if field.required => {
                            return Err(ValidationError::new(
                                child,
                                field.schema.describe(),
                                Value::Null,
                            ));
                        }
                        None => {}
                    }
                }
                if let Some((key, member)) = map
                    .iter()
                    .find(|(key, _)| !fields.iter().any(|f| f.name == key.as_str()))
                {
                    return Err(ValidationError::unknown_property(
                        format!("{path}.{key}"),
                        member.clone(),
                    ));
                }
                Ok(())
            }

            _ => Err(self.mismatch(value, path)),
        }
    }

    fn mismatch(&self, value: &Value, path: &str) -> ValidationError {
        ValidationError::new(path, self.describe(), value.clone())
    }
}
