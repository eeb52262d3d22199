//! Query-string coercion
//!
//! Query parameters arrive as strings. Coercion uses the field schemas of an
//! object schema to turn them into the JSON value an equivalent body would
//! have carried, so both channels go through the same `check`/`decode`.

use serde_json::{Map, Value};

use super::{Schema, ValidationError};

impl Schema {
    /// Build a JSON object from `key=value` pairs.
    ///
    /// Unknown or repeated keys are rejected. Values that cannot be coerced
    /// are kept as strings so the subsequent `check` reports them with their
    /// path.
    pub fn coerce_query(
        &self,
        pairs: &[(String, String)],
        path: &str,
    ) -> Result<Value, ValidationError> {
        let Schema::Object(fields) = self else {
            return Err(ValidationError::new(path, self.describe(), Value::Null));
        };

        let mut map = Map::new();
        for (key, raw) in pairs {
            let child = format!("{path}.{key}");
            let Some(field) = fields.iter().find(|f| f.name == key.as_str()) else {
                return Err(ValidationError::unknown_property(
                    child,
                    Value::String(raw.clone()),
                ));
            };
            if map.contains_key(key.as_str()) {
                return Err(ValidationError::new(
                    child,
                    field.schema.describe(),
                    Value::String(raw.clone()),
                ));
            }
            map.insert(key.clone(), field.schema.coerce_scalar(raw));
        }
        Ok(Value::Object(map))
    }

    fn coerce_scalar(&self, raw: &str) -> Value {
        match self {
            Schema::Integer { .. } => raw
                .parse::<i64>()
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(raw.to_string())),
            Schema::Boolean => match raw {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::String(raw.to_string()),
            },
            Schema::Nullable(_) if raw == "null" => Value::Null,
            Schema::Nullable(inner) => inner.coerce_scalar(raw),
            _ => Value::String(raw.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;
    use serde_json::json;

    fn page_schema() -> Schema {
        Schema::object(vec![
            Field::optional("page", Schema::integer().minimum(1)),
            Field::optional("order", Schema::one_of(&["asc", "desc"])),
            Field::optional("pinned", Schema::boolean()),
        ])
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_coerces_by_field_type() {
        let value = page_schema()
            .coerce_query(
                &pairs(&[("page", "2"), ("order", "asc"), ("pinned", "true")]),
                "$input",
            )
            .unwrap();
        assert_eq!(value, json!({ "page": 2, "order": "asc", "pinned": true }));
        assert!(page_schema().check(&value, "$input").is_ok());
    }

    #[test]
    fn test_empty_query_is_empty_object() {
        let value = page_schema().coerce_query(&[], "$input").unwrap();
        assert_eq!(value, json!({}));
    }

    #[test]
    fn test_uncoercible_value_fails_check_with_path() {
        let value = page_schema()
            .coerce_query(&pairs(&[("page", "two")]), "$input")
            .unwrap();
        let err = page_schema().check(&value, "$input").unwrap_err();
        assert_eq!(err.path(), "$input.page");
        assert_eq!(err.value(), &json!("two"));
    }

    #[test]
    fn test_unknown_and_repeated_keys() {
        let err = page_schema()
            .coerce_query(&pairs(&[("pages", "1")]), "$input")
            .unwrap_err();
        assert_eq!(err.path(), "$input.pages");
        assert_eq!(err.to_string(), "unknown property at $input.pages");

        let err = page_schema()
            .coerce_query(&pairs(&[("page", "1"), ("page", "2")]), "$input")
            .unwrap_err();
        assert_eq!(err.path(), "$input.page");
    }

    #[test]
    fn test_non_object_schema_rejected() {
        assert!(Schema::string().coerce_query(&[], "$input").is_err());
    }
}
