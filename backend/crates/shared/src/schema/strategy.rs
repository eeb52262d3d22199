//! Generated conforming values
//!
//! A [`Schema`] doubles as a proptest strategy, so tests draw inputs of the
//! declared shape and shrink failures toward smaller ones.

use chrono::{DateTime, Duration, NaiveDate, SecondsFormat, Utc};
use proptest::collection;
use proptest::prelude::*;
use proptest::sample::select;
use serde_json::{Map, Value};

use super::{Format, Schema};

/// Extra length allowed above the minimum when no maximum is declared
const OPEN_LENGTH_SPAN: usize = 16;
/// Upper bound on generated array lengths
const GENERATED_ITEMS_MAX: usize = 3;
/// Days from 2000-01-01 to 2029-12-31
const DATE_SPAN_DAYS: i64 = 10_957;
/// 2000-01-01T00:00:00Z
const EPOCH_2000: i64 = 946_684_800;
/// 2030-01-01T00:00:00Z
const EPOCH_2030: i64 = 1_893_456_000;

const ALPHANUMERIC: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b',
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u',
    'v', 'w', 'x', 'y', 'z',
];

impl Schema {
    /// Strategy over values that pass `self.check`.
    pub fn strategy(&self) -> BoxedStrategy<Value> {
        match self {
            Schema::String {
                min_len,
                max_len,
                format: Some(format),
            } => format_strategy(*format, *min_len, *max_len),
            Schema::String {
                min_len,
                max_len,
                format: None,
            } => {
                let max = max_len.unwrap_or(min_len + OPEN_LENGTH_SPAN).max(*min_len);
                alphanumeric(*min_len, max).prop_map(Value::String).boxed()
            }
            Schema::Integer { min, max } => {
                let lo = min.unwrap_or_else(|| max.map_or(0, |m| m.saturating_sub(1000)));
                let hi = max.unwrap_or_else(|| lo.saturating_add(1000)).max(lo);
                (lo..=hi).prop_map(Value::from).boxed()
            }
            Schema::Boolean => any::<bool>().prop_map(Value::Bool).boxed(),
            Schema::Enum(options) if options.is_empty() => Just(Value::Null).boxed(),
            Schema::Enum(options) => select(*options)
                .prop_map(|option| Value::String(option.to_string()))
                .boxed(),
            Schema::Array { items, max_items } => {
                let max = max_items
                    .unwrap_or(GENERATED_ITEMS_MAX)
                    .min(GENERATED_ITEMS_MAX);
                collection::vec(items.strategy(), 0..=max)
                    .prop_map(Value::Array)
                    .boxed()
            }
            Schema::Object(fields) => {
                let members: Vec<BoxedStrategy<Option<(String, Value)>>> = fields
                    .iter()
                    .filter(|field| field.schema != Schema::Any)
                    .map(|field| {
                        let name = field.name.to_string();
                        let value = field.schema.strategy();
                        if field.required {
                            value.prop_map(move |v| Some((name.clone(), v))).boxed()
                        } else {
                            proptest::option::of(value)
                                .prop_map(move |v| v.map(|v| (name.clone(), v)))
                                .boxed()
                        }
                    })
                    .collect();
                members
                    .prop_map(|members| {
                        Value::Object(members.into_iter().flatten().collect::<Map<_, _>>())
                    })
                    .boxed()
            }
            Schema::Nullable(inner) => {
                prop_oneof![1 => Just(Value::Null), 4 => inner.strategy()].boxed()
            }
            Schema::Any => Just(Value::Null).boxed(),
        }
    }
}

fn alphanumeric(min: usize, max: usize) -> impl Strategy<Value = String> {
    collection::vec(select(ALPHANUMERIC), min..=max).prop_map(|chars| chars.into_iter().collect())
}

fn format_strategy(format: Format, min_len: usize, max_len: Option<usize>) -> BoxedStrategy<Value> {
    match format {
        Format::Uuid => any::<[u8; 16]>()
            .prop_map(|bytes| {
                Value::String(
                    uuid::Builder::from_random_bytes(bytes)
                        .into_uuid()
                        .hyphenated()
                        .to_string(),
                )
            })
            .boxed(),
        Format::Date => (0..=DATE_SPAN_DAYS)
            .prop_map(|offset| {
                let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
                Value::String((start + Duration::days(offset)).format("%Y-%m-%d").to_string())
            })
            .boxed(),
        Format::DateTime => (EPOCH_2000..EPOCH_2030)
            .prop_map(|secs| {
                let at = DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default();
                Value::String(at.to_rfc3339_opts(SecondsFormat::Secs, true))
            })
            .boxed(),
        Format::Uri => {
            let prefix = "https://";
            let min_path = min_len.saturating_sub(prefix.len()).max(1);
            let max_path = max_len
                .map(|max| max.saturating_sub(prefix.len()))
                .unwrap_or(min_path + OPEN_LENGTH_SPAN)
                .max(min_path);
            alphanumeric(min_path, max_path)
                .prop_map(move |path| Value::String(format!("{prefix}{path}")))
                .boxed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;

    fn article_like() -> Schema {
        Schema::object(vec![
            Field::required("id", Schema::uuid()),
            Field::required("title", Schema::string().min_length(3).max_length(50)),
            Field::required("created_at", Schema::date_time()),
            Field::required("day", Schema::date()),
            Field::optional("limit", Schema::integer().minimum(1).maximum(100)),
            Field::required("order", Schema::one_of(&["asc", "desc"])),
            Field::required(
                "files",
                Schema::array(Schema::object(vec![
                    Field::required("url", Schema::uri().max_length(64)),
                    Field::required(
                        "extension",
                        Schema::string().min_length(1).max_length(8).nullable(),
                    ),
                ]))
                .max_items(2),
            ),
            Field::ignored("section"),
        ])
    }

    proptest! {
        #[test]
        fn generated_values_conform(value in article_like().strategy()) {
            prop_assert!(
                article_like().check(&value, "$generated").is_ok(),
                "generated {} does not conform",
                value
            );
        }

        #[test]
        fn ignored_fields_are_not_generated(value in article_like().strategy()) {
            prop_assert!(value.get("section").is_none());
        }

        #[test]
        fn unbounded_integers_conform(value in Schema::integer().maximum(-5).strategy()) {
            prop_assert!(Schema::integer().maximum(-5).check(&value, "$").is_ok());
        }

        #[test]
        fn unbounded_strings_conform(value in Schema::string().strategy()) {
            prop_assert!(Schema::string().check(&value, "$").is_ok());
        }
    }
}
