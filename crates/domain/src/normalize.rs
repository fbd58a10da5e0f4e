//! Key/value argument normalization.
//!
//! Turns a loosely typed argument list (`key, value, key, value, field, ...`)
//! into validated [`Field`]s plus diagnostics. Malformed input never fails the
//! pass: offending elements are moved to the diagnostics and the rest is kept.

use crate::field::{Arg, Field, InvalidPair};
use serde_json::Value;

/// Message for a trailing key with no value.
pub const DANGLING_KEY_MESSAGE: &str = "Ignored key without a value.";

/// Message for pairs whose key is not a string.
pub const NON_STRING_KEYS_MESSAGE: &str = "Ignored key-value pairs with non-string keys.";

/// A problem found while normalizing one argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The last argument was a key with nothing after it.
    DanglingKey {
        /// Index of the key in the argument list.
        position: usize,
        /// The unpaired key.
        key: Value,
    },
    /// One or more pairs had a non-string key, in input order.
    NonStringKeys(Vec<InvalidPair>),
}

impl Diagnostic {
    /// Message of the diagnostic record.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::DanglingKey { .. } => DANGLING_KEY_MESSAGE,
            Self::NonStringKeys(_) => NON_STRING_KEYS_MESSAGE,
        }
    }

    /// Fields of the diagnostic record.
    #[must_use]
    pub fn into_fields(self) -> Vec<Field> {
        match self {
            Self::DanglingKey { position, key } => {
                vec![Field::new("ignored", key), Field::new("position", position)]
            },
            Self::NonStringKeys(pairs) => vec![Field::any("invalid", &pairs)],
        }
    }
}

/// Output of [`normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Validated fields in first-appearance order.
    pub fields: Vec<Field>,
    /// Diagnostics to report through the logger's own channel.
    pub diagnostics: Vec<Diagnostic>,
}

impl Normalized {
    /// True when the input was well formed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Normalize a key/value argument list in one left-to-right pass.
///
/// - A pre-typed [`Arg::Field`] is kept as-is.
/// - Any other element is a key and consumes the next element as its value.
/// - A key in last position is reported as dangling and ends the pass.
/// - A key that is not a JSON string is reported with its position and value;
///   all such pairs are collected into one [`Diagnostic::NonStringKeys`].
///
/// A pre-typed field in value position contributes its `{key: value}` object.
pub fn normalize(args: Vec<Arg>) -> Normalized {
    if args.is_empty() {
        return Normalized::default();
    }

    // Worst case every argument is a typed field.
    let total = args.len();
    let mut fields = Vec::with_capacity(total);
    let mut diagnostics = Vec::new();
    let mut invalid: Vec<InvalidPair> = Vec::new();

    let mut iter = args.into_iter().enumerate();
    while let Some((position, arg)) = iter.next() {
        let key = match arg {
            Arg::Field(field) => {
                fields.push(field);
                continue;
            },
            Arg::Value(key) => key,
        };

        let Some((_, value)) = iter.next() else {
            diagnostics.push(Diagnostic::DanglingKey { position, key });
            break;
        };

        let value = value.into_value();
        match key {
            Value::String(key) => fields.push(Field::new(key, value)),
            key => {
                // Subsequent errors are likely, so allocate once.
                if invalid.capacity() == 0 {
                    invalid.reserve(total / 2);
                }
                invalid.push(InvalidPair {
                    position,
                    key,
                    value,
                });
            },
        }
    }

    if !invalid.is_empty() {
        diagnostics.push(Diagnostic::NonStringKeys(invalid));
    }

    Normalized {
        fields,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn raw(values: Vec<Value>) -> Vec<Arg> {
        values.into_iter().map(Arg::Value).collect()
    }

    #[test]
    fn empty_input_is_clean_and_empty() {
        let normalized = normalize(Vec::new());
        assert!(normalized.fields.is_empty());
        assert!(normalized.is_clean());
        assert_eq!(normalized.fields.capacity(), 0);
    }

    #[test]
    fn string_key_pairs_become_fields() {
        let normalized = normalize(raw(vec![json!("a"), json!(1), json!("b"), json!(2)]));
        assert_eq!(
            normalized.fields,
            vec![Field::new("a", 1), Field::new("b", 2)]
        );
        assert!(normalized.is_clean());
    }

    #[test]
    fn trailing_key_is_reported_as_dangling() {
        let normalized = normalize(raw(vec![json!("a"), json!(1), json!("dangling")]));
        assert_eq!(normalized.fields, vec![Field::new("a", 1)]);
        assert_eq!(
            normalized.diagnostics,
            vec![Diagnostic::DanglingKey {
                position: 2,
                key: json!("dangling"),
            }]
        );
    }

    #[test]
    fn non_string_key_pair_is_diverted() {
        let normalized = normalize(raw(vec![json!(7), json!("x"), json!("a"), json!(1)]));
        assert_eq!(normalized.fields, vec![Field::new("a", 1)]);
        assert_eq!(
            normalized.diagnostics,
            vec![Diagnostic::NonStringKeys(vec![InvalidPair {
                position: 0,
                key: json!(7),
                value: json!("x"),
            }])]
        );
    }

    #[test]
    fn invalid_pairs_are_aggregated_once() {
        let normalized = normalize(raw(vec![
            json!(1),
            json!("one"),
            json!("ok"),
            json!(true),
            json!(null),
            json!("two"),
        ]));
        assert_eq!(normalized.fields, vec![Field::new("ok", true)]);
        assert_eq!(normalized.diagnostics.len(), 1);
        let positions: Vec<usize> = match normalized.diagnostics.first() {
            Some(Diagnostic::NonStringKeys(pairs)) => pairs.iter().map(|pair| pair.position).collect(),
            _ => Vec::new(),
        };
        assert_eq!(positions, vec![0, 4]);
    }

    #[test]
    fn dangling_and_invalid_are_both_reported() {
        let normalized = normalize(raw(vec![json!(1), json!(2), json!("tail")]));
        assert!(normalized.fields.is_empty());
        assert_eq!(normalized.diagnostics.len(), 2);
        assert!(matches!(
            normalized.diagnostics.first(),
            Some(Diagnostic::DanglingKey { position: 2, .. })
        ));
        assert!(matches!(
            normalized.diagnostics.get(1),
            Some(Diagnostic::NonStringKeys(pairs)) if pairs.len() == 1
        ));
    }

    #[test]
    fn typed_fields_mix_with_raw_pairs() {
        let args = vec![
            Arg::from(Field::int("first", 1)),
            Arg::from("second"),
            Arg::from(2),
            Arg::from(Field::bool("third", true)),
        ];
        let normalized = normalize(args);
        assert_eq!(
            normalized.fields,
            vec![
                Field::int("first", 1),
                Field::new("second", 2),
                Field::bool("third", true),
            ]
        );
        assert!(normalized.is_clean());
    }

    #[test]
    fn typed_field_in_value_position_is_collapsed() {
        let args = vec![Arg::from("wrapped"), Arg::from(Field::int("n", 3))];
        let normalized = normalize(args);
        assert_eq!(normalized.fields, vec![Field::new("wrapped", json!({ "n": 3 }))]);
    }

    #[test]
    fn diagnostics_render_recovery_fields() {
        let dangling = Diagnostic::DanglingKey {
            position: 4,
            key: json!("k"),
        };
        assert_eq!(dangling.message(), DANGLING_KEY_MESSAGE);
        assert_eq!(
            dangling.into_fields(),
            vec![Field::new("ignored", "k"), Field::new("position", 4)]
        );

        let invalid = Diagnostic::NonStringKeys(vec![InvalidPair {
            position: 0,
            key: json!(7),
            value: json!("x"),
        }]);
        assert_eq!(invalid.message(), NON_STRING_KEYS_MESSAGE);
        assert_eq!(
            invalid.into_fields(),
            vec![Field::new(
                "invalid",
                json!([{ "position": 0, "key": 7, "value": "x" }])
            )]
        );
    }

    fn scalar() -> impl Strategy<Value = Value> {
        prop_oneof![
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
            "[a-z]{0,8}".prop_map(Value::from),
            Just(Value::Null),
        ]
    }

    fn typed_field() -> impl Strategy<Value = Field> {
        ("[a-z]{1,8}", scalar()).prop_map(|(key, value)| Field::new(key, value))
    }

    fn any_arg() -> impl Strategy<Value = Arg> {
        prop_oneof![scalar().prop_map(Arg::Value), typed_field().prop_map(Arg::Field)]
    }

    proptest! {
        #[test]
        fn typed_only_input_passes_through(fields in prop::collection::vec(typed_field(), 0..16)) {
            let args = fields.iter().cloned().map(Arg::Field).collect();
            let normalized = normalize(args);
            prop_assert_eq!(normalized.fields, fields);
            prop_assert!(normalized.diagnostics.is_empty());
        }

        #[test]
        fn string_pairs_yield_one_field_each(
            pairs in prop::collection::vec(("[a-z]{1,8}", scalar()), 0..16)
        ) {
            let args = pairs
                .iter()
                .flat_map(|(key, value)| [Arg::from(key.as_str()), Arg::Value(value.clone())])
                .collect();
            let normalized = normalize(args);
            let expected: Vec<Field> = pairs
                .into_iter()
                .map(|(key, value)| Field::new(key, value))
                .collect();
            prop_assert_eq!(normalized.fields, expected);
            prop_assert!(normalized.diagnostics.is_empty());
        }

        #[test]
        fn odd_tail_is_dangling(
            pairs in prop::collection::vec(("[a-z]{1,8}", scalar()), 0..8),
            tail in "[a-z]{1,8}",
        ) {
            let mut args: Vec<Arg> = pairs
                .iter()
                .flat_map(|(key, value)| [Arg::from(key.as_str()), Arg::Value(value.clone())])
                .collect();
            args.push(Arg::from(tail.as_str()));
            let position = args.len() - 1;

            let normalized = normalize(args);
            prop_assert_eq!(normalized.fields.len(), pairs.len());
            prop_assert_eq!(
                normalized.diagnostics,
                vec![Diagnostic::DanglingKey { position, key: Value::from(tail) }]
            );
        }

        #[test]
        fn normalization_is_idempotent(args in prop::collection::vec(any_arg(), 0..16)) {
            let first = normalize(args.clone());
            let second = normalize(args);
            prop_assert_eq!(first, second);
        }

        #[test]
        fn at_most_one_aggregate_diagnostic(args in prop::collection::vec(any_arg(), 0..16)) {
            let normalized = normalize(args);
            let aggregates = normalized
                .diagnostics
                .iter()
                .filter(|diagnostic| matches!(diagnostic, Diagnostic::NonStringKeys(_)))
                .count();
            prop_assert!(aggregates <= 1);
        }
    }
}
