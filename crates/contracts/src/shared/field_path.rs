//! Dotted field paths over nested JSON records
//!
//! `FieldPath::parse("contact.personal_address.postal_code")` addresses the
//! `postal_code` field of the `personal_address` object inside `contact`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldPathError {
    #[error("Field path is empty")]
    Empty,

    #[error("Field path `{0}` contains an empty segment")]
    EmptySegment(String),

    #[error("Cannot write `{path}`: `{segment}` is not an object")]
    NotAnObject { path: String, segment: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, FieldPathError> {
        if path.is_empty() {
            return Err(FieldPathError::Empty);
        }
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(FieldPathError::EmptySegment(path.to_string()));
        }
        Ok(Self { segments })
    }

    /// Path of a compile-time constant such as the registration field
    /// names. Panics on a malformed literal.
    pub fn literal(path: &'static str) -> Self {
        Self::parse(path).unwrap_or_else(|e| panic!("invalid field path literal `{path}`: {e}"))
    }

    /// Builds a path from raw segments, which may themselves contain dots
    /// (option names used as map keys).
    pub fn from_segments<I, S>(segments: I) -> Result<Self, FieldPathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(FieldPathError::Empty);
        }
        if segments.iter().any(|s| s.is_empty()) {
            return Err(FieldPathError::EmptySegment(segments.join(".")));
        }
        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Path of `child` relative to this path
    pub fn join(&self, child: &FieldPath) -> FieldPath {
        let mut segments = self.segments.clone();
        segments.extend(child.segments.iter().cloned());
        FieldPath { segments }
    }

    pub fn starts_with(&self, prefix: &FieldPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    pub fn get<'a>(&self, record: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(record, |current, segment| current.as_object()?.get(segment))
    }

    /// Writes `value` at this path, creating missing intermediate objects.
    /// A `null` intermediate is replaced by an object.
    pub fn set(&self, record: &mut Value, value: Value) -> Result<(), FieldPathError> {
        let (last, parents) = self
            .segments
            .split_last()
            .ok_or(FieldPathError::Empty)?;

        let mut current = record;
        for segment in parents {
            if current.is_null() {
                *current = Value::Object(Map::new());
            }
            let map = current
                .as_object_mut()
                .ok_or_else(|| self.not_an_object(segment))?;
            current = map
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        let map = current
            .as_object_mut()
            .ok_or_else(|| self.not_an_object(last))?;
        map.insert(last.clone(), value);
        Ok(())
    }

    fn not_an_object(&self, segment: &str) -> FieldPathError {
        FieldPathError::NotAnObject {
            path: self.to_string(),
            segment: segment.to_string(),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

impl std::str::FromStr for FieldPath {
    type Err = FieldPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldPath::parse(s)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for FieldPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        FieldPath::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Top-level spread of `overlay` over `base`: each key of `overlay` replaces
/// the whole value under that key. A non-object `overlay` replaces `base`.
pub fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => base_map.extend(overlay_map),
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_rejects_empty_segments() {
        assert_eq!(FieldPath::parse(""), Err(FieldPathError::Empty));
        assert!(matches!(
            FieldPath::parse("contact..email"),
            Err(FieldPathError::EmptySegment(_))
        ));
        assert!(matches!(
            FieldPath::parse("contact."),
            Err(FieldPathError::EmptySegment(_))
        ));
    }

    #[test]
    fn test_get_nested() {
        let record = json!({"contact": {"personal_address": {"postal_code": "V8V 0C5"}}});
        let path = FieldPath::parse("contact.personal_address.postal_code").unwrap();
        assert_eq!(path.get(&record), Some(&json!("V8V 0C5")));

        let missing = FieldPath::parse("contact.office_address.postal_code").unwrap();
        assert_eq!(missing.get(&record), None);
    }

    #[test]
    fn test_get_through_scalar_is_none() {
        let record = json!({"contact": "n/a"});
        let path = FieldPath::parse("contact.office_email").unwrap();
        assert_eq!(path.get(&record), None);
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut record = json!({"contact": null});
        let path = FieldPath::parse("contact.office_address.community").unwrap();
        path.set(&mut record, json!("Victoria")).unwrap();
        assert_eq!(record, json!({"contact": {"office_address": {"community": "Victoria"}}}));
    }

    #[test]
    fn test_set_through_scalar_fails() {
        let mut record = json!({"contact": 5});
        let path = FieldPath::parse("contact.office_email").unwrap();
        let err = path.set(&mut record, json!("x")).unwrap_err();
        assert!(matches!(err, FieldPathError::NotAnObject { .. }));
        assert_eq!(record, json!({"contact": 5}));
    }

    #[test]
    fn test_from_segments_keeps_dotted_keys() {
        let path = FieldPath::from_segments(["values", "size.v2"]).unwrap();
        let record = json!({"values": {"size.v2": "large"}});
        assert_eq!(path.get(&record), Some(&json!("large")));
        assert!(FieldPath::from_segments(Vec::<String>::new()).is_err());
        assert!(FieldPath::from_segments(["values", ""]).is_err());
    }

    #[test]
    fn test_join_and_display() {
        let scope = FieldPath::parse("supervisor").unwrap();
        let key = FieldPath::parse("office_address.postal_code").unwrap();
        let joined = scope.join(&key);
        assert_eq!(joined.to_string(), "supervisor.office_address.postal_code");
        assert!(joined.starts_with(&scope));
    }

    #[test]
    fn test_merge_replaces_whole_top_level_values() {
        let mut base = json!({"a": 1, "nested": {"x": 1, "y": 2}, "keep": true});
        merge(&mut base, json!({"a": 2, "nested": {"y": 3}, "new": "v"}));
        assert_eq!(
            base,
            json!({"a": 2, "nested": {"y": 3}, "keep": true, "new": "v"})
        );
    }

    #[test]
    #[should_panic(expected = "invalid field path literal")]
    fn test_malformed_literal_panics() {
        FieldPath::literal("contact..email");
    }
}
