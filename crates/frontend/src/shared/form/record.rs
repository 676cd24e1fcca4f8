use contracts::shared::field_path::{merge, FieldPath, FieldPathError};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// The editable record of a form: always a JSON object
#[derive(Debug, Clone, PartialEq)]
pub struct FormRecord(Value);

impl Default for FormRecord {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl FormRecord {
    /// `None` unless `value` is an object
    pub fn from_value(value: Value) -> Option<Self> {
        value.is_object().then_some(Self(value))
    }

    /// `loaded` spread over `defaults`: a loaded key replaces the default value
    /// under that key wholesale.
    pub fn merged(defaults: &FormRecord, loaded: Value) -> FormRecord {
        let mut record = defaults.0.clone();
        merge(&mut record, loaded);
        FormRecord(record)
    }

    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        path.get(&self.0)
    }

    /// Text of the field at `path`; empty for absent and null values
    pub fn text(&self, path: &FieldPath) -> String {
        match self.get(path) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn flag(&self, path: &FieldPath) -> bool {
        self.get(path).and_then(Value::as_bool).unwrap_or(false)
    }

    pub fn set(&mut self, path: &FieldPath, value: Value) -> Result<(), FieldPathError> {
        path.set(&mut self.0, value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn typed<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_recipient::RecipientDto;
    use serde_json::json;

    fn path(p: &str) -> FieldPath {
        FieldPath::parse(p).unwrap()
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(FormRecord::from_value(json!([1, 2])).is_none());
        assert!(FormRecord::from_value(Value::Null).is_none());
        assert_eq!(FormRecord::default().as_value(), &json!({}));
    }

    #[test]
    fn test_merged_replaces_top_level_keys() {
        let defaults = FormRecord::from_value(json!({
            "contact": {"first_name": "", "office_address": {"province": "BC"}},
            "retirement": false
        }))
        .unwrap();
        let record = FormRecord::merged(
            &defaults,
            json!({"contact": {"first_name": "Ada", "office_address": {"community": "Victoria"}}}),
        );
        assert_eq!(record.text(&path("contact.first_name")), "Ada");
        assert_eq!(record.text(&path("contact.office_address.community")), "Victoria");
        assert!(record.get(&path("contact.office_address.province")).is_none());
        assert!(!record.flag(&path("retirement")));
        assert!(record.get(&path("retirement")).is_some());
    }

    #[test]
    fn test_typed_round_trip() {
        let mut record = FormRecord::from_value(RecipientDto::default_record()).unwrap();
        record.set(&path("contact.first_name"), json!("Ada")).unwrap();
        record.set(&path("service.milestone"), json!(25)).unwrap();
        let dto: RecipientDto = record.typed().unwrap();
        assert_eq!(dto.contact.first_name, "Ada");
        assert_eq!(dto.service.milestone, Some(25));
        assert_eq!(record.text(&path("service.milestone")), "25");
    }
}
