use crate::error::{CoreError, Result};
use crate::todo_id::TodoId;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Name of the identifier field in stored documents and JSON responses.
pub const ID_FIELD: &str = "_id";

/// The caller-defined part of a todo, without its identifier.
///
/// The service enforces no schema on these fields: any JSON object is
/// accepted as long as it does not try to set the identifier, which only
/// the store may assign. Top-level keys must be usable as literal field
/// names in every backend, so empty keys, keys containing `.` and keys
/// starting with `$` are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TodoFields(Map<String, Value>);

impl TodoFields {
    /// Builds a field set, rejecting objects that carry an identifier or a
    /// key that a document store would read as a path or an operator.
    pub fn new(fields: Map<String, Value>) -> Result<Self> {
        if fields.contains_key(ID_FIELD) {
            return Err(CoreError::InvalidFields(format!(
                "field '{ID_FIELD}' is assigned by the store and cannot be set"
            )));
        }
        if let Some(key) = fields.keys().find(|key| !is_plain_key(key)) {
            return Err(CoreError::InvalidFields(format!(
                "field name '{key}' must be non-empty, contain no '.' and not start with '$'"
            )));
        }
        Ok(Self(fields))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrites every field present in `patch`; fields absent from
    /// `patch` keep their current value.
    pub fn apply(&mut self, patch: TodoFields) {
        self.0.extend(patch.0);
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl TryFrom<Value> for TodoFields {
    type Error = CoreError;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Self::new(fields),
            other => Err(CoreError::InvalidFields(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for TodoFields {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Self::new(fields).map_err(serde::de::Error::custom)
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty() && !key.contains('.') && !key.starts_with('$')
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// A stored todo: the store-assigned identifier plus the caller's fields.
///
/// Serializes flat, e.g. `{"_id": "65a1...", "title": "buy milk"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: TodoId,
    #[serde(flatten)]
    pub fields: TodoFields,
}

impl Todo {
    pub fn new(id: TodoId, fields: TodoFields) -> Self {
        Self { id, fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: Value) -> TodoFields {
        TodoFields::try_from(value).unwrap()
    }

    #[test]
    fn accepts_arbitrary_objects() {
        let f = fields(json!({"title": "buy milk", "done": false, "tags": ["home"]}));
        assert_eq!(f.len(), 3);
        assert_eq!(f.get("title"), Some(&json!("buy milk")));
    }

    #[test]
    fn accepts_empty_object() {
        assert!(fields(json!({})).is_empty());
    }

    #[test]
    fn rejects_identifier_field() {
        let err = TodoFields::try_from(json!({"_id": "x", "title": "t"})).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFields(_)));
    }

    #[test]
    fn rejects_path_and_operator_keys() {
        for value in [
            json!({"a.b": 1}),
            json!({"$set": {"title": "t"}}),
            json!({"": "empty"}),
            json!({"title": "t", "meta.tags": []}),
        ] {
            let err = TodoFields::try_from(value.clone()).unwrap_err();
            assert!(matches!(err, CoreError::InvalidFields(_)), "{value}");
        }
    }

    #[test]
    fn nested_keys_are_not_restricted() {
        let f = fields(json!({"meta": {"a.b": 1, "$c": 2}, "price$": 3}));
        assert_eq!(f.len(), 2);
    }

    #[test]
    fn rejects_non_objects() {
        for value in [json!(null), json!([1, 2]), json!("title"), json!(3)] {
            assert!(TodoFields::try_from(value).is_err());
        }
    }

    #[test]
    fn deserialize_rejects_identifier_field() {
        let result: std::result::Result<TodoFields, _> =
            serde_json::from_str(r#"{"_id":"65a1f0c2b3d4e5f60718293a"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn apply_overwrites_present_fields_only() {
        let mut current = fields(json!({"title": "buy milk", "done": false}));
        current.apply(fields(json!({"done": true, "priority": 2})));

        assert_eq!(current.get("title"), Some(&json!("buy milk")));
        assert_eq!(current.get("done"), Some(&json!(true)));
        assert_eq!(current.get("priority"), Some(&json!(2)));
    }

    #[test]
    fn todo_serializes_flat() {
        let id = TodoId::parse("65a1f0c2b3d4e5f60718293a").unwrap();
        let todo = Todo::new(id, fields(json!({"title": "buy milk"})));

        assert_eq!(
            serde_json::to_value(&todo).unwrap(),
            json!({"_id": "65a1f0c2b3d4e5f60718293a", "title": "buy milk"})
        );
    }

    #[test]
    fn todo_deserializes_flat() {
        let todo: Todo =
            serde_json::from_value(json!({"_id": "65a1f0c2b3d4e5f60718293a", "title": "t"}))
                .unwrap();
        assert_eq!(todo.id.to_hex(), "65a1f0c2b3d4e5f60718293a");
        assert_eq!(todo.fields.len(), 1);
    }
}
