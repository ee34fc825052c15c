use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored document: the backend-assigned id plus a flat field map.
///
/// The id is owned by the store -- assigned on add, immutable thereafter,
/// and never part of the field map itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Document {
            id: id.into(),
            fields,
        }
    }

    /// Value of a top-level field, if present and a string.
    pub fn field_str(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}
