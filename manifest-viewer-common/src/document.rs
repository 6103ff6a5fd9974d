//! Resource documents
//!
//! A cluster object (pod, deployment, service, route) kept as an owned tree of
//! JSON values. The conventional top-level sections are `metadata`, `spec`
//! and `status`; nothing else about the schema is assumed.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// One cluster object as returned by the cluster API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceDocument(Map<String, Value>);

impl ResourceDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Top-level section as an object, if present and an object
    pub fn section(&self, name: &str) -> Option<&Map<String, Value>> {
        self.0.get(name).and_then(Value::as_object)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut Map<String, Value>> {
        self.0.get_mut(name).and_then(Value::as_object_mut)
    }

    pub fn metadata(&self) -> Option<&Value> {
        self.0.get("metadata")
    }

    pub fn spec(&self) -> Option<&Value> {
        self.0.get("spec")
    }

    pub fn status(&self) -> Option<&Value> {
        self.0.get("status")
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata_str("name")
    }

    pub fn namespace(&self) -> Option<&str> {
        self.metadata_str("namespace")
    }

    pub fn uid(&self) -> Option<&str> {
        self.metadata_str("uid")
    }

    /// `status.phase`, set on pods and namespaces
    pub fn phase(&self) -> Option<&str> {
        self.section("status")
            .and_then(|status| status.get("phase"))
            .and_then(Value::as_str)
    }

    /// Labels as `(key, value)` pairs; non-string values are skipped
    pub fn labels(&self) -> Vec<(String, String)> {
        self.section("metadata")
            .and_then(|metadata| metadata.get("labels"))
            .and_then(Value::as_object)
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(|(k, v)| v.as_str().map(|v| (k.clone(), v.to_string())))
                    .collect()
            })
            .unwrap_or_default()
    }

    fn metadata_str(&self, field: &str) -> Option<&str> {
        self.section("metadata")
            .and_then(|metadata| metadata.get(field))
            .and_then(Value::as_str)
    }
}

impl TryFrom<Value> for ResourceDocument {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(Error::NotAnObject(value_type(&other).to_string())),
        }
    }
}

impl From<ResourceDocument> for Value {
    fn from(doc: ResourceDocument) -> Self {
        Value::Object(doc.0)
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
