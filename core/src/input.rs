#![deny(missing_docs)]

//! # Input Document
//!
//! Deserialization of the endpoint description documents consumed by the generator.
//!
//! Upstream documents are loosely typed: a field may spell its name as `field_name` or
//! `name`, its type as `field_type` or `type`, and its enumeration as `enum` or
//! `enum_values`. All aliases are resolved here, once, so the rest of the crate only
//! ever sees the canonical [`FieldDescriptor`].

use crate::error::{AppError, AppResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Top-level endpoint document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EndpointDocument {
    /// Endpoint path, e.g. `/v1/Listings/{listingId}.{file_format}`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Human readable description of the endpoint.
    #[serde(default)]
    pub description: Option<String>,
    /// The response description.
    #[serde(default)]
    pub returns: Option<ReturnsBlock>,
}

/// The `returns` block of an endpoint document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReturnsBlock {
    /// Description of the returned entity.
    #[serde(default)]
    pub description: Option<String>,
    /// The returned fields.
    #[serde(default)]
    pub fields: Option<Vec<FieldDescriptor>>,
}

/// One field of an API response, with every alias already resolved.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawFieldDescriptor")]
pub struct FieldDescriptor {
    /// Property name.
    pub name: String,
    /// Proprietary type descriptor, e.g. `Collection of <Photo>` or `Integer or null`.
    pub type_descriptor: Option<String>,
    /// Field description.
    pub description: Option<String>,
    /// Whether the field is always present in the response.
    pub required: bool,
    /// Enumeration values, in document order.
    pub enum_values: Option<Vec<EnumValue>>,
    /// Field definitions of an inline nested object.
    pub nested_fields: Option<Vec<FieldDescriptor>>,
}

impl FieldDescriptor {
    /// Creates a field with a name and type descriptor and nothing else.
    pub fn new(name: impl Into<String>, type_descriptor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_descriptor: Some(type_descriptor.into()),
            ..Self::default()
        }
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the field description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the enumeration values.
    pub fn with_enum_values(mut self, values: Vec<EnumValue>) -> Self {
        self.enum_values = Some(values);
        self
    }

    /// Sets the nested field definitions.
    pub fn with_nested_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.nested_fields = Some(fields);
        self
    }
}

/// A single enumeration member.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawEnumValue")]
pub struct EnumValue {
    /// The literal value (usually a string, occasionally a number).
    pub value: Value,
    /// Member description, empty when the document has none.
    pub description: String,
}

impl EnumValue {
    /// Creates an enum member.
    pub fn new(value: impl Into<Value>, description: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: description.into(),
        }
    }
}

/// Wire shape of a field, before alias resolution.
#[derive(Deserialize)]
struct RawFieldDescriptor {
    #[serde(default)]
    field_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    field_type: Option<String>,
    #[serde(default, rename = "type")]
    type_: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    required: Option<Value>,
    #[serde(default, rename = "enum")]
    enum_: Option<Vec<EnumValue>>,
    #[serde(default)]
    enum_values: Option<Vec<EnumValue>>,
    #[serde(default)]
    nested_fields: Option<Vec<FieldDescriptor>>,
}

impl From<RawFieldDescriptor> for FieldDescriptor {
    fn from(raw: RawFieldDescriptor) -> Self {
        Self {
            name: prefer(raw.field_name, raw.name).unwrap_or_default(),
            type_descriptor: prefer(raw.field_type, raw.type_),
            description: raw.description,
            required: raw.required.as_ref().is_some_and(is_truthy),
            enum_values: raw.enum_.or(raw.enum_values),
            nested_fields: raw.nested_fields,
        }
    }
}

#[derive(Deserialize)]
struct RawEnumValue {
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    name: Option<Value>,
    #[serde(default)]
    description: Option<String>,
}

impl From<RawEnumValue> for EnumValue {
    fn from(raw: RawEnumValue) -> Self {
        let value = match (raw.value, raw.name) {
            (Some(value), _) if is_truthy(&value) => value,
            (value, name) => name.or(value).unwrap_or(Value::Null),
        };
        Self {
            value,
            description: raw.description.unwrap_or_default(),
        }
    }
}

/// Picks the primary spelling unless it is missing or empty.
fn prefer(primary: Option<String>, alias: Option<String>) -> Option<String> {
    primary.filter(|s| !s.is_empty()).or(alias)
}

/// Loose truthiness, since upstream documents are not strict about `required`.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

impl EndpointDocument {
    /// Parses an endpoint document from a JSON string.
    pub fn from_json_str(json: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses an endpoint document from disk.
    ///
    /// A missing file is reported as [`AppError::InputNotFound`] rather than a bare IO error.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Err(AppError::InputNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Returns the response fields, failing if the document does not declare any.
    pub fn return_fields(&self) -> AppResult<&[FieldDescriptor]> {
        self.returns
            .as_ref()
            .and_then(|r| r.fields.as_deref())
            .ok_or_else(|| AppError::MissingReturnFields("JSON spec".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(value: Value) -> FieldDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_short_aliases() {
        let f = field(json!({"name": "Title", "type": "String", "required": true}));
        assert_eq!(f.name, "Title");
        assert_eq!(f.type_descriptor.as_deref(), Some("String"));
        assert!(f.required);
    }

    #[test]
    fn test_long_aliases_win() {
        let f = field(json!({
            "field_name": "ListingId",
            "name": "Ignored",
            "field_type": "Integer",
            "type": "String"
        }));
        assert_eq!(f.name, "ListingId");
        assert_eq!(f.type_descriptor.as_deref(), Some("Integer"));
        assert!(!f.required);
    }

    #[test]
    fn test_enum_preferred_over_enum_values() {
        let f = field(json!({
            "name": "Status",
            "enum": [{"value": "a"}],
            "enum_values": [{"value": "b"}]
        }));
        let values = f.enum_values.unwrap();
        assert_eq!(values, vec![EnumValue::new("a", "")]);
    }

    #[test]
    fn test_enum_value_falls_back_to_name() {
        let f = field(json!({
            "name": "Condition",
            "enum_values": [
                {"name": "New", "description": "Brand new"},
                {"value": 3}
            ]
        }));
        let values = f.enum_values.unwrap();
        assert_eq!(values[0], EnumValue::new("New", "Brand new"));
        assert_eq!(values[1], EnumValue::new(3, ""));
    }

    #[test]
    fn test_nested_fields_are_normalized() {
        let f = field(json!({
            "name": "Seller",
            "type": "<Member>",
            "nested_fields": [{"field_name": "Id", "field_type": "Integer", "required": true}]
        }));
        let nested = f.nested_fields.unwrap();
        assert_eq!(nested, vec![FieldDescriptor::new("Id", "Integer").required()]);
    }

    #[test]
    fn test_loose_required() {
        assert!(!field(json!({"name": "A", "required": null})).required);
        assert!(!field(json!({"name": "A", "required": 0})).required);
        assert!(field(json!({"name": "A", "required": "yes"})).required);
    }

    #[test]
    fn test_missing_return_fields() {
        let doc = EndpointDocument::from_json_str(r#"{"returns": {"description": "x"}}"#).unwrap();
        let err = doc.return_fields().unwrap_err();
        assert!(matches!(err, AppError::MissingReturnFields(_)));

        let doc = EndpointDocument::from_json_str(r#"{"endpoint": "/v1"}"#).unwrap();
        assert!(doc.return_fields().is_err());
    }

    #[test]
    fn test_malformed_json() {
        let err = EndpointDocument::from_json_str("{\"returns\": ").unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = EndpointDocument::from_path(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, AppError::InputNotFound(_)));
    }
}
