#![deny(missing_docs)]

//! # Schema Emitter
//!
//! Serializes schema fragments as OpenAPI 3.1 component schema documents and writes
//! one file per component.
//!
//! Keys are always emitted in the same order (`type`, `properties`, `required`,
//! `additionalProperties`, `description`, `enum`, `x-enum-descriptions`, `$ref`,
//! `nullable`, `format`, `items`) so regenerating unchanged input yields identical files.

use crate::error::{AppError, AppResult};
use crate::flattener::GeneratedSchemas;
use crate::type_mapping::{SchemaFragment, SchemaType};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Output serialization format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// YAML documents (`.yaml`).
    #[default]
    Yaml,
    /// Pretty-printed JSON documents (`.json`).
    Json,
}

impl OutputFormat {
    /// File extension for this format, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Yaml => "yaml",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(AppError::General(format!(
                "Unsupported output format '{}', expected yaml or json",
                other
            ))),
        }
    }
}

impl Serialize for SchemaFragment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;

        if let Some(keyword) = self.type_.keyword() {
            map.serialize_entry("type", keyword)?;
        }
        if let SchemaType::Object(object) = &self.type_ {
            map.serialize_entry("properties", &object.properties)?;
            if !object.required.is_empty() {
                map.serialize_entry("required", &object.required)?;
            }
            map.serialize_entry("additionalProperties", &object.additional_properties)?;
        }
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        if let Some(overlay) = &self.enumeration {
            map.serialize_entry("enum", &overlay.values)?;
            map.serialize_entry("x-enum-descriptions", &overlay.descriptions)?;
        }
        if let Some(location) = self.ref_location() {
            map.serialize_entry("$ref", &location)?;
        }
        if self.nullable {
            map.serialize_entry("nullable", &true)?;
        }
        if let Some(format) = self.format() {
            map.serialize_entry("format", format)?;
        }
        if let SchemaType::Array(items) = &self.type_ {
            map.serialize_entry("items", items.as_ref())?;
        }

        map.end()
    }
}

/// Renders one schema in the requested format. The output always ends with a newline.
pub fn render(schema: &SchemaFragment, format: OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Yaml => Ok(serde_yaml::to_string(schema)?),
        OutputFormat::Json => {
            let mut out = serde_json::to_string_pretty(schema)?;
            out.push('\n');
            Ok(out)
        }
    }
}

/// Writes every generated schema to `<dir>/<Name>.<ext>`, root first.
///
/// Creates `dir` if needed and overwrites existing files. Stops at the first failure;
/// files written before it are left in place.
///
/// # Returns
///
/// The written paths, in write order.
pub fn write_schemas(
    schemas: &GeneratedSchemas,
    dir: &Path,
    format: OutputFormat,
) -> AppResult<Vec<PathBuf>> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }

    let mut written = Vec::with_capacity(schemas.len());
    for (name, schema) in schemas.iter() {
        written.push(write_schema(dir, name, schema, format)?);
    }
    Ok(written)
}

/// Writes a single schema document and returns its path.
pub fn write_schema(
    dir: &Path,
    name: &str,
    schema: &SchemaFragment,
    format: OutputFormat,
) -> AppResult<PathBuf> {
    let content = render(schema, format)?;
    let path = dir.join(format!("{}.{}", name, format.extension()));
    fs::write(&path, content)?;
    log::info!("Generated: {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flattener::SchemaFlattener;
    use crate::input::{EnumValue, FieldDescriptor};
    use crate::registry::SchemaRegistry;
    use crate::type_mapping::{map_type, ObjectSchema, TradeMeTypeMapper};
    use serde_json::json;

    #[test]
    fn test_enum_field_json_shape() {
        let field = FieldDescriptor::new("Status", "Enumeration").with_enum_values(vec![
            EnumValue::new("active", ""),
            EnumValue::new("closed", "Closed"),
        ]);
        let mut registry = SchemaRegistry::new();
        let root = SchemaFlattener::new(TradeMeTypeMapper)
            .flatten(&[field], "Listing", &mut registry)
            .unwrap();

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(
            value["properties"]["Status"],
            json!({
                "type": "string",
                "description": "",
                "enum": ["active", "closed"],
                "x-enum-descriptions": ["", "Closed"]
            })
        );
        assert_eq!(value["additionalProperties"], json!(true));
        assert!(value.get("required").is_none());
    }

    #[test]
    fn test_reference_has_no_type() {
        let value = serde_json::to_value(map_type(Some("<Member> or null"))).unwrap();
        assert_eq!(
            value,
            json!({"$ref": "#/components/schemas/Member", "nullable": true})
        );
    }

    #[test]
    fn test_array_items_and_format() {
        let value = serde_json::to_value(map_type(Some("Collection of <Photo> or null"))).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "array",
                "nullable": true,
                "items": {"$ref": "#/components/schemas/Photo"}
            })
        );
        let value = serde_json::to_value(map_type(Some("DateTime"))).unwrap();
        assert_eq!(value, json!({"type": "string", "format": "date-time"}));
    }

    #[test]
    fn test_yaml_key_order() {
        let mut object = ObjectSchema::default();
        object.properties.insert(
            "EndDate".to_string(),
            SchemaFragment {
                description: Some("Closes at".into()),
                ..map_type(Some("DateTime or null"))
            },
        );
        object.required.push("EndDate".to_string());
        let root = SchemaFragment {
            description: Some("Root".into()),
            ..SchemaFragment::object(object)
        };

        let yaml = render(&root, OutputFormat::Yaml).unwrap();
        let expected = "\
type: object
properties:
  EndDate:
    type: string
    description: Closes at
    nullable: true
    format: date-time
required:
- EndDate
additionalProperties: true
description: Root
";
        assert_eq!(yaml, expected);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("YML".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("toml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().extension(), "yaml");
    }

    #[test]
    fn test_json_render_trailing_newline() {
        let out = render(&map_type(Some("Boolean")), OutputFormat::Json).unwrap();
        assert_eq!(out, "{\n  \"type\": \"boolean\"\n}\n");
    }
}
