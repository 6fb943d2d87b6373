#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts Trade Me field type descriptors into OpenAPI schema fragments.
//! Handles primitives, collections (`Collection of X`), named references (`<Member>`)
//! and nullability (`... or null`).
//!
//! Mapping is total: anything unrecognised degrades to a plain `string` schema.

use indexmap::IndexMap;
use serde_json::Value;
use std::fmt::Display;

/// Suffix marking a nullable descriptor, matched case-insensitively.
const NULLABLE_SUFFIX: &str = " or null";

/// Prefix of collection descriptors, matched case-insensitively.
const COLLECTION_PREFIX: &str = "collection of";

/// Prefix of every local component reference.
pub const COMPONENT_REF_PREFIX: &str = "#/components/schemas/";

/// The shape of a schema fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaType {
    /// A string type, with an optional format (e.g. "date-time").
    String {
        /// Format specifier.
        format: Option<String>,
    },
    /// An integer type.
    Integer,
    /// A floating point number.
    Number,
    /// A boolean type.
    Boolean,
    /// An array containing items of a specific schema.
    Array(Box<SchemaFragment>),
    /// A reference to another named schema (e.g. `Member`).
    Ref(String),
    /// An object with named properties.
    Object(ObjectSchema),
}

impl SchemaType {
    /// A plain, unformatted string.
    pub fn string() -> Self {
        SchemaType::String { format: None }
    }

    /// The OpenAPI `type` keyword for this shape, if it has one.
    ///
    /// References carry no `type`; they are emitted as `$ref` only.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            SchemaType::String { .. } => Some("string"),
            SchemaType::Integer => Some("integer"),
            SchemaType::Number => Some("number"),
            SchemaType::Boolean => Some("boolean"),
            SchemaType::Array(_) => Some("array"),
            SchemaType::Object(_) => Some("object"),
            SchemaType::Ref(_) => None,
        }
    }
}

impl Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaType::Array(inner) => write!(f, "array<{}>", inner.type_),
            SchemaType::Ref(s) => write!(f, "$ref:{}", s),
            other => write!(f, "{}", other.keyword().unwrap_or("object")),
        }
    }
}

/// An object schema: named properties, required names, and openness.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    /// Properties in field encounter order.
    pub properties: IndexMap<String, SchemaFragment>,
    /// Required property names in field encounter order. Omitted from output when empty.
    pub required: Vec<String>,
    /// Whether undocumented properties are tolerated.
    pub additional_properties: bool,
}

impl Default for ObjectSchema {
    fn default() -> Self {
        Self {
            properties: IndexMap::new(),
            required: Vec::new(),
            additional_properties: true,
        }
    }
}

/// Enumeration data overlaid onto a fragment, in addition to its type.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumOverlay {
    /// Allowed values, in document order.
    pub values: Vec<Value>,
    /// One description per value (`x-enum-descriptions`), empty when undocumented.
    pub descriptions: Vec<String>,
}

/// Represents one node of an OpenAPI schema.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaFragment {
    /// The primary shape.
    pub type_: SchemaType,
    /// Whether the value may be null (derived from `... or null`).
    pub nullable: bool,
    /// Optional description.
    pub description: Option<String>,
    /// Optional enumeration overlay.
    pub enumeration: Option<EnumOverlay>,
}

impl SchemaFragment {
    /// A fragment of the given shape with no annotations.
    pub fn new(type_: SchemaType) -> Self {
        Self {
            type_,
            nullable: false,
            description: None,
            enumeration: None,
        }
    }

    /// A reference to a named component schema.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::new(SchemaType::Ref(name.into()))
    }

    /// An array of `items`.
    pub fn array(items: SchemaFragment) -> Self {
        Self::new(SchemaType::Array(Box::new(items)))
    }

    /// An object fragment.
    pub fn object(object: ObjectSchema) -> Self {
        Self::new(SchemaType::Object(object))
    }

    /// Returns the object body, if this fragment is an object.
    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match &self.type_ {
            SchemaType::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the string format, if this fragment is a formatted string.
    pub fn format(&self) -> Option<&str> {
        match &self.type_ {
            SchemaType::String { format } => format.as_deref(),
            _ => None,
        }
    }

    /// Returns the reference target name, if this fragment is a reference.
    pub fn ref_name(&self) -> Option<&str> {
        match &self.type_ {
            SchemaType::Ref(name) => Some(name),
            _ => None,
        }
    }

    /// The `$ref` pointer for a reference fragment.
    pub fn ref_location(&self) -> Option<String> {
        self.ref_name()
            .map(|name| format!("{}{}", COMPONENT_REF_PREFIX, name))
    }
}

/// Trait for converting field type descriptors to schema fragments.
pub trait TypeMapper {
    /// Maps a type descriptor (e.g. `Collection of <Photo> or null`) to a fragment.
    ///
    /// Never fails: a missing or unknown descriptor maps to `string`.
    fn map(&self, descriptor: Option<&str>) -> SchemaFragment;
}

/// The standard implementation of `TypeMapper` for Trade Me descriptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeMeTypeMapper;

impl TypeMapper for TradeMeTypeMapper {
    fn map(&self, descriptor: Option<&str>) -> SchemaFragment {
        let Some(descriptor) = descriptor.filter(|d| !d.trim().is_empty()) else {
            return simple(SchemaType::string());
        };

        let (base, nullable) = strip_nullable(descriptor);
        let mut schema = self.map_base(base.trim());

        // Nullability is layered on top of whatever the base mapped to
        if nullable {
            schema.nullable = true;
        }
        schema
    }
}

impl TradeMeTypeMapper {
    fn map_base(&self, base: &str) -> SchemaFragment {
        let lower = base.to_ascii_lowercase();

        if lower.contains("string") {
            simple(SchemaType::string())
        } else if lower.contains("integer") {
            simple(SchemaType::Integer)
        } else if lower.contains("number") || lower.contains("decimal") {
            simple(SchemaType::Number)
        } else if lower.contains("boolean") {
            simple(SchemaType::Boolean)
        } else if lower.contains("datetime") {
            formatted_string("date-time")
        } else if lower.contains("enumeration") {
            // Values are attached by the caller
            simple(SchemaType::string())
        } else if lower.starts_with(COLLECTION_PREFIX) {
            let item = base[COLLECTION_PREFIX.len()..].trim();
            let item = if item.is_empty() { "string" } else { item };
            SchemaFragment::array(self.map(Some(item)))
        } else if let Some(name) = base.strip_prefix('<').and_then(|s| s.strip_suffix('>')) {
            SchemaFragment::reference(name.trim())
        } else {
            simple(SchemaType::string())
        }
    }
}

/// Maps a descriptor with the standard [`TradeMeTypeMapper`].
pub fn map_type(descriptor: Option<&str>) -> SchemaFragment {
    TradeMeTypeMapper.map(descriptor)
}

/// Removes the first ` or null` marker (any case), reporting whether it was present.
fn strip_nullable(descriptor: &str) -> (String, bool) {
    // ASCII lowercasing keeps byte offsets aligned with the original
    let lower = descriptor.to_ascii_lowercase();
    match lower.find(NULLABLE_SUFFIX) {
        Some(idx) => {
            let mut base = String::with_capacity(descriptor.len());
            base.push_str(&descriptor[..idx]);
            base.push_str(&descriptor[idx + NULLABLE_SUFFIX.len()..]);
            (base, true)
        }
        None => (descriptor.to_string(), false),
    }
}

// Helpers for cleaner construction
fn simple(t: SchemaType) -> SchemaFragment {
    SchemaFragment::new(t)
}

fn formatted_string(fmt: &str) -> SchemaFragment {
    SchemaFragment::new(SchemaType::String {
        format: Some(fmt.to_string()),
    })
}
