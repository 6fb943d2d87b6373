#![deny(missing_docs)]

//! # Schema Flattener
//!
//! Walks a tree of field descriptors depth-first and produces one object schema per
//! level. Nested field lists are hoisted into their own named component schemas
//! (`Listing` + `Seller` → `ListingSeller`) and replaced by a `$ref` in the parent.

use crate::error::{AppError, AppResult};
use crate::input::{EndpointDocument, FieldDescriptor};
use crate::registry::SchemaRegistry;
use crate::type_mapping::{EnumOverlay, ObjectSchema, SchemaFragment, SchemaType, TypeMapper};

/// Name of the root component schema.
pub const ROOT_SCHEMA_NAME: &str = "Listing";

/// Root description used when the document provides none.
pub const DEFAULT_ROOT_DESCRIPTION: &str = "Trade Me listing details";

/// Flattens field lists into object schemas using a [`TypeMapper`].
#[derive(Debug, Clone, Default)]
pub struct SchemaFlattener<M> {
    mapper: M,
}

impl<M: TypeMapper> SchemaFlattener<M> {
    /// Creates a flattener backed by `mapper`.
    pub fn new(mapper: M) -> Self {
        Self { mapper }
    }

    /// Builds the object schema for `fields`, registering every nested object under
    /// `type_name` + field name in `registry`.
    ///
    /// Returns `None` when `fields` is empty: there is nothing to describe.
    pub fn flatten(
        &self,
        fields: &[FieldDescriptor],
        type_name: &str,
        registry: &mut SchemaRegistry,
    ) -> Option<SchemaFragment> {
        if fields.is_empty() {
            return None;
        }

        let mut object = ObjectSchema::default();

        for field in fields {
            let schema = self.field_schema(field, type_name, registry);
            if field.required {
                object.required.push(field.name.clone());
            }
            object.properties.insert(field.name.clone(), schema);
        }

        Some(SchemaFragment::object(object))
    }

    fn field_schema(
        &self,
        field: &FieldDescriptor,
        type_name: &str,
        registry: &mut SchemaRegistry,
    ) -> SchemaFragment {
        let mut schema = self.mapper.map(field.type_descriptor.as_deref());
        schema.description = Some(field.description.clone().unwrap_or_default());

        if let Some(values) = &field.enum_values {
            let overlay = EnumOverlay {
                values: values.iter().map(|v| v.value.clone()).collect(),
                descriptions: values.iter().map(|v| v.description.clone()).collect(),
            };
            log::debug!("Found enum for {}: {:?}", field.name, overlay.values);
            schema.enumeration = Some(overlay);
        }

        if let Some(nested) = &field.nested_fields {
            let nested_name = format!("{}{}", type_name, field.name);
            if let Some(nested_schema) = self.flatten(nested, &nested_name, registry) {
                registry.register(nested_name.clone(), nested_schema);
                // The reference replaces the mapped shape entirely
                schema.type_ = SchemaType::Ref(nested_name);
            }
        }

        schema
    }
}

/// The schemas produced from one endpoint document.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSchemas {
    /// The root `Listing` schema.
    pub root: SchemaFragment,
    /// Every nested schema, in registration order.
    pub nested: SchemaRegistry,
}

impl GeneratedSchemas {
    /// Iterates `(name, schema)` pairs, root first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaFragment)> {
        let root: (&str, &SchemaFragment) = (ROOT_SCHEMA_NAME, &self.root);
        std::iter::once(root).chain(self.nested.iter())
    }

    /// Total number of schemas, root included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nested.len() + 1
    }

    /// Reference targets that no generated schema satisfies (e.g. bare `<Member>`).
    pub fn dangling_references(&self) -> Vec<String> {
        self.nested.dangling_references([&self.root])
    }
}

/// Generates the root schema and all nested schemas for an endpoint document.
///
/// # Errors
///
/// Returns [`AppError::MissingReturnFields`] if the document has no `returns.fields`,
/// or an empty list of them.
pub fn generate_schemas<M: TypeMapper>(
    document: &EndpointDocument,
    mapper: M,
) -> AppResult<GeneratedSchemas> {
    let fields = document.return_fields()?;
    log::info!("Processing {} fields...", fields.len());

    let flattener = SchemaFlattener::new(mapper);
    let mut nested = SchemaRegistry::new();
    let mut root = flattener
        .flatten(fields, ROOT_SCHEMA_NAME, &mut nested)
        .ok_or_else(|| AppError::MissingReturnFields("JSON spec".into()))?;

    root.description = Some(root_description(document));

    Ok(GeneratedSchemas { root, nested })
}

fn root_description(document: &EndpointDocument) -> String {
    let non_empty = |s: &Option<String>| s.clone().filter(|d| !d.is_empty());
    document
        .returns
        .as_ref()
        .and_then(|r| non_empty(&r.description))
        .or_else(|| non_empty(&document.description))
        .unwrap_or_else(|| DEFAULT_ROOT_DESCRIPTION.to_string())
}
