#![deny(missing_docs)]

//! # Schema Registry
//!
//! Accumulates the named component schemas discovered while flattening one document.
//! Names live in a single flat namespace: registering a name twice replaces the first
//! schema (last write wins) while keeping its original position.

use crate::type_mapping::{SchemaFragment, SchemaType};
use indexmap::IndexMap;

/// Registry of generated component schemas, in registration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaRegistry {
    schemas: IndexMap<String, SchemaFragment>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under `name`, returning the schema it replaced, if any.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        schema: SchemaFragment,
    ) -> Option<SchemaFragment> {
        let name = name.into();
        let previous = self.schemas.insert(name.clone(), schema);
        if previous.is_some() {
            log::warn!("Schema '{}' generated twice; keeping the later definition", name);
        }
        previous
    }

    /// Returns a registered schema by name.
    pub fn get(&self, name: &str) -> Option<&SchemaFragment> {
        self.schemas.get(name)
    }

    /// Whether a schema with this name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Number of registered schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    /// Iterates `(name, schema)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaFragment)> {
        self.schemas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Reference targets used by `extra` or any registered schema that are not registered.
    ///
    /// Names are reported once each, in first-seen order.
    pub fn dangling_references<'a>(
        &'a self,
        extra: impl IntoIterator<Item = &'a SchemaFragment>,
    ) -> Vec<String> {
        let mut targets = Vec::new();
        for schema in extra.into_iter().chain(self.schemas.values()) {
            collect_ref_names(schema, &mut targets);
        }

        let mut dangling: Vec<String> = Vec::new();
        for name in targets {
            if !self.contains(name) && !dangling.iter().any(|d| d == name) {
                dangling.push(name.to_string());
            }
        }
        dangling
    }
}

impl<'a> IntoIterator for &'a SchemaRegistry {
    type Item = (&'a String, &'a SchemaFragment);
    type IntoIter = indexmap::map::Iter<'a, String, SchemaFragment>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemas.iter()
    }
}

fn collect_ref_names<'a>(schema: &'a SchemaFragment, out: &mut Vec<&'a str>) {
    match &schema.type_ {
        SchemaType::Ref(name) => out.push(name),
        SchemaType::Array(items) => collect_ref_names(items, out),
        SchemaType::Object(object) => {
            for property in object.properties.values() {
                collect_ref_names(property, out);
            }
        }
        _ => {}
    }
}
