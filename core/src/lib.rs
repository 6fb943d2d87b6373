#![deny(missing_docs)]

//! # Schemagen Core
//!
//! Core library for turning Trade Me endpoint descriptions into OpenAPI 3.1
//! component schemas.
//!
//! The pipeline is: parse the endpoint document ([`input`]), map each field's type
//! descriptor ([`type_mapping`]), flatten nested objects into named components
//! ([`flattener`], accumulating into a [`registry`]), then serialize ([`emit`]).

/// Shared error types.
pub mod error;

/// Endpoint document parsing and alias normalization.
pub mod input;

/// Type mapping logic (Trade Me descriptor -> schema fragment).
pub mod type_mapping;

/// Named component schema accumulator.
pub mod registry;

/// Recursive schema flattening.
pub mod flattener;

/// Serialization and file output.
pub mod emit;

pub use emit::{render, write_schemas, OutputFormat};
pub use error::{AppError, AppResult};
pub use flattener::{generate_schemas, GeneratedSchemas, SchemaFlattener, ROOT_SCHEMA_NAME};
pub use input::{EndpointDocument, EnumValue, FieldDescriptor, ReturnsBlock};
pub use registry::SchemaRegistry;
pub use type_mapping::{
    map_type, EnumOverlay, ObjectSchema, SchemaFragment, SchemaType, TradeMeTypeMapper,
    TypeMapper,
};
