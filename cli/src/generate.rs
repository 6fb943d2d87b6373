#![deny(missing_docs)]

//! # Generate Command
//!
//! Reads a Trade Me endpoint description and writes one OpenAPI component schema
//! file per generated schema (`Listing` plus every nested object).

use schemagen_core::{
    generate_schemas, write_schemas, AppResult, EndpointDocument, OutputFormat,
    TradeMeTypeMapper, ROOT_SCHEMA_NAME,
};
use std::path::PathBuf;

/// Arguments for schema generation.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the endpoint description JSON document.
    #[clap(
        long,
        short,
        env = "SCHEMAGEN_INPUT",
        default_value = "data/json-doc/listing-methods/retrieve-the-details-of-a-single-listing.json"
    )]
    pub input: PathBuf,

    /// Directory receiving the generated component schemas.
    #[clap(
        long,
        short,
        env = "SCHEMAGEN_OUTPUT_DIR",
        default_value = "openapi/components/schemas"
    )]
    pub output_dir: PathBuf,

    /// Output format: `yaml` or `json`.
    #[clap(long, env = "SCHEMAGEN_FORMAT", default_value_t = OutputFormat::Yaml)]
    pub format: OutputFormat,
}

/// Executes schema generation, returning the written file paths.
///
/// Input problems (missing file, invalid JSON, no return fields) fail before any
/// file is written.
pub fn execute(args: &GenerateArgs) -> AppResult<Vec<PathBuf>> {
    log::info!("Reading JSON spec: {}", args.input.display());
    let document = EndpointDocument::from_path(&args.input)?;

    if let Some(endpoint) = &document.endpoint {
        log::info!("Endpoint: {}", endpoint);
    }
    if let Some(description) = &document.description {
        log::info!("Description: {}", description);
    }

    let schemas = generate_schemas(&document, TradeMeTypeMapper)?;
    let written = write_schemas(&schemas, &args.output_dir, args.format)?;

    let nested: Vec<&str> = schemas.nested.names().collect();
    log::info!("Generated {} schema files", written.len());
    log::info!("Main schema: {}.{}", ROOT_SCHEMA_NAME, args.format.extension());
    log::info!("Nested schemas: {}", nested.join(", "));

    for name in schemas.dangling_references() {
        log::warn!(
            "'{}' is referenced but not generated by this document; provide it separately",
            name
        );
    }

    Ok(written)
}
