//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Wrapper for standard IO errors (directory creation, file writes).
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The input document is not valid JSON, or does not have the expected shape.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// Serializing a schema to YAML failed.
    #[display("YAML Error: {_0}")]
    Yaml(serde_yaml::Error),

    /// The input document does not exist.
    #[from(ignore)]
    #[display("Input file not found: {}", _0.display())]
    InputNotFound(PathBuf),

    /// The document has no `returns.fields` to document.
    /// We ignore this for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("No return fields found in {_0}")]
    MissingReturnFields(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_io_conversion() {
        let io_err = Error::new(ErrorKind::PermissionDenied, "read-only");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::Io(_)));
    }

    #[test]
    fn test_json_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Json(_)));
        assert!(app_err.to_string().starts_with("JSON Error: "));
    }

    #[test]
    fn test_string_conversion() {
        // String defaults to General, never MissingReturnFields
        let msg = String::from("something wrong");
        let app_err: AppError = msg.into();
        match app_err {
            AppError::General(s) => assert_eq!(s, "something wrong"),
            _ => panic!("String should convert to AppError::General"),
        }
    }

    #[test]
    fn test_input_not_found_display() {
        let app_err = AppError::InputNotFound(PathBuf::from("data/missing.json"));
        assert_eq!(
            format!("{}", app_err),
            "Input file not found: data/missing.json"
        );
    }

    #[test]
    fn test_missing_fields_display() {
        let app_err = AppError::MissingReturnFields("JSON spec".into());
        assert_eq!(format!("{}", app_err), "No return fields found in JSON spec");
    }
}
