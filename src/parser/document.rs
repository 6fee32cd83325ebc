use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Not a Clash YAML document: expected a mapping at the top level")]
    NotMapping,
}

/// Parses subscription text into the top-level mapping of a Clash document
///
/// Anything other than a mapping (a bare list, a scalar, an empty
/// document, a base64 blob) is rejected before any processing happens.
pub fn parse_document(content: &str) -> Result<Mapping, DocumentError> {
    match serde_yaml::from_str::<Value>(content)? {
        Value::Mapping(map) => Ok(map),
        _ => Err(DocumentError::NotMapping),
    }
}
