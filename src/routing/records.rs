//! Redirect records and their external encodings.
//!
//! # Responsibilities
//! - Define the `RedirectRecord` decoded from a redirect document
//! - Decode YAML and JSON documents into an ordered record sequence
//! - Infer the document format from a file extension
//!
//! # Design Decisions
//! - Decoding is the only fallible step before a handler exists
//! - Record order is preserved so later duplicates win in the mapping
//! - Unknown keys in an entry are ignored, `path` and `url` are required

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One exact-match redirect rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RedirectRecord {
    /// Request path to match, compared byte for byte.
    pub path: String,

    /// Redirect target. Named `url` in redirect documents.
    #[serde(rename = "url")]
    pub destination: String,
}

impl RedirectRecord {
    pub fn new(path: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            destination: destination.into(),
        }
    }
}

/// A redirect document could not be decoded into a record sequence.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed YAML redirect records: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("malformed JSON redirect records: {0}")]
    Json(#[from] serde_json::Error),
}

/// Encoding of a redirect document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordFormat {
    Yaml,
    Json,
}

impl RecordFormat {
    /// Infer the format from the file extension (`.yaml`, `.yml`, `.json`).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(RecordFormat::Yaml),
            "json" => Some(RecordFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for RecordFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordFormat::Yaml => f.write_str("yaml"),
            RecordFormat::Json => f.write_str("json"),
        }
    }
}

/// Decode a YAML sequence of `{path, url}` entries.
///
/// An empty document or an explicit `null` decodes to no records.
pub fn decode_yaml(yml: &[u8]) -> Result<Vec<RedirectRecord>, DecodeError> {
    if yml.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let records: Option<Vec<RedirectRecord>> = serde_yaml::from_slice(yml)?;
    Ok(records.unwrap_or_default())
}

/// Decode a JSON array of `{"path", "url"}` objects.
pub fn decode_json(json: &[u8]) -> Result<Vec<RedirectRecord>, DecodeError> {
    if json.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let records: Option<Vec<RedirectRecord>> = serde_json::from_slice(json)?;
    Ok(records.unwrap_or_default())
}

/// Decode a document in the given format.
pub fn decode_records(format: RecordFormat, bytes: &[u8]) -> Result<Vec<RedirectRecord>, DecodeError> {
    match format {
        RecordFormat::Yaml => decode_yaml(bytes),
        RecordFormat::Json => decode_json(bytes),
    }
}
