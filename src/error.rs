//! Error types for the normalization pipeline.
//!
//! Nothing is recovered internally; every variant is fatal and propagates to
//! the caller with `?`. The binary prints the chain and exits non-zero.

use std::path::PathBuf;

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, NormalizeError>;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The target path does not exist. Checked before any other step runs.
    #[error("no such file: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Backup copy, read, or write failure. fs-err attaches the offending
    /// path to the underlying message.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not well-formed JSON.
    #[error("invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A `"notes"` value is not an array of notes.
    #[error("expected \"notes\" to be an array, found {found}")]
    NotesShape { found: &'static str },

    /// An element of a `"notes"` array is not an object.
    #[error("expected a note object, found {found}")]
    NoteShape { found: &'static str },

    /// A note's `"velocity"` field is missing or non-numeric.
    #[error("bad note velocity: {reason}")]
    Velocity { reason: String },

    /// Serialization failure while writing the rewritten document.
    #[error("failed to serialize document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Short type name for a JSON value, used in shape diagnostics.
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
