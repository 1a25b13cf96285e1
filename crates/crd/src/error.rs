//! Error types for CRD patching

use thiserror::Error;

use crate::value::PathError;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PatchError>;

/// Every failure is fatal: the caller gets either a fully patched document or one of these.
#[derive(Debug, Error)]
pub enum PatchError {
    /// The input stream is not syntactically valid YAML
    #[error("input is not a valid YAML document: {0}")]
    Parse(serde_yaml::Error),

    /// The input stream holds more than one YAML document
    #[error("input is not a single YAML document: found {count} documents")]
    MultiDocument { count: usize },

    /// An expected nested path is missing or has the wrong shape
    #[error("{context}: {error}")]
    SchemaPath {
        context: &'static str,
        error: PathError,
    },

    /// A catalog snippet does not parse or does not look like a field schema
    #[error("{snippet} snippet is not a valid YAML document: {reason}")]
    SnippetDefinition {
        snippet: &'static str,
        reason: String,
    },

    /// Reading or writing the document stream failed
    #[error("I/O error on the document stream")]
    Io(#[from] std::io::Error),

    /// The patched document could not be rendered as YAML
    #[error("failed to serialize document: {0}")]
    Serialize(serde_yaml::Error),
}

impl PatchError {
    pub(crate) fn schema_path(context: &'static str, error: PathError) -> Self {
        Self::SchemaPath { context, error }
    }

    pub(crate) fn snippet(snippet: &'static str, reason: impl Into<String>) -> Self {
        Self::SnippetDefinition {
            snippet,
            reason: reason.into(),
        }
    }
}
