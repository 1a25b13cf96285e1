//! Typed traversal over generic YAML value trees
//!
//! CRD documents are handled as plain [`serde_yaml::Value`] trees so that fields
//! this tool knows nothing about survive the round-trip untouched. The helpers
//! here walk such a tree one key at a time and report the first segment that is
//! absent or not a mapping, together with the dotted path leading to it.

use serde_yaml::{Mapping, Value};
use std::fmt;
use thiserror::Error;

/// A failed lookup inside a value tree
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct PathError {
    /// Dotted path of the offending node, e.g. `spec.versions[0].schema`
    pub path: String,

    pub reason: PathErrorReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathErrorReason {
    Missing,
    UnexpectedKind {
        expected: &'static str,
        found: &'static str,
    },
}

impl fmt::Display for PathErrorReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "attribute is missing"),
            Self::UnexpectedKind { expected, found } => {
                write!(f, "expected a {expected}, found a {found}")
            }
        }
    }
}

impl PathError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: PathErrorReason::Missing,
        }
    }

    pub fn unexpected(path: impl Into<String>, expected: &'static str, value: &Value) -> Self {
        Self {
            path: path.into(),
            reason: PathErrorReason::UnexpectedKind {
                expected,
                found: kind_of(value),
            },
        }
    }
}

/// Human readable name of a value's node kind
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Append a mapping key to a dotted path
pub fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Append a sequence index to a dotted path
pub fn join_index(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

pub fn as_mapping<'a>(value: &'a Value, path: &str) -> Result<&'a Mapping, PathError> {
    value
        .as_mapping()
        .ok_or_else(|| PathError::unexpected(path, "mapping", value))
}

pub fn as_mapping_mut<'a>(value: &'a mut Value, path: &str) -> Result<&'a mut Mapping, PathError> {
    match value {
        Value::Mapping(mapping) => Ok(mapping),
        other => Err(PathError::unexpected(path, "mapping", other)),
    }
}

pub fn as_sequence_mut<'a>(
    value: &'a mut Value,
    path: &str,
) -> Result<&'a mut Vec<Value>, PathError> {
    match value {
        Value::Sequence(sequence) => Ok(sequence),
        other => Err(PathError::unexpected(path, "sequence", other)),
    }
}

/// Walk `segments` down from `value` (located at `base`), requiring a mapping at every step.
pub fn mapping_at<'a>(
    value: &'a Value,
    base: &str,
    segments: &[&str],
) -> Result<&'a Mapping, PathError> {
    let mut current = value;
    let mut path = base.to_string();

    for segment in segments {
        let mapping = as_mapping(current, &path)?;
        path = join_key(&path, segment);
        current = mapping
            .get(*segment)
            .ok_or_else(|| PathError::missing(&path))?;
    }

    as_mapping(current, &path)
}

/// Mutable variant of [`mapping_at`].
pub fn mapping_at_mut<'a>(
    value: &'a mut Value,
    base: &str,
    segments: &[&str],
) -> Result<&'a mut Mapping, PathError> {
    let mut current = value;
    let mut path = base.to_string();

    for segment in segments {
        let mapping = as_mapping_mut(current, &path)?;
        path = join_key(&path, segment);
        current = mapping
            .get_mut(*segment)
            .ok_or_else(|| PathError::missing(&path))?;
    }

    as_mapping_mut(current, &path)
}

/// Look up `key` in `mapping`, treating an explicit `null` the same as an absent key.
pub fn present<'a>(mapping: &'a Mapping, key: &str) -> Option<&'a Value> {
    mapping.get(key).filter(|value| !value.is_null())
}

/// Mutable variant of [`present`].
pub fn present_mut<'a>(mapping: &'a mut Mapping, key: &str) -> Option<&'a mut Value> {
    mapping.get_mut(key).filter(|value| !value.is_null())
}
