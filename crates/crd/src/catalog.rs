//! Canonical `adapterOverrides` and `sink` field schemas
//!
//! Snippets are authored as YAML under `snippets/<variant>/` and embedded at build
//! time. Each historical revision of the catalog is kept as its own variant so the
//! output of older releases can be reproduced or diffed.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::{PatchError, Result};

/// Sentence appended to the sink description when the sink is optional
pub const SINK_OPTIONAL_SUFFIX: &str = " If left empty, the events will be sent back to the sender.";

pub const ADAPTER_OVERRIDES_KEY: &str = "adapterOverrides";
pub const SINK_KEY: &str = "sink";
pub const PUBLIC_KEY: &str = "public";

const A_ADAPTER_OVERRIDES: &str = include_str!("../snippets/a/adapter-overrides.yaml");
const A_SINK: &str = include_str!("../snippets/a/sink.yaml");
const B_ADAPTER_OVERRIDES: &str = include_str!("../snippets/b/adapter-overrides.yaml");
const B_SINK: &str = include_str!("../snippets/b/sink.yaml");
const C_ADAPTER_OVERRIDES: &str = include_str!("../snippets/c/adapter-overrides.yaml");
const C_SINK: &str = include_str!("../snippets/c/sink.yaml");

/// Revision of the snippet catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CatalogVariant {
    /// `env`, `public`, `resources` and `tolerations` overrides; sink addressed with `oneOf`
    #[default]
    #[serde(rename = "a")]
    A,

    /// Variant A plus `labels`, `nodeSelector` and `affinity`
    #[serde(rename = "b")]
    B,

    /// Variant B without `env` and `tolerations`; sink addressed with `anyOf`
    #[serde(rename = "c")]
    C,

    /// Variant C without any sink schema
    #[serde(rename = "c-no-sink")]
    CNoSink,
}

impl CatalogVariant {
    pub fn all() -> &'static [CatalogVariant] {
        &[Self::A, Self::B, Self::C, Self::CNoSink]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::CNoSink => "c-no-sink",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::A => "env, public, resources, tolerations; sink with oneOf",
            Self::B => "adds labels, nodeSelector, affinity to variant a",
            Self::C => "drops env and tolerations from variant b; sink with anyOf",
            Self::CNoSink => "variant c without a sink schema",
        }
    }

    fn sources(&self) -> (&'static str, Option<&'static str>) {
        match self {
            Self::A => (A_ADAPTER_OVERRIDES, Some(A_SINK)),
            Self::B => (B_ADAPTER_OVERRIDES, Some(B_SINK)),
            Self::C => (C_ADAPTER_OVERRIDES, Some(C_SINK)),
            Self::CNoSink => (C_ADAPTER_OVERRIDES, None),
        }
    }
}

impl fmt::Display for CatalogVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CatalogVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|variant| variant.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::all().iter().map(|v| v.name()).collect();
                format!(
                    "unknown catalog variant '{s}', expected one of: {}",
                    names.join(", ")
                )
            })
    }
}

/// Canonical `adapterOverrides` schema
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterOverridesSnippet {
    schema: Value,
}

impl AdapterOverridesSnippet {
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Fresh copy of the schema, without `public` unless `keep_public` is set.
    pub fn desired(&self, keep_public: bool) -> Value {
        let mut desired = self.schema.clone();
        if !keep_public {
            if let Some(properties) = desired
                .get_mut("properties")
                .and_then(Value::as_mapping_mut)
            {
                properties.shift_remove(PUBLIC_KEY);
            }
        }
        desired
    }
}

/// Canonical `sink` schema
#[derive(Debug, Clone, PartialEq)]
pub struct SinkSnippet {
    schema: Value,
    description: String,
}

impl SinkSnippet {
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Fresh copy of the `properties` subtree
    pub fn properties(&self) -> Value {
        self.schema
            .get("properties")
            .cloned()
            .unwrap_or_else(|| Value::Mapping(Mapping::new()))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Description used when the sink is not a required field
    pub fn optional_description(&self) -> String {
        format!("{}{}", self.description, SINK_OPTIONAL_SUFFIX)
    }
}

/// Immutable set of snippets for one catalog variant
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    variant: CatalogVariant,
    adapter_overrides: Option<AdapterOverridesSnippet>,
    sink: Option<SinkSnippet>,
}

impl Catalog {
    /// Parse the embedded snippets of `variant`
    pub fn load(variant: CatalogVariant) -> Result<Self> {
        let (adapter_overrides, sink) = variant.sources();
        let catalog = Self::from_sources(variant, Some(adapter_overrides), sink)?;
        debug!(variant = %variant, "loaded snippet catalog");
        Ok(catalog)
    }

    /// Build a catalog from hand-written snippet documents
    pub fn from_sources(
        variant: CatalogVariant,
        adapter_overrides: Option<&str>,
        sink: Option<&str>,
    ) -> Result<Self> {
        let adapter_overrides = adapter_overrides
            .map(|source| parse_snippet(ADAPTER_OVERRIDES_KEY, source))
            .transpose()?
            .map(|schema| AdapterOverridesSnippet { schema });

        let sink = sink
            .map(|source| parse_snippet(SINK_KEY, source))
            .transpose()?
            .map(|schema| {
                let description = schema
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .ok_or_else(|| PatchError::snippet(SINK_KEY, "description must be a string"))?;
                Ok::<_, PatchError>(SinkSnippet {
                    schema,
                    description,
                })
            })
            .transpose()?;

        Ok(Self {
            variant,
            adapter_overrides,
            sink,
        })
    }

    pub fn variant(&self) -> CatalogVariant {
        self.variant
    }

    pub fn adapter_overrides(&self) -> Option<&AdapterOverridesSnippet> {
        self.adapter_overrides.as_ref()
    }

    pub fn sink(&self) -> Option<&SinkSnippet> {
        self.sink.as_ref()
    }

    /// All snippets of this catalog as a single mapping keyed by field name
    pub fn to_document(&self) -> Value {
        let mut document = Mapping::new();
        if let Some(snippet) = &self.adapter_overrides {
            document.insert(ADAPTER_OVERRIDES_KEY.into(), snippet.schema.clone());
        }
        if let Some(snippet) = &self.sink {
            document.insert(SINK_KEY.into(), snippet.schema.clone());
        }
        Value::Mapping(document)
    }
}

/// Parse a `{<key>: <field schema>}` document and return the field schema.
fn parse_snippet(key: &'static str, source: &str) -> Result<Value> {
    let document: Value = serde_yaml::from_str(source)
        .map_err(|e| PatchError::snippet(key, e.to_string()))?;

    let mut root = match document {
        Value::Mapping(root) => root,
        other => {
            return Err(PatchError::snippet(
                key,
                format!("expected a mapping, found a {}", crate::value::kind_of(&other)),
            ))
        }
    };

    let schema = root
        .shift_remove(key)
        .ok_or_else(|| PatchError::snippet(key, format!("missing top-level '{key}' key")))?;

    if !schema.is_mapping() {
        return Err(PatchError::snippet(key, "field schema must be a mapping"));
    }
    if !matches!(schema.get("properties"), Some(Value::Mapping(_))) {
        return Err(PatchError::snippet(key, "properties must be a mapping"));
    }

    Ok(schema)
}
